//! Application state shared across handlers

use std::sync::Arc;

use dbinit_core::{DbConfig, StatementRunner};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DbConfig,
    runner: Arc<dyn StatementRunner>,
}

impl AppState {
    pub fn new(config: DbConfig, runner: Arc<dyn StatementRunner>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, runner }),
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    pub fn runner(&self) -> &dyn StatementRunner {
        self.inner.runner.as_ref()
    }
}
