//! The bootstrap operation: create the `wordpress` schema if it is absent.
//!
//! One invocation executes at most one statement. Failures are recovered
//! into an [`Outcome`] and rendered as `"Error: <message>"`, never raised.

use async_trait::async_trait;

use crate::config::DbConfig;
use crate::error::{BootstrapError, Result};

/// Schema created by every invocation
pub const TARGET_DATABASE: &str = "wordpress";

/// Idempotent creation statement
pub const CREATE_DATABASE_STMT: &str = "CREATE DATABASE IF NOT EXISTS wordpress";

/// Response body for a successful invocation
pub const OK_RESPONSE: &str = "ok";

/// Executes a single statement on a scoped connection.
///
/// Implementations must release the connection on every exit path.
#[async_trait]
pub trait StatementRunner: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<()>;
}

/// Run the creation statement once. No retry.
pub async fn create_database<R>(runner: &R) -> Result<()>
where
    R: StatementRunner + ?Sized,
{
    runner.execute(CREATE_DATABASE_STMT).await
}

/// Result of one invocation
#[derive(Debug)]
pub enum Outcome {
    Ok,
    Failed(BootstrapError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    /// Response text: `"ok"` or `"Error: <message>"`
    pub fn render(&self) -> String {
        match self {
            Outcome::Ok => OK_RESPONSE.to_string(),
            Outcome::Failed(e) => format!("Error: {}", e),
        }
    }
}

impl From<Result<()>> for Outcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Outcome::Ok,
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Run one invocation and produce its [`Outcome`].
///
/// The body is parsed as JSON for diagnostics only; no field is consulted.
pub async fn invoke<R>(config: &DbConfig, runner: &R, body: &[u8]) -> Outcome
where
    R: StatementRunner + ?Sized,
{
    inspect_body(body);

    let result = match config.credentials() {
        Ok(creds) => {
            tracing::debug!(
                host = creds.host,
                user = creds.user,
                dialect = %config.dialect,
                database = TARGET_DATABASE,
                "creating database"
            );
            create_database(runner).await
        }
        Err(e) => Err(e),
    };

    let outcome = Outcome::from(result);
    match &outcome {
        Outcome::Ok => tracing::info!(database = TARGET_DATABASE, "database ready"),
        Outcome::Failed(e) => tracing::warn!(error = %e, "database bootstrap failed"),
    }
    outcome
}

/// Invocation entry point: request body in, response text out.
pub async fn handle<R>(config: &DbConfig, runner: &R, body: &[u8]) -> String
where
    R: StatementRunner + ?Sized,
{
    invoke(config, runner, body).await.render()
}

fn inspect_body(body: &[u8]) {
    if body.is_empty() {
        return;
    }
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => tracing::debug!(body = %value, "request body (unused)"),
        Err(e) => tracing::debug!(error = %e, "request body is not JSON (ignored)"),
    }
}
