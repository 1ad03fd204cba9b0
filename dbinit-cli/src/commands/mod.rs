pub mod invoke;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use dbinit_core::{DbConfig, Dialect};

/// Connection flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database driver / dialect (mysql, mariadb); overrides DB_DRIVER
    #[arg(long, value_parser = parse_dialect)]
    pub driver: Option<Dialect>,
}

impl DbArgs {
    /// Build the connection config once, from the environment plus flags
    pub fn load(&self) -> Result<DbConfig> {
        let config = DbConfig::from_env().context("Invalid DB_* environment")?;
        Ok(match self.driver {
            Some(dialect) => config.with_dialect(dialect),
            None => config,
        })
    }
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse().map_err(|e: dbinit_core::BootstrapError| e.to_string())
}
