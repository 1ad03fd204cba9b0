//! Connection configuration, built once at process start.
//!
//! Environment variables:
//!   DB_HOST       # Server host (required for a successful invocation)
//!   DB_USER       # Login user (required for a successful invocation)
//!   DB_PASSWORD   # Login password (required for a successful invocation)
//!   DB_PORT       # Server port (default: 3306)
//!   DB_DRIVER     # mysql | mariadb (default: mysql)
//!
//! Missing credentials are not a startup failure. They are carried as `None`
//! and reported by each invocation as an `"Error: ..."` outcome.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{BootstrapError, Result};

pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_DRIVER: &str = "DB_DRIVER";

/// Default MySQL server port
pub const DEFAULT_PORT: u16 = 3306;

/// SQL dialect / driver family to connect with.
///
/// Both variants speak the MySQL client/server protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
    MariaDb,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mysql+pymysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            other => Err(BootstrapError::config(format!(
                "unknown driver '{}' (expected mysql or mariadb)",
                other
            ))),
        }
    }
}

/// Connection pool sizing.
///
/// `size + overflow` is the ceiling on open connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub size: u32,
    pub overflow: u32,
    pub acquire_timeout: Duration,
    pub recycle: Duration,
}

impl PoolSettings {
    pub fn max_connections(&self) -> u32 {
        self.size + self.overflow
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            size: 5,
            overflow: 2,
            acquire_timeout: Duration::from_secs(30),
            recycle: Duration::from_secs(1800),
        }
    }
}

/// Database server connection settings.
///
/// No database name: the pool connects to the server, not a schema.
#[derive(Clone)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dialect: Dialect,
    pub pool: PoolSettings,
}

impl DbConfig {
    /// Build from an explicit set of credentials with default pool settings.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        dialect: Dialect,
    ) -> Self {
        Self {
            host: Some(host.into()),
            port: DEFAULT_PORT,
            user: Some(user.into()),
            password: Some(password.into()),
            dialect,
            pool: PoolSettings::default(),
        }
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| BootstrapError::config(format!("invalid {}: {}", ENV_PORT, e)))?,
            None => DEFAULT_PORT,
        };

        let dialect = match get(ENV_DRIVER) {
            Some(raw) => raw.parse()?,
            None => Dialect::default(),
        };

        Ok(Self {
            host: get(ENV_HOST),
            port,
            user: get(ENV_USER),
            password: get(ENV_PASSWORD),
            dialect,
            pool: PoolSettings::default(),
        })
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Login target required to reach the server, or the first setting missing.
    ///
    /// The password is only checked for presence; it stays in the config.
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let host = self
            .host
            .as_deref()
            .ok_or(BootstrapError::missing_setting(ENV_HOST))?;
        let user = self
            .user
            .as_deref()
            .ok_or(BootstrapError::missing_setting(ENV_USER))?;
        if self.password.is_none() {
            return Err(BootstrapError::missing_setting(ENV_PASSWORD));
        }
        Ok(Credentials { host, user })
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dialect", &self.dialect)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Borrowed login target of a fully-configured connection
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub host: &'a str,
    pub user: &'a str,
}
