/// Structured error types for dbinit-core.
///
/// Every failure of an invocation lands in [`BootstrapError`]. The handler
/// never propagates these as faults; they are rendered into the
/// `"Error: ..."` response string by [`crate::bootstrap::Outcome`].
/// Binary crates (dbinit-cli) use `anyhow` for startup failures instead.
use thiserror::Error;

/// A failed database bootstrap operation
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A connection setting was not provided in the environment
    #[error("{name} is not set")]
    MissingSetting { name: &'static str },

    /// Could not obtain a connection from the pool
    /// (refused, unreachable, bad credentials, acquire timeout)
    #[error("{source}")]
    Connect {
        #[source]
        source: sqlx::Error,
    },

    /// The statement reached the server and failed there
    #[error("{source}")]
    Execute {
        #[source]
        source: sqlx::Error,
    },

    /// Invalid configuration value (driver, port)
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for dbinit-core operations
pub type Result<T> = std::result::Result<T, BootstrapError>;

impl BootstrapError {
    /// Create a missing setting error
    pub fn missing_setting(name: &'static str) -> Self {
        Self::MissingSetting { name }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Wrap a driver error raised while acquiring a connection
    pub fn connect(source: sqlx::Error) -> Self {
        Self::Connect { source }
    }

    /// Wrap a driver error raised while executing a statement
    pub fn execute(source: sqlx::Error) -> Self {
        Self::Execute { source }
    }
}
