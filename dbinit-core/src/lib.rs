//! dbinit-core: bootstrap a MySQL-compatible server with the `wordpress` schema
//!
//! - [`config`]: connection settings built once from the environment
//! - [`pool`]: the shared, lazily-connecting sqlx pool
//! - [`bootstrap`]: the invocation itself (`"ok"` or `"Error: ..."`)

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod pool;

pub use bootstrap::{
    handle, invoke, Outcome, StatementRunner, CREATE_DATABASE_STMT, TARGET_DATABASE,
};
pub use config::{DbConfig, Dialect, PoolSettings};
pub use error::{BootstrapError, Result};
pub use pool::create_pool;
