//! Error types for dbinit-server
//!
//! Invocation failures are not errors here: they are rendered into the
//! response body. Only serving itself can fail.

use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
