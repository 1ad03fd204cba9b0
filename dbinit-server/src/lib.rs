//! dbinit-server: HTTP invocation surface for the database bootstrap handler
//!
//! Function runtimes forward each trigger as an HTTP request; the response
//! body is the handler's outcome string.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use server::{build_router, run_server, ServerConfig};
pub use state::AppState;
