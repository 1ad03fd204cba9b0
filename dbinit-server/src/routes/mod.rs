//! Route handlers for dbinit-server
//!
//! - invoke: the bootstrap invocation (`GET /`, `POST /`)
//! - health: liveness probe

pub mod health;
pub mod invoke;
