//! HTTP server command: accept invocations until shutdown

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use dbinit_server::{run_server, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8080)
    #[arg(long, short = 'b', default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Port override, as set by function runtimes
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    fn bind_addr(&self) -> SocketAddr {
        match self.port {
            Some(port) => SocketAddr::new(self.bind.ip(), port),
            None => self.bind,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = args.db.load()?;
    let config = ServerConfig {
        bind_addr: args.bind_addr(),
    };

    tracing::info!("Starting dbinit server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(db, config).await.context("Server error")?;

    Ok(())
}
