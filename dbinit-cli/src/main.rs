//! dbinit - bootstrap a MySQL-compatible server with the `wordpress` schema
//!
//! - `dbinit serve`: long-running invocation endpoint for function runtimes
//! - `dbinit invoke`: run the handler once and print `ok` / `Error: ...`
//!
//! Connection settings come from DB_HOST, DB_USER, DB_PASSWORD (plus
//! optional DB_PORT, DB_DRIVER), read once at startup. A `.env` file in
//! the working directory is honored.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "dbinit",
    author,
    version,
    about = "Create the wordpress database on a MySQL-compatible server if it does not exist"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve invocations over HTTP (GET/POST /, GET /health)
    Serve(commands::serve::ServeArgs),
    /// Run a single invocation and print its outcome
    Invoke(commands::invoke::InvokeArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Missing .env is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => {
            commands::serve::run_serve(args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Invoke(args) => {
            let ok = commands::invoke::run_invoke(args).await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
