//! One-shot invocation: run the handler once and print its outcome

use anyhow::Result;
use clap::Parser;
use dbinit_core::{create_pool, invoke};

use super::DbArgs;

/// Arguments for the invoke command
#[derive(Parser, Debug)]
pub struct InvokeArgs {
    /// Request body to pass along (parsed as JSON, otherwise unused)
    #[arg(long, default_value = "")]
    pub body: String,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run one invocation. Returns whether it succeeded.
pub async fn run_invoke(args: InvokeArgs) -> Result<bool> {
    let config = args.db.load()?;
    let pool = create_pool(&config);

    let outcome = invoke(&config, &pool, args.body.as_bytes()).await;
    println!("{}", outcome.render());

    pool.close().await;
    Ok(outcome.is_ok())
}
