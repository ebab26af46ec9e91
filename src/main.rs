use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commentd::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter `{}`", config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = config.load_store().context("failed to load seed comments")?;
    info!(comments = store.len(), "store seeded");

    Server::bind(&config.addr)
        .await?
        .serve(commentd::app(Arc::new(store)))
        .await?;
    Ok(())
}
