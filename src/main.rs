use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gambit_link::LinkEngine;

fn main() -> Result<()> {
    // stdout carries the protocol; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "gambit starting");
    LinkEngine::new().run()?;
    Ok(())
}
