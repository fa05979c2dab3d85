use anyhow::Result;
use tracing::info;

use turochamp_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    info!("turochamp starting");
    UciEngine::new().run()?;
    Ok(())
}
