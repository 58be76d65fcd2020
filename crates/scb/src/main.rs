use std::sync::Arc;

use scb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), scb_core::Error> {
    scb_core::logging::init("scb")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(mode = cfg.delivery.label(), "configuration loaded");

    scb_telegram::router::run(cfg)
        .await
        .map_err(|e| scb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
