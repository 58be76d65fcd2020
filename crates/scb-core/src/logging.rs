use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize tracing for the bot.
///
/// `RUST_LOG` overrides the default filter. Records emitted by teloxide through
/// the `log` crate are picked up by the subscriber's log bridge.
pub fn init(service_name: &str) -> Result<()> {
    // Default: info for our crates and teloxide, warn for everything else.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,teloxide=info,scb_core=info,scb_telegram=info,{service_name}=info"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to init logging: {e}")))
}
