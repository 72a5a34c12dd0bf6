//! Diagnostic logging.
//!
//! Everything goes to stderr so stdout stays reserved for the location a
//! provider prints. `RUST_LOG` takes precedence over the verbosity flag.

use crate::error::{Result, WwwError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "www=debug" } else { "www=warn" }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .map_err(|e| WwwError::Config(format!("Failed to create log filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_selects_level() {
        assert_eq!(default_directive(false), "www=warn");
        assert_eq!(default_directive(true), "www=debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false).unwrap();
        init(true).unwrap();
    }
}
