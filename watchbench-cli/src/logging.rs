//! Tracing bootstrap for the `watchbench` binary.
//!
//! The subscriber is configured from the `[general]` section before any
//! subcommand runs, so validation failures and benchmark progress both
//! land in the same stream.

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use watchbench_core::config::GeneralConfig;

/// Installs the global tracing subscriber once per process.
///
/// A `RUST_LOG` environment filter takes precedence over the configured
/// `log_level`. `log_format` picks the layer: `json` for runs whose output
/// is collected by automation, `pretty` for interactive use.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        other => bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
