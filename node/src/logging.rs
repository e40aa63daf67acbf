//! Log setup for the `cobalt-node` binary.
//!
//! Scenario reports are printed to stdout and tracing events go to stderr,
//! so `cobalt-node send > report.txt` captures only the report.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or does not parse. Ledger and plugin
/// decisions at `info`, protocol internals only when something is off.
pub const DEFAULT_DIRECTIVES: &str = "cobalt_node=info,cobalt_plugin=info,cobalt_protocol=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
    };
    installed.context("tracing subscriber already installed")?;

    tracing::debug!(?format, "logging ready");
    Ok(())
}
