//! # CLI Interface
//!
//! Command-line arguments for `cobalt-node`, built with `clap` derive.
//! Every subcommand runs one scenario against a fresh in-memory ledger.

use clap::{Parser, Subcommand};

use cobalt_protocol::config::DEFAULT_CHAIN_ID;

use crate::logging::LogFormat;

/// Cobalt reference ledger and scenario runner.
#[derive(Parser, Debug)]
#[command(
    name = "cobalt-node",
    about = "Cobalt reference ledger and scenario runner",
    version,
    propagate_version = true
)]
pub struct CobaltNodeCli {
    /// Chain identifier every signature is bound to.
    #[arg(long, global = true, env = "COBALT_CHAIN_ID", default_value = DEFAULT_CHAIN_ID)]
    pub chain_id: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, env = "COBALT_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign and append a single transfer.
    Send,
    /// Fund many accounts, then transfer between them at random.
    Sequence(SequenceArgs),
    /// Collect two bank signatures on an agreement and append it.
    Cobalt,
    /// Print version information and exit.
    Version,
}

#[derive(Parser, Debug)]
pub struct SequenceArgs {
    /// Number of accounts to fund.
    #[arg(long, short = 'n', default_value_t = 100)]
    pub count: usize,

    /// Number of random transfers after funding.
    #[arg(long, short = 'r', default_value_t = 1000)]
    pub rounds: usize,
}
