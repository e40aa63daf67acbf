// Copyright (c) 2026 Cobalt Ledger Developers. MIT License.
// See LICENSE for details.

//! # Cobalt Node
//!
//! Entry point for the `cobalt-node` binary. Parses CLI arguments,
//! initializes logging, and runs the selected scenario:
//!
//! - `send`     — one signed transfer
//! - `sequence` — many transfers with strictly increasing sequences
//! - `cobalt`   — a two-bank agreement carried as an opaque transaction
//! - `version`  — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use cobalt_node::scenarios::{self, ScenarioReport};
use cobalt_protocol::config::{SIGNING_ALGORITHM, TX_TYPE_APP, TX_TYPE_OPAQUE, TX_TYPE_SEND};

use cli::{CobaltNodeCli, Commands};

fn main() -> Result<()> {
    let cli = CobaltNodeCli::parse();

    if let Commands::Version = cli.command {
        print_version();
        return Ok(());
    }

    logging::init_logging(cli.log_format)?;
    tracing::info!(chain_id = %cli.chain_id, "starting cobalt-node");

    let report = match cli.command {
        Commands::Send => scenarios::send(&cli.chain_id).context("send scenario failed")?,
        Commands::Sequence(args) => scenarios::sequence(&cli.chain_id, args.count, args.rounds)
            .context("sequence scenario failed")?,
        Commands::Cobalt => scenarios::cobalt(&cli.chain_id).context("cobalt scenario failed")?,
        Commands::Version => return Ok(()),
    };
    print_report(&report);
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    println!("Appended transactions: {}", report.appended);
    println!("State root:            {}", report.root);
}

fn print_version() {
    println!("cobalt-node {}", env!("CARGO_PKG_VERSION"));
    println!(
        "tx tags     send=0x{:02X} app=0x{:02X} opaque=0x{:02X}",
        TX_TYPE_SEND, TX_TYPE_APP, TX_TYPE_OPAQUE
    );
    println!("signatures  {}", SIGNING_ALGORITHM);
}
