//! # Cobalt Ledger Plugins
//!
//! Application logic that a ledger host runs for transactions it does not
//! interpret itself. The host forwards opaque payloads to a [`Plugin`],
//! along with configuration options addressed to it.
//!
//! - **cobalt** — [`CobaltPlugin`] accepts fully signed agreement
//!   documents, checks their signature slots against registered participant
//!   keys, and records each accepted document once.

pub mod cobalt;

pub use cobalt::{CobaltPlugin, Participant, PluginError};

use cobalt_protocol::ledger::{CommitResult, TxResult};

/// A unit of application logic hosted by a ledger.
pub trait Plugin {
    /// Short name, also the option-key prefix the host routes on.
    fn name(&self) -> &str;

    /// Applies a configuration option. Returns `"Success"` or a diagnostic.
    fn set_option(&mut self, key: &str, value: &str) -> String;

    /// Validates and applies a payload.
    fn run_tx(&mut self, tx_bytes: &[u8]) -> TxResult;

    /// Validates a payload without applying it.
    fn check_tx(&self, _tx_bytes: &[u8]) -> TxResult {
        TxResult::ok()
    }

    fn query(&self, query: &[u8]) -> TxResult;

    /// Digest of the plugin's state.
    fn commit(&mut self) -> CommitResult;
}
