// Copyright (c) 2026 Cobalt Ledger Developers. MIT License.
// See LICENSE for details.

//! # Cobalt Node
//!
//! A reference ledger application for the Cobalt transaction layer and the
//! scenarios the `cobalt-node` binary runs against it.
//!
//! - **account** — Ledger accounts and deterministic demo keys.
//! - **ledger** — [`ledger::MemLedger`], an in-memory
//!   [`cobalt_protocol::ledger::LedgerApp`].
//! - **scenarios** — `send`, `sequence` and `cobalt` end-to-end runs.

pub mod account;
pub mod ledger;
pub mod scenarios;

pub use account::{Account, PrivAccount};
pub use ledger::MemLedger;
