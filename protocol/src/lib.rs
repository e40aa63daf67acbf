// Copyright (c) 2026 Cobalt Ledger Developers. MIT License.
// See LICENSE for details.

//! # Cobalt Protocol — Core Library
//!
//! Transaction authorization for the Cobalt ledger: how a transaction is
//! shaped, which bytes get signed, how signatures are attached, and how the
//! ledger tells one transaction variant from another.
//!
//! ## Architecture
//!
//! - **config** — Tag bytes, key and address sizes, decode limits, option
//!   keys.
//! - **types** — Addresses and coin sets.
//! - **crypto** — Ed25519 keys and signatures, SHA-256 and RIPEMD-160.
//! - **codec** — The canonical binary encoding, used on the wire and for
//!   signable bytes.
//! - **transaction** — Send, app, opaque and agreement transactions, the
//!   tagged registry, and transaction IDs.
//! - **ledger** — The boundary trait a ledger application implements.
//!
//! ## Example
//!
//! ```rust
//! use cobalt_protocol::config::DEFAULT_CHAIN_ID;
//! use cobalt_protocol::crypto::Keypair;
//! use cobalt_protocol::transaction::{SendTx, Tx, TxInput, TxOutput};
//! use cobalt_protocol::types::Coins;
//!
//! let alice = Keypair::from_secret("test1");
//! let bob = Keypair::from_secret("test2");
//! let mut send = SendTx::new(
//!     0,
//!     0,
//!     vec![TxInput::first(alice.public_key(), Coins::single("", 1))],
//!     vec![TxOutput::new(bob.address(), Coins::single("", 1))],
//! );
//! send.sign(DEFAULT_CHAIN_ID, &alice).unwrap();
//!
//! let tx = Tx::from(send);
//! assert_eq!(Tx::decode(&tx.encode()).unwrap(), tx);
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod ledger;
pub mod transaction;
pub mod types;
