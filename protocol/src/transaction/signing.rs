//! Signable bytes and transaction identity.
//!
//! Every variant exposes the exact bytes a key holder signs through
//! [`SignBytes`]. For single-party transactions these are
//! `encode(chain_id) || encode(tx with all signatures absent)`, computed
//! from a signature-free view of the value: nothing is cleared and
//! restored, so computing them needs only a shared borrow and the result
//! never depends on which signatures are already attached.
//!
//! A transaction's ID is the RIPEMD-160 of those same bytes, so it is
//! stable across signing and differs between chains.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TX_ID_LENGTH;
use crate::crypto::ripemd160;

/// Canonical signing input of a transaction under a chain identifier.
pub trait SignBytes {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8>;
}

/// 20-byte transaction identifier. Renders as uppercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId(pub [u8; TX_ID_LENGTH]);

impl TxId {
    pub fn as_bytes(&self) -> &[u8; TX_ID_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", self.to_hex())
    }
}

/// `RIPEMD-160(tx.sign_bytes(chain_id))`.
pub fn tx_id<T: SignBytes + ?Sized>(chain_id: &str, tx: &T) -> TxId {
    TxId(ripemd160(&tx.sign_bytes(chain_id)))
}
