//! Closed set of transaction variants and their wire tags.
//!
//! The encoding of a [`Tx`] is its one-byte tag followed by the variant's
//! body. Tags are fixed at compile time in [`TxKind::ALL`]; decoding any
//! other leading byte fails with [`CodecError::UnknownVariant`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::app::AppTx;
use super::opaque::OpaqueTx;
use super::send::SendTx;
use super::signing::{tx_id, SignBytes, TxId};
use super::verification::TransactionError;
use crate::codec::{CodecError, CodecResult, Reader, WireDecode, WireEncode, Writer};
use crate::config::{MAX_TX_SIZE_BYTES, TX_TYPE_APP, TX_TYPE_OPAQUE, TX_TYPE_SEND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Send,
    App,
    Opaque,
}

impl TxKind {
    /// Every registered kind, in tag order.
    pub const ALL: [TxKind; 3] = [TxKind::Send, TxKind::App, TxKind::Opaque];

    pub const fn tag(self) -> u8 {
        match self {
            TxKind::Send => TX_TYPE_SEND,
            TxKind::App => TX_TYPE_APP,
            TxKind::Opaque => TX_TYPE_OPAQUE,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::Send => "send",
            TxKind::App => "app",
            TxKind::Opaque => "opaque",
        };
        write!(f, "{}", name)
    }
}

/// Any transaction the ledger boundary accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Tx {
    Send(SendTx),
    App(AppTx),
    Opaque(OpaqueTx),
}

impl Tx {
    pub fn kind(&self) -> TxKind {
        match self {
            Tx::Send(_) => TxKind::Send,
            Tx::App(_) => TxKind::App,
            Tx::Opaque(_) => TxKind::Opaque,
        }
    }

    /// Tag byte followed by the variant body.
    pub fn encode(&self) -> Vec<u8> {
        self.to_wire_bytes()
    }

    /// Inverse of [`Tx::encode`]. Trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_wire_bytes(bytes)
    }

    pub fn id(&self, chain_id: &str) -> TxId {
        tx_id(chain_id, self)
    }

    /// Variant checks, then the size of the tagged encoding against
    /// [`MAX_TX_SIZE_BYTES`]. Opaque payloads are otherwise checked by
    /// whoever interprets them.
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        match self {
            Tx::Send(tx) => tx.validate_basic()?,
            Tx::App(tx) => tx.validate_basic()?,
            Tx::Opaque(_) => {}
        }
        let size = self.encoded_len();
        if size > MAX_TX_SIZE_BYTES {
            return Err(TransactionError::TooLarge {
                size,
                max: MAX_TX_SIZE_BYTES,
            });
        }
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        let mut w = Writer::new();
        self.encode_to(&mut w);
        w.len()
    }
}

impl SignBytes for Tx {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        match self {
            Tx::Send(tx) => tx.sign_bytes(chain_id),
            Tx::App(tx) => tx.sign_bytes(chain_id),
            Tx::Opaque(tx) => tx.sign_bytes(chain_id),
        }
    }
}

impl WireEncode for Tx {
    fn encode_to(&self, w: &mut Writer) {
        w.write_u8(self.kind().tag());
        match self {
            Tx::Send(tx) => tx.encode_to(w),
            Tx::App(tx) => tx.encode_to(w),
            Tx::Opaque(tx) => tx.encode_to(w),
        }
    }
}

impl WireDecode for Tx {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let tag = r.read_u8("tx.type")?;
        match TxKind::from_tag(tag) {
            Some(TxKind::Send) => SendTx::decode_from(r).map(Tx::Send),
            Some(TxKind::App) => AppTx::decode_from(r).map(Tx::App),
            Some(TxKind::Opaque) => OpaqueTx::decode_from(r).map(Tx::Opaque),
            None => Err(CodecError::UnknownVariant { tag }),
        }
    }
}

impl From<SendTx> for Tx {
    fn from(tx: SendTx) -> Self {
        Tx::Send(tx)
    }
}

impl From<AppTx> for Tx {
    fn from(tx: AppTx) -> Self {
        Tx::App(tx)
    }
}

impl From<OpaqueTx> for Tx {
    fn from(tx: OpaqueTx) -> Self {
        Tx::Opaque(tx)
    }
}

impl fmt::Display for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tx::Send(tx) => tx.fmt(f),
            Tx::App(tx) => tx.fmt(f),
            Tx::Opaque(tx) => tx.fmt(f),
        }
    }
}
