//! Pre-encoded transactions (wire tag `0x03`).
//!
//! The payload is produced elsewhere and travels untouched. Its signable
//! bytes are the payload itself. Signed agreement documents ride in this
//! variant as compact JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::agreement::{AgreementError, SignedAgreementTx};
use super::signing::SignBytes;
use crate::codec::{CodecResult, Reader, WireDecode, WireEncode, Writer};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpaqueTx {
    pub bytes: Vec<u8>,
}

impl OpaqueTx {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn from_signed_agreement(doc: &SignedAgreementTx) -> Result<Self, AgreementError> {
        Ok(Self::new(doc.to_json()?.into_bytes()))
    }

    pub fn to_signed_agreement(&self) -> Result<SignedAgreementTx, AgreementError> {
        SignedAgreementTx::from_json_slice(&self.bytes)
    }
}

impl From<Vec<u8>> for OpaqueTx {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl SignBytes for OpaqueTx {
    /// The payload, unchanged. The chain id is not mixed in.
    fn sign_bytes(&self, _chain_id: &str) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl WireEncode for OpaqueTx {
    fn encode_to(&self, w: &mut Writer) {
        w.write_bytes(&self.bytes);
    }
}

impl WireDecode for OpaqueTx {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        r.read_bytes("opaque.bytes").map(Self::new)
    }
}

impl fmt::Display for OpaqueTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueTx{{{} bytes}}", self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::agreement::AgreementTx;

    #[test]
    fn sign_bytes_are_the_payload() {
        let tx = OpaqueTx::new(vec![1, 2, 3]);
        assert_eq!(tx.sign_bytes("any_chain"), vec![1, 2, 3]);
        assert_eq!(OpaqueTx::default().sign_bytes("x"), Vec::<u8>::new());
    }

    #[test]
    fn carries_signed_agreement() {
        let doc = AgreementTx::new(
            &serde_json::json!({"id": "d64c"}),
            vec![],
            vec!["A".into(), "B".into()],
        )
        .unwrap();
        let signed = SignedAgreementTx::new(doc);
        let tx = OpaqueTx::from_signed_agreement(&signed).unwrap();
        assert_eq!(tx.to_signed_agreement().unwrap(), signed);
    }

    #[test]
    fn non_json_payload_is_not_an_agreement() {
        let tx = OpaqueTx::new(vec![0xff, 0x00]);
        assert!(matches!(
            tx.to_signed_agreement(),
            Err(AgreementError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn wire_roundtrip() {
        let tx = OpaqueTx::new(b"pre-encoded".to_vec());
        assert_eq!(OpaqueTx::from_wire_bytes(&tx.to_wire_bytes()).unwrap(), tx);
    }
}
