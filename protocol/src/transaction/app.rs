//! Contract-invocation transactions (wire tag `0x02`).
//!
//! The `data` payload is interpreted by whichever application `app_type`
//! selects; this layer only signs and carries it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::signing::SignBytes;
use super::types::TxInput;
use super::verification::{validate_fee_gas, TransactionError};
use crate::codec::{encode_chain_id, CodecResult, Reader, WireDecode, WireEncode, Writer};
use crate::crypto::{Keypair, Signature};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTx {
    pub fee: i64,
    pub gas: i64,
    /// Selects the target application.
    #[serde(rename = "type")]
    pub app_type: u8,
    pub input: TxInput,
    #[serde(with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl AppTx {
    pub fn new(fee: i64, gas: i64, app_type: u8, input: TxInput, data: Vec<u8>) -> Self {
        Self {
            fee,
            gas,
            app_type,
            input,
            data,
        }
    }

    fn encode_with(&self, w: &mut Writer, include_signature: bool) {
        w.write_i64(self.fee);
        w.write_i64(self.gas);
        w.write_u8(self.app_type);
        self.input.encode_with(w, include_signature);
        w.write_bytes(&self.data);
    }

    /// There is exactly one signature slot, so this always succeeds.
    pub fn set_signature(&mut self, signature: Signature) {
        self.input.signature = Some(signature);
        debug!(address = %self.input.address, "signature attached to app input");
    }

    pub fn sign(&mut self, chain_id: &str, keypair: &Keypair) {
        let signature = keypair.sign(&self.sign_bytes(chain_id));
        self.set_signature(signature);
    }

    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        validate_fee_gas(self.fee, self.gas)?;
        self.input.validate_basic()
    }
}

impl SignBytes for AppTx {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        let mut bytes = encode_chain_id(chain_id);
        let mut w = Writer::new();
        self.encode_with(&mut w, false);
        bytes.extend_from_slice(&w.into_bytes());
        bytes
    }
}

impl WireEncode for AppTx {
    fn encode_to(&self, w: &mut Writer) {
        self.encode_with(w, true);
    }
}

impl WireDecode for AppTx {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let fee = r.read_i64("app.fee")?;
        let gas = r.read_i64("app.gas")?;
        let app_type = r.read_u8("app.type")?;
        let input = TxInput::decode_from(r)?;
        let data = r.read_bytes("app.data")?;
        Ok(Self {
            fee,
            gas,
            app_type,
            input,
            data,
        })
    }
}

impl fmt::Display for AppTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AppTx{{{}/{} {} {} {}}}",
            self.fee,
            self.gas,
            self.app_type,
            self.input,
            hex::encode_upper(&self.data)
        )
    }
}

/// Uppercase hex in JSON for the opaque payload.
mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CHAIN_ID;
    use crate::types::{Address, Coins};

    fn sample() -> (AppTx, Keypair) {
        let kp = Keypair::from_secret("app-user");
        let input = TxInput::new(kp.address(), Coins::single("", 5), 3);
        (AppTx::new(1, 2, 0x07, input, b"call()".to_vec()), kp)
    }

    #[test]
    fn sign_bytes_exclude_signature() {
        let (mut tx, kp) = sample();
        let before = tx.sign_bytes(DEFAULT_CHAIN_ID);
        tx.sign(DEFAULT_CHAIN_ID, &kp);
        assert!(tx.input.is_signed());
        assert_eq!(before, tx.sign_bytes(DEFAULT_CHAIN_ID));
    }

    #[test]
    fn data_is_part_of_sign_bytes() {
        let (tx, _) = sample();
        let mut other = tx.clone();
        other.data = b"call2()".to_vec();
        assert_ne!(tx.sign_bytes(DEFAULT_CHAIN_ID), other.sign_bytes(DEFAULT_CHAIN_ID));
    }

    #[test]
    fn wire_roundtrip() {
        let (mut tx, kp) = sample();
        tx.sign(DEFAULT_CHAIN_ID, &kp);
        assert_eq!(AppTx::from_wire_bytes(&tx.to_wire_bytes()).unwrap(), tx);
    }

    #[test]
    fn validate_basic_checks_input() {
        let (mut tx, _) = sample();
        assert!(tx.validate_basic().is_ok());
        tx.input.address = Address::new(vec![0; 4]);
        assert!(matches!(
            tx.validate_basic(),
            Err(TransactionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn json_roundtrip_uses_hex_data() {
        let (tx, _) = sample();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["data"], hex::encode_upper(b"call()"));
        assert_eq!(json["type"], 7);
        let recovered: AppTx = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, tx);
    }
}
