//! Inputs and outputs of single-party transactions.
//!
//! An input spends coins from an address and carries that address's
//! signature. Its sequence number must be exactly one more than the last
//! sequence the ledger committed for the address; sequence 1 is the
//! address's first transaction and must reveal the public key so the ledger
//! can bind it to the address. Later inputs omit the key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{CodecError, CodecResult, Reader, WireDecode, WireEncode, Writer};
use crate::crypto::{PublicKey, Signature};
use crate::types::{Address, Coins};

/// One signed spend from an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// `hash160` of the spender's public key.
    pub address: Address,
    pub coins: Coins,
    /// Must be one greater than the last committed sequence for `address`.
    pub sequence: i64,
    /// Signature over the enclosing transaction's signable bytes.
    #[serde(default)]
    pub signature: Option<Signature>,
    /// Present iff `sequence == 1`.
    #[serde(default)]
    pub pub_key: Option<PublicKey>,
}

/// Coins credited to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: Address,
    pub coins: Coins,
}

impl TxInput {
    /// An unsigned input without a public key.
    pub fn new(address: Address, coins: Coins, sequence: i64) -> Self {
        Self {
            address,
            coins,
            sequence,
            signature: None,
            pub_key: None,
        }
    }

    /// First spend from a key: sequence 1, address derived from the key,
    /// key revealed.
    pub fn first(pub_key: PublicKey, coins: Coins) -> Self {
        Self {
            address: pub_key.address(),
            coins,
            sequence: 1,
            signature: None,
            pub_key: Some(pub_key),
        }
    }

    pub fn with_pub_key(mut self, pub_key: PublicKey) -> Self {
        self.pub_key = Some(pub_key);
        self
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Encodes the input, writing the signature as absent when
    /// `include_signature` is false. Signable bytes use the latter form, so
    /// they never depend on signature state.
    pub(crate) fn encode_with(&self, w: &mut Writer, include_signature: bool) {
        self.address.encode_to(w);
        self.coins.encode_to(w);
        w.write_i64(self.sequence);
        let signature = if include_signature {
            self.signature.as_ref()
        } else {
            None
        };
        w.write_option(signature, |w, sig| w.write_bytes(sig.as_bytes()));
        w.write_option(self.pub_key.as_ref(), |w, pk| w.write_bytes(pk.as_bytes()));
    }
}

impl WireEncode for TxInput {
    fn encode_to(&self, w: &mut Writer) {
        self.encode_with(w, true);
    }
}

impl WireDecode for TxInput {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let address = Address::decode_from(r)?;
        let coins = Coins::decode_from(r)?;
        let sequence = r.read_i64("input.sequence")?;
        let signature = r.read_option("input.signature", |r| {
            let offset = r.position();
            let bytes = r.read_bytes("input.signature")?;
            Signature::try_from_slice(&bytes).map_err(|e| CodecError::Decode {
                field: "input.signature",
                offset,
                reason: e.to_string(),
            })
        })?;
        let pub_key = r.read_option("input.pub_key", |r| {
            let offset = r.position();
            let bytes = r.read_bytes("input.pub_key")?;
            PublicKey::try_from_slice(&bytes).map_err(|e| CodecError::Decode {
                field: "input.pub_key",
                offset,
                reason: e.to_string(),
            })
        })?;
        Ok(Self {
            address,
            coins,
            sequence,
            signature,
            pub_key,
        })
    }
}

impl fmt::Display for TxInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxInput{{{},{},{},{},{}}}",
            self.address,
            self.coins,
            self.sequence,
            self.signature.map(|s| s.to_hex()).unwrap_or_default(),
            self.pub_key.map(|k| k.to_hex()).unwrap_or_default()
        )
    }
}

impl TxOutput {
    pub fn new(address: Address, coins: Coins) -> Self {
        Self { address, coins }
    }
}

impl WireEncode for TxOutput {
    fn encode_to(&self, w: &mut Writer) {
        self.address.encode_to(w);
        self.coins.encode_to(w);
    }
}

impl WireDecode for TxOutput {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let address = Address::decode_from(r)?;
        let coins = Coins::decode_from(r)?;
        Ok(Self { address, coins })
    }
}

impl fmt::Display for TxOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxOutput{{{},{}}}", self.address, self.coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn first_input_derives_address_and_reveals_key() {
        let kp = Keypair::from_secret("test1");
        let input = TxInput::first(kp.public_key(), Coins::single("", 1));
        assert_eq!(input.address, kp.address());
        assert_eq!(input.sequence, 1);
        assert_eq!(input.pub_key, Some(kp.public_key()));
        assert!(!input.is_signed());
    }

    #[test]
    fn input_wire_roundtrip_with_signature() {
        let kp = Keypair::from_secret("test1");
        let mut input = TxInput::first(kp.public_key(), Coins::single("", 1));
        input.signature = Some(kp.sign(b"anything"));
        let bytes = input.to_wire_bytes();
        assert_eq!(TxInput::from_wire_bytes(&bytes).unwrap(), input);
    }

    #[test]
    fn signature_free_encoding_ignores_signature() {
        let kp = Keypair::from_secret("test1");
        let unsigned = TxInput::first(kp.public_key(), Coins::single("", 1));
        let mut signed = unsigned.clone();
        signed.signature = Some(kp.sign(b"x"));

        let mut a = Writer::new();
        unsigned.encode_with(&mut a, false);
        let mut b = Writer::new();
        signed.encode_with(&mut b, false);
        assert_eq!(a.into_bytes(), b.into_bytes());
    }

    #[test]
    fn malformed_signature_length_rejected() {
        let mut w = Writer::new();
        Address::from([1u8; 20]).encode_to(&mut w);
        Coins::single("", 1).encode_to(&mut w);
        w.write_i64(2);
        w.write_u8(0x01);
        w.write_bytes(&[0u8; 10]);
        w.write_u8(0x00);
        let bytes = w.into_bytes();
        assert!(matches!(
            TxInput::from_wire_bytes(&bytes),
            Err(CodecError::Decode {
                field: "input.signature",
                ..
            })
        ));
    }

    #[test]
    fn output_display_uses_uppercase_hex() {
        let out = TxOutput::new(Address::from([0xab; 20]), Coins::single("", 1));
        assert_eq!(out.to_string(), format!("TxOutput{{{},1}}", "AB".repeat(20)));
    }
}
