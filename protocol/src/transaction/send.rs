//! Value-transfer transactions (wire tag `0x01`).

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::signing::SignBytes;
use super::types::{TxInput, TxOutput};
use super::verification::{validate_fee_gas, TransactionError};
use crate::codec::{encode_chain_id, CodecResult, Reader, WireDecode, WireEncode, Writer};
use crate::config::{MAX_TX_INPUTS, MAX_TX_OUTPUTS};
use crate::crypto::{Keypair, Signature};
use crate::types::Address;

/// Moves coins from one or more inputs to one or more outputs. Each input
/// is signed independently by the key behind its address, over the same
/// signable bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTx {
    pub fee: i64,
    pub gas: i64,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl SendTx {
    pub fn new(fee: i64, gas: i64, inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            fee,
            gas,
            inputs,
            outputs,
        }
    }

    fn encode_with(&self, w: &mut Writer, include_signatures: bool) {
        w.write_i64(self.fee);
        w.write_i64(self.gas);
        w.write_len(self.inputs.len());
        for input in &self.inputs {
            input.encode_with(w, include_signatures);
        }
        w.write_seq(&self.outputs);
    }

    /// Attaches `signature` to the first input spending from `address`.
    ///
    /// Fails with [`TransactionError::SignatureTargetNotFound`] when no
    /// input matches; no signature is changed in that case.
    pub fn set_signature(
        &mut self,
        address: &Address,
        signature: Signature,
    ) -> Result<(), TransactionError> {
        let input = self
            .inputs
            .iter_mut()
            .find(|input| &input.address == address)
            .ok_or_else(|| TransactionError::SignatureTargetNotFound {
                address: address.clone(),
            })?;
        input.signature = Some(signature);
        debug!(%address, "signature attached to send input");
        Ok(())
    }

    /// Signs the signable bytes with `keypair` and attaches the signature
    /// to the input spending from the keypair's address.
    pub fn sign(&mut self, chain_id: &str, keypair: &Keypair) -> Result<(), TransactionError> {
        let signature = keypair.sign(&self.sign_bytes(chain_id));
        self.set_signature(&keypair.address(), signature)
    }

    /// `true` once every input carries a signature.
    pub fn is_fully_signed(&self) -> bool {
        self.inputs.iter().all(TxInput::is_signed)
    }

    /// Stateless checks: between one and [`MAX_TX_INPUTS`] inputs, between
    /// one and [`MAX_TX_OUTPUTS`] outputs, each of them well formed, and
    /// non-negative fee and gas.
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        validate_fee_gas(self.fee, self.gas)?;
        if self.inputs.is_empty() {
            return Err(TransactionError::EmptyInputs);
        }
        if self.inputs.len() > MAX_TX_INPUTS {
            return Err(TransactionError::InvalidInput {
                reason: format!("{} inputs, limit is {}", self.inputs.len(), MAX_TX_INPUTS),
            });
        }
        if self.outputs.is_empty() {
            return Err(TransactionError::EmptyOutputs);
        }
        if self.outputs.len() > MAX_TX_OUTPUTS {
            return Err(TransactionError::InvalidOutput {
                reason: format!("{} outputs, limit is {}", self.outputs.len(), MAX_TX_OUTPUTS),
            });
        }
        for input in &self.inputs {
            input.validate_basic()?;
        }
        for output in &self.outputs {
            output.validate_basic()?;
        }
        Ok(())
    }
}

impl SignBytes for SendTx {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        let mut bytes = encode_chain_id(chain_id);
        let mut w = Writer::new();
        self.encode_with(&mut w, false);
        bytes.extend_from_slice(&w.into_bytes());
        debug!(chain_id, len = bytes.len(), "computed send sign bytes");
        bytes
    }
}

impl WireEncode for SendTx {
    fn encode_to(&self, w: &mut Writer) {
        self.encode_with(w, true);
    }
}

impl WireDecode for SendTx {
    fn decode_from(r: &mut Reader<'_>) -> CodecResult<Self> {
        let fee = r.read_i64("send.fee")?;
        let gas = r.read_i64("send.gas")?;
        let inputs = r.read_seq("send.inputs", MAX_TX_INPUTS)?;
        let outputs = r.read_seq("send.outputs", MAX_TX_OUTPUTS)?;
        Ok(Self {
            fee,
            gas,
            inputs,
            outputs,
        })
    }
}

impl fmt::Display for SendTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
        let outputs: Vec<String> = self.outputs.iter().map(ToString::to_string).collect();
        write!(
            f,
            "SendTx{{{}/{} [{}]->[{}]}}",
            self.fee,
            self.gas,
            inputs.join(" "),
            outputs.join(" ")
        )
    }
}
