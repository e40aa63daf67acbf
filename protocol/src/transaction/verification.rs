//! Stateless transaction validation.
//!
//! `validate_basic` checks only what can be decided from the transaction
//! itself: address lengths, coin-set shape, and the sequence/public-key
//! presence rule. Account existence, sequence continuity, and signature
//! verification against stored keys need ledger state and happen at the
//! ledger boundary, which uses [`verify_input_signature`] for the last step.
//!
//! Checks run cheapest first and the first failure is returned.

use thiserror::Error;

use super::types::{TxInput, TxOutput};
use crate::codec::CodecError;
use crate::crypto::PublicKey;
use crate::types::Address;

/// Errors raised by single-party transaction validation and signing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// An input violates a shape rule.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An output violates a shape rule.
    #[error("invalid output: {reason}")]
    InvalidOutput { reason: String },

    /// `set_signature` was given an address that no input spends from.
    /// The transaction is left untouched.
    #[error("no input with address {address}")]
    SignatureTargetNotFound { address: Address },

    #[error("fee must be non-negative, got {fee}")]
    InvalidFee { fee: i64 },

    #[error("gas must be non-negative, got {gas}")]
    InvalidGas { gas: i64 },

    #[error("transaction has no inputs")]
    EmptyInputs,

    #[error("transaction has no outputs")]
    EmptyOutputs,

    /// The tagged encoding is larger than the decoder accepts.
    #[error("encoded transaction is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },

    /// An input that must be signed carries no signature.
    #[error("input {address} is unsigned")]
    MissingSignature { address: Address },

    /// An input signature does not verify over the signable bytes.
    #[error("invalid signature for input {address}")]
    InvalidSignature { address: Address },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl TxInput {
    /// Shape checks for a single input. See the module docs.
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        let invalid = |reason: String| Err(TransactionError::InvalidInput { reason });

        if !self.address.is_well_formed() {
            return invalid(format!(
                "invalid address length {} for {}",
                self.address.len(),
                self.address
            ));
        }
        if let Err(e) = self.coins.validate() {
            return invalid(format!("invalid coins {}: {}", self.coins, e));
        }
        if self.coins.is_zero() {
            return invalid("coins cannot be zero".to_string());
        }
        if self.sequence <= 0 {
            return invalid(format!(
                "sequence must be greater than 0, got {}",
                self.sequence
            ));
        }
        if self.sequence == 1 && self.pub_key.is_none() {
            return invalid("pub_key must be present when sequence == 1".to_string());
        }
        if self.sequence > 1 && self.pub_key.is_some() {
            return invalid("pub_key must be absent when sequence > 1".to_string());
        }
        Ok(())
    }
}

impl TxOutput {
    /// Shape checks for a single output: address length and a valid,
    /// non-zero coin set.
    pub fn validate_basic(&self) -> Result<(), TransactionError> {
        let invalid = |reason: String| Err(TransactionError::InvalidOutput { reason });

        if !self.address.is_well_formed() {
            return invalid(format!(
                "invalid address length {} for {}",
                self.address.len(),
                self.address
            ));
        }
        if let Err(e) = self.coins.validate() {
            return invalid(format!("invalid coins {}: {}", self.coins, e));
        }
        if self.coins.is_zero() {
            return invalid("coins cannot be zero".to_string());
        }
        Ok(())
    }
}

/// Fee and gas are metered elsewhere; here they only need to be
/// non-negative.
pub(crate) fn validate_fee_gas(fee: i64, gas: i64) -> Result<(), TransactionError> {
    if fee < 0 {
        return Err(TransactionError::InvalidFee { fee });
    }
    if gas < 0 {
        return Err(TransactionError::InvalidGas { gas });
    }
    Ok(())
}

/// Verifies `input`'s signature over `sign_bytes` with `key`.
///
/// The key comes from the input itself on sequence 1, or from the ledger's
/// record for the address afterwards.
pub fn verify_input_signature(
    input: &TxInput,
    sign_bytes: &[u8],
    key: &PublicKey,
) -> Result<(), TransactionError> {
    let signature = input
        .signature
        .as_ref()
        .ok_or_else(|| TransactionError::MissingSignature {
            address: input.address.clone(),
        })?;
    if !key.verify(sign_bytes, signature) {
        return Err(TransactionError::InvalidSignature {
            address: input.address.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::types::Coins;

    fn valid_first_input() -> TxInput {
        TxInput::first(Keypair::from_secret("v").public_key(), Coins::single("", 1))
    }

    fn expect_invalid_input(input: &TxInput, needle: &str) {
        match input.validate_basic() {
            Err(TransactionError::InvalidInput { reason }) => {
                assert!(reason.contains(needle), "reason {:?} lacks {:?}", reason, needle)
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn valid_first_input_passes() {
        assert!(valid_first_input().validate_basic().is_ok());
    }

    #[test]
    fn valid_later_input_passes() {
        let input = TxInput::new(Address::from([2u8; 20]), Coins::single("", 3), 5);
        assert!(input.validate_basic().is_ok());
    }

    #[test]
    fn rejects_short_address() {
        let mut input = valid_first_input();
        input.address = Address::new(vec![1; 19]);
        expect_invalid_input(&input, "address length 19");
    }

    #[test]
    fn rejects_invalid_coins() {
        let mut input = valid_first_input();
        input.coins = [("gold", 1), ("gold", 1)].into_iter().collect();
        expect_invalid_input(&input, "invalid coins");
    }

    #[test]
    fn rejects_zero_coins() {
        let mut input = valid_first_input();
        input.coins = Coins::single("", 0);
        expect_invalid_input(&input, "zero");
    }

    #[test]
    fn rejects_non_positive_sequence() {
        let mut input = valid_first_input();
        input.sequence = 0;
        input.pub_key = None;
        expect_invalid_input(&input, "greater than 0");
        input.sequence = -4;
        expect_invalid_input(&input, "greater than 0");
    }

    #[test]
    fn rejects_first_sequence_without_key() {
        let mut input = valid_first_input();
        input.pub_key = None;
        expect_invalid_input(&input, "must be present");
    }

    #[test]
    fn rejects_later_sequence_with_key() {
        let mut input = valid_first_input();
        input.sequence = 2;
        expect_invalid_input(&input, "must be absent");
    }

    #[test]
    fn output_rejects_zero_coins() {
        let out = TxOutput::new(Address::from([3u8; 20]), Coins::single("", 0));
        assert!(matches!(
            out.validate_basic(),
            Err(TransactionError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn output_rejects_long_address() {
        let out = TxOutput::new(Address::new(vec![3u8; 21]), Coins::single("", 1));
        assert!(matches!(
            out.validate_basic(),
            Err(TransactionError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn output_rejects_negative_coins() {
        let out = TxOutput::new(Address::from([3u8; 20]), Coins::single("", -1));
        assert!(matches!(
            out.validate_basic(),
            Err(TransactionError::InvalidOutput { .. })
        ));
    }

    #[test]
    fn fee_and_gas_must_be_non_negative() {
        assert_eq!(validate_fee_gas(-1, 0), Err(TransactionError::InvalidFee { fee: -1 }));
        assert_eq!(validate_fee_gas(0, -2), Err(TransactionError::InvalidGas { gas: -2 }));
        assert!(validate_fee_gas(0, 0).is_ok());
    }

    #[test]
    fn verify_input_signature_paths() {
        let kp = Keypair::from_secret("signer");
        let mut input = TxInput::first(kp.public_key(), Coins::single("", 1));
        assert!(matches!(
            verify_input_signature(&input, b"msg", &kp.public_key()),
            Err(TransactionError::MissingSignature { .. })
        ));

        input.signature = Some(kp.sign(b"msg"));
        assert!(verify_input_signature(&input, b"msg", &kp.public_key()).is_ok());

        let other = Keypair::from_secret("other");
        assert!(matches!(
            verify_input_signature(&input, b"msg", &other.public_key()),
            Err(TransactionError::InvalidSignature { .. })
        ));
    }
}
