//! # Ledger Boundary
//!
//! The interface an external ledger application exposes to the consensus
//! engine, and the result types it returns. Transactions cross this
//! boundary as tagged wire bytes ([`crate::transaction::Tx::encode`]).
//!
//! Configuration also crosses it as string key/value pairs through
//! [`LedgerApp::set_option`], which answers with a diagnostic log line:
//! [`OPTION_SUCCESS`] on success, anything else is an error description.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::CodecError;
use crate::transaction::agreement::AgreementError;
use crate::transaction::verification::TransactionError;

pub use crate::config::OPTION_SUCCESS;

/// Outcome category of a transaction or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    Ok,
    InternalError,
    EncodingError,
    UnknownVariant,
    InvalidInput,
    InvalidOutput,
    InvalidSequence,
    UnknownAccount,
    Unauthorized,
}

impl ResultCode {
    /// Stable numeric form, `0` for success.
    pub fn as_u32(self) -> u32 {
        match self {
            ResultCode::Ok => 0,
            ResultCode::InternalError => 1,
            ResultCode::EncodingError => 2,
            ResultCode::UnknownVariant => 3,
            ResultCode::InvalidInput => 4,
            ResultCode::InvalidOutput => 5,
            ResultCode::InvalidSequence => 6,
            ResultCode::UnknownAccount => 7,
            ResultCode::Unauthorized => 8,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<&CodecError> for ResultCode {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::UnknownVariant { .. } => ResultCode::UnknownVariant,
            CodecError::Decode { .. } => ResultCode::EncodingError,
        }
    }
}

impl From<&TransactionError> for ResultCode {
    fn from(err: &TransactionError) -> Self {
        match err {
            TransactionError::InvalidOutput { .. } | TransactionError::EmptyOutputs => {
                ResultCode::InvalidOutput
            }
            TransactionError::InvalidInput { .. }
            | TransactionError::EmptyInputs
            | TransactionError::InvalidFee { .. }
            | TransactionError::InvalidGas { .. } => ResultCode::InvalidInput,
            TransactionError::SignatureTargetNotFound { .. }
            | TransactionError::MissingSignature { .. }
            | TransactionError::InvalidSignature { .. } => ResultCode::Unauthorized,
            TransactionError::TooLarge { .. } => ResultCode::EncodingError,
            TransactionError::Codec(e) => ResultCode::from(e),
        }
    }
}

impl From<&AgreementError> for ResultCode {
    fn from(err: &AgreementError) -> Self {
        match err {
            AgreementError::InvalidDocument { .. } => ResultCode::EncodingError,
            AgreementError::UnknownPolicy { .. } => ResultCode::InternalError,
            AgreementError::UnknownKey { .. } | AgreementError::UnknownParticipant { .. } => {
                ResultCode::UnknownAccount
            }
            AgreementError::DocumentMismatch | AgreementError::SlotCountMismatch { .. } => {
                ResultCode::InvalidInput
            }
            AgreementError::ConflictingSignature { .. }
            | AgreementError::Incomplete { .. }
            | AgreementError::MalformedSignature { .. }
            | AgreementError::InvalidSignature { .. } => ResultCode::Unauthorized,
        }
    }
}

/// Result of `append_tx`, `check_tx` and queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub code: ResultCode,
    pub data: Vec<u8>,
    pub log: String,
}

impl TxResult {
    pub fn ok() -> Self {
        Self::ok_with_data(Vec::new())
    }

    pub fn ok_with_data(data: Vec<u8>) -> Self {
        Self {
            code: ResultCode::Ok,
            data,
            log: String::new(),
        }
    }

    pub fn error(code: ResultCode, log: impl Into<String>) -> Self {
        Self {
            code,
            data: Vec::new(),
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl fmt::Display for TxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxResult{{{} {} {}}}",
            self.code,
            hex::encode_upper(&self.data),
            self.log
        )
    }
}

impl From<CodecError> for TxResult {
    fn from(err: CodecError) -> Self {
        TxResult::error(ResultCode::from(&err), err.to_string())
    }
}

impl From<TransactionError> for TxResult {
    fn from(err: TransactionError) -> Self {
        TxResult::error(ResultCode::from(&err), err.to_string())
    }
}

impl From<AgreementError> for TxResult {
    fn from(err: AgreementError) -> Self {
        TxResult::error(ResultCode::from(&err), err.to_string())
    }
}

/// State root returned by `commit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub root: [u8; 32],
}

impl CommitResult {
    pub fn root_hex(&self) -> String {
        hex::encode_upper(self.root)
    }
}

impl fmt::Display for CommitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root_hex())
    }
}

/// A ledger application driven by a consensus engine.
pub trait LedgerApp {
    /// Name and version, for diagnostics.
    fn info(&self) -> String;

    /// Applies a configuration option. Returns [`OPTION_SUCCESS`] or a
    /// description of why the option was refused.
    fn set_option(&mut self, key: &str, value: &str) -> String;

    /// Validates and applies a tagged transaction.
    fn append_tx(&mut self, tx_bytes: &[u8]) -> TxResult;

    /// Validates a tagged transaction without applying it.
    fn check_tx(&self, tx_bytes: &[u8]) -> TxResult;

    fn commit(&mut self) -> CommitResult;
}
