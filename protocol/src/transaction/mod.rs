//! # Transaction Module
//!
//! Transaction shapes, their signable bytes, and the rules for attaching
//! signatures.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        TxInput / TxOutput
//! send.rs         SendTx, value transfer (tag 0x01)
//! app.rs          AppTx, contract invocation (tag 0x02)
//! opaque.rs       OpaqueTx, pre-encoded payload (tag 0x03)
//! agreement.rs    Multi-party agreement documents and signature slots
//! registry.rs     Tx sum type, tag table, tagged encode/decode
//! signing.rs      SignBytes trait and TxId
//! verification.rs Stateless validation and input signature checks
//! ```
//!
//! ## Signing flow
//!
//! 1. Build a transaction value.
//! 2. Compute its [`SignBytes::sign_bytes`] under the target chain id.
//! 3. Have each key holder sign those bytes.
//! 4. Attach signatures by address ([`SendTx::set_signature`]), directly
//!    ([`AppTx::set_signature`]) or by participant name
//!    ([`SignedAgreementTx::set_signature`]).
//! 5. Hand [`Tx::encode`] to the ledger.

pub mod agreement;
pub mod app;
pub mod opaque;
pub mod registry;
pub mod send;
pub mod signing;
pub mod types;
pub mod verification;

pub use agreement::{AgreementError, AgreementTx, SignedAgreementTx, VerificationPolicy};
pub use app::AppTx;
pub use opaque::OpaqueTx;
pub use registry::{Tx, TxKind};
pub use send::SendTx;
pub use signing::{tx_id, SignBytes, TxId};
pub use types::{TxInput, TxOutput};
pub use verification::{verify_input_signature, TransactionError};
