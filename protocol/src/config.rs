//! # Protocol Configuration & Constants
//!
//! Wire tags, key and address sizes, decode limits, and the option keys the
//! ledger boundary understands. Tag values are part of the wire format and
//! must never be renumbered.

// ---------------------------------------------------------------------------
// Wire Tags
// ---------------------------------------------------------------------------

/// Tag byte of a value-transfer transaction ([`crate::transaction::SendTx`]).
pub const TX_TYPE_SEND: u8 = 0x01;

/// Tag byte of a contract-invocation transaction ([`crate::transaction::AppTx`]).
pub const TX_TYPE_APP: u8 = 0x02;

/// Tag byte of an opaque pre-encoded transaction
/// ([`crate::transaction::OpaqueTx`]), used to carry a serialized signed
/// agreement document.
pub const TX_TYPE_OPAQUE: u8 = 0x03;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 for every signature in the system.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Ed25519 secret key (seed) length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of an agreement signature slot once filled: uppercase hex of the
/// signature bytes.
pub const SIGNATURE_HEX_LENGTH: usize = SIGNATURE_LENGTH * 2;

/// Addresses are RIPEMD-160 digests: 20 bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Transaction IDs are RIPEMD-160 digests of the signable bytes.
pub const TX_ID_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Chain identifier used by the test harness and by tests. Every signable
/// byte sequence is prefixed with the encoded chain identifier, so a
/// signature produced for one chain never verifies on another.
pub const DEFAULT_CHAIN_ID: &str = "test_chain_id";

// ---------------------------------------------------------------------------
// Decode Limits
// ---------------------------------------------------------------------------

/// Maximum encoded transaction size accepted by the decoder.
pub const MAX_TX_SIZE_BYTES: usize = 256 * 1024;

/// Maximum number of inputs in a [`crate::transaction::SendTx`].
pub const MAX_TX_INPUTS: usize = 256;

/// Maximum number of outputs in a [`crate::transaction::SendTx`].
pub const MAX_TX_OUTPUTS: usize = 256;

/// Maximum number of coin entries in a single coin set.
pub const MAX_COINS_PER_SET: usize = 64;

// ---------------------------------------------------------------------------
// Option Keys
// ---------------------------------------------------------------------------

/// Sets the chain identifier of a ledger application.
pub const OPTION_CHAIN_ID: &str = "base/chainID";

/// Seeds an account (JSON) into a ledger application.
pub const OPTION_ACCOUNT: &str = "base/account";

/// Prefix routing an option to the agreement plugin.
pub const OPTION_PLUGIN_PREFIX: &str = "cobalt/";

/// Diagnostic returned by `set_option` on success.
pub const OPTION_SUCCESS: &str = "Success";
