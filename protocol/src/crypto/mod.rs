//! # Cryptographic Primitives
//!
//! Thin, typed wrappers around audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for every signature.
//! - **SHA-256** (`sha2`) and **RIPEMD-160** (`ripemd`) for addresses,
//!   transaction IDs, and state roots.

pub mod hash;
pub mod keys;

pub use hash::{hash160, ripemd160, sha256, sha256_multi};
pub use keys::{KeyError, Keypair, PublicKey, Signature};
