//! Ledger accounts and the demo key material that owns them.

use serde::{Deserialize, Serialize};

use cobalt_protocol::codec::{WireEncode, Writer};
use cobalt_protocol::crypto::{Keypair, PublicKey, Signature};
use cobalt_protocol::types::Address;

/// An account as the reference ledger stores it. Seeded through the
/// `base/account` option as JSON, or registered by an address's first
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Set for agreement participants; the name their slot is matched by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pub_key: PublicKey,
    /// Last committed sequence. The next input must carry `sequence + 1`.
    #[serde(default)]
    pub sequence: i64,
}

impl Account {
    pub fn new(pub_key: PublicKey) -> Self {
        Self {
            name: None,
            pub_key,
            sequence: 0,
        }
    }

    pub fn named(name: impl Into<String>, pub_key: PublicKey) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(pub_key)
        }
    }

    pub fn address(&self) -> Address {
        self.pub_key.address()
    }
}

impl WireEncode for Account {
    fn encode_to(&self, w: &mut Writer) {
        w.write_option(self.name.as_ref(), |w, name| w.write_str(name));
        w.write_bytes(self.pub_key.as_bytes());
        w.write_i64(self.sequence);
    }
}

/// An account together with its signing key.
#[derive(Debug, Clone)]
pub struct PrivAccount {
    pub keypair: Keypair,
    pub account: Account,
}

impl PrivAccount {
    /// Deterministic account: the key seed is SHA-256 of `secret`.
    pub fn from_secret(secret: &str) -> Self {
        Self::from_keypair(Keypair::from_secret(secret))
    }

    pub fn generate() -> Self {
        Self::from_keypair(Keypair::generate())
    }

    /// `n` fresh random accounts.
    pub fn random(n: usize) -> Vec<Self> {
        (0..n).map(|_| Self::generate()).collect()
    }

    fn from_keypair(keypair: Keypair) -> Self {
        let account = Account::new(keypair.public_key());
        Self { keypair, account }
    }

    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    pub fn pub_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.keypair.sign(message)
    }
}
