//! # Agreement Documents
//!
//! A multi-party document that every named participant must sign. The
//! normalized trade representation is carried as opaque JSON and never
//! interpreted here; only the participant list matters for signing.
//!
//! Signatures live in a wrapper ([`SignedAgreementTx`]) as one slot per
//! participant, matched by exact name and stored as uppercase hex. Slots
//! stay unallocated until the first signature arrives. Copies of the same
//! document signed independently are combined with
//! [`SignedAgreementTx::merge`].
//!
//! Signable bytes are `encode(chain_id) || compact JSON of the document`.
//! Slots are outside the document, so attaching signatures never changes
//! what the next participant signs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error};

use super::signing::SignBytes;
use crate::codec::encode_chain_id;
use crate::crypto::{Keypair, PublicKey, Signature};

/// Errors raised while signing, merging or verifying agreement documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgreementError {
    /// The name is not in the document's participant list.
    #[error("unknown participant {name:?}")]
    UnknownParticipant { name: String },

    /// Two signed copies do not wrap the same document.
    #[error("cannot merge signatures of different documents")]
    DocumentMismatch,

    /// Both copies carry different signatures for the same participant.
    #[error("conflicting signatures for participant {name:?}")]
    ConflictingSignature { name: String },

    #[error("missing signatures from {missing:?}")]
    Incomplete { missing: Vec<String> },

    #[error("document has {expected} participants but {actual} signature slots")]
    SlotCountMismatch { expected: usize, actual: usize },

    #[error("malformed signature for {name:?}: {reason}")]
    MalformedSignature { name: String, reason: String },

    /// No public key is registered for the participant.
    #[error("no public key registered for {name:?}")]
    UnknownKey { name: String },

    #[error("signature of {name:?} does not verify")]
    InvalidSignature { name: String },

    #[error("invalid agreement document: {reason}")]
    InvalidDocument { reason: String },

    #[error("unknown verification policy {value:?}")]
    UnknownPolicy { value: String },
}

/// How much a ledger checks before accepting a signed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPolicy {
    /// Every slot is populated; contents are not checked.
    #[serde(alias = "presence")]
    PresenceOnly,
    /// Every slot decodes and verifies against the participant's key.
    #[default]
    Cryptographic,
}

impl FromStr for VerificationPolicy {
    type Err = AgreementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" | "presence-only" | "presenceonly" => Ok(Self::PresenceOnly),
            "cryptographic" | "crypto" => Ok(Self::Cryptographic),
            _ => Err(AgreementError::UnknownPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PresenceOnly => write!(f, "presence"),
            Self::Cryptographic => write!(f, "cryptographic"),
        }
    }
}

/// The document every participant signs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgreementTx {
    /// Normalized trade representation. Insignificant whitespace is
    /// stripped on the way in; key order and number text are kept.
    #[serde(
        rename = "cobaltNormalisedRepresentation",
        alias = "cobaltNormalizedRepresentation",
        deserialize_with = "compact_raw"
    )]
    pub normalized: Box<RawValue>,
    /// Per-participant encrypted copies of the trade.
    #[serde(rename = "cipherText", default)]
    pub cipher_text: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl AgreementTx {
    /// Builds a document from a JSON value. The value is stored in compact
    /// form.
    pub fn new(
        normalized: &serde_json::Value,
        cipher_text: Vec<String>,
        participants: Vec<String>,
    ) -> Result<Self, AgreementError> {
        let normalized = serde_json::value::to_raw_value(normalized).map_err(|e| {
            AgreementError::InvalidDocument {
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            normalized,
            cipher_text,
            participants,
        })
    }

    /// The normalized representation as compact JSON text.
    pub fn normalized_json(&self) -> &str {
        self.normalized.get()
    }

    pub fn participant_index(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == name)
    }

    /// Same bytes as `serde_json::to_vec(self)`, assembled from parts
    /// whose rendering cannot fail.
    fn to_compact_json(&self) -> Vec<u8> {
        let cipher_text = Value::from(self.cipher_text.clone()).to_string();
        let participants = Value::from(self.participants.clone()).to_string();
        format!(
            r#"{{"cobaltNormalisedRepresentation":{},"cipherText":{},"participants":{}}}"#,
            self.normalized.get(),
            cipher_text,
            participants
        )
        .into_bytes()
    }
}

fn compact_raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Box<RawValue>, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    RawValue::from_string(compact_json(raw.get())).map_err(serde::de::Error::custom)
}

/// Drops whitespace between JSON tokens. `json` must already be valid.
fn compact_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if !matches!(c, ' ' | '\t' | '\n' | '\r') {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }
    out
}

impl PartialEq for AgreementTx {
    fn eq(&self, other: &Self) -> bool {
        self.normalized.get() == other.normalized.get()
            && self.cipher_text == other.cipher_text
            && self.participants == other.participants
    }
}

impl Eq for AgreementTx {}

impl SignBytes for AgreementTx {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        let mut bytes = encode_chain_id(chain_id);
        bytes.extend_from_slice(&self.to_compact_json());
        debug!(chain_id, len = bytes.len(), "computed agreement sign bytes");
        bytes
    }
}

/// An agreement document plus one signature slot per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAgreementTx {
    /// Uppercase hex signatures, empty string for an unsigned slot. Empty
    /// vector until the first signature is attached.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub signatures: Vec<String>,
    pub transaction: AgreementTx,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SignedAgreementTx {
    pub fn new(transaction: AgreementTx) -> Self {
        Self {
            signatures: Vec::new(),
            transaction,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AgreementError> {
        serde_json::from_str(json).map_err(|e| AgreementError::InvalidDocument {
            reason: e.to_string(),
        })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, AgreementError> {
        serde_json::from_slice(bytes).map_err(|e| AgreementError::InvalidDocument {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, AgreementError> {
        serde_json::to_string(self).map_err(|e| AgreementError::InvalidDocument {
            reason: e.to_string(),
        })
    }

    pub fn participants(&self) -> &[String] {
        &self.transaction.participants
    }

    /// Slots must be unallocated or exactly one per participant.
    fn check_slots(&self) -> Result<(), AgreementError> {
        let expected = self.transaction.participants.len();
        let actual = self.signatures.len();
        if actual != 0 && actual != expected {
            return Err(AgreementError::SlotCountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Stores `signature` in `participant`'s slot, allocating slots on first
    /// use. Overwrites any earlier signature for the same participant.
    ///
    /// A name that is not a participant is refused with
    /// [`AgreementError::UnknownParticipant`] and nothing changes. Callers
    /// should abort the signing flow on that error.
    pub fn set_signature(
        &mut self,
        participant: &str,
        signature: &Signature,
    ) -> Result<(), AgreementError> {
        let Some(index) = self.transaction.participant_index(participant) else {
            error!(
                participant,
                participants = ?self.transaction.participants,
                "signature for unknown participant"
            );
            return Err(AgreementError::UnknownParticipant {
                name: participant.to_string(),
            });
        };
        self.check_slots()?;
        if self.signatures.is_empty() {
            self.signatures = vec![String::new(); self.transaction.participants.len()];
        }
        self.signatures[index] = signature.to_hex();
        debug!(participant, index, "agreement signature attached");
        Ok(())
    }

    /// Signs the document as `participant` and stores the signature.
    pub fn sign(
        &mut self,
        chain_id: &str,
        participant: &str,
        keypair: &Keypair,
    ) -> Result<(), AgreementError> {
        let signature = keypair.sign(&self.sign_bytes(chain_id));
        self.set_signature(participant, &signature)
    }

    /// The hex signature in `participant`'s slot, if populated.
    pub fn signature_of(&self, participant: &str) -> Option<&str> {
        let index = self.transaction.participant_index(participant)?;
        self.signatures
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Participants whose slot is empty or unallocated, in document order.
    pub fn missing_participants(&self) -> Vec<&str> {
        self.transaction
            .participants
            .iter()
            .enumerate()
            .filter(|(i, _)| self.signatures.get(*i).map_or(true, String::is_empty))
            .map(|(_, name)| name.as_str())
            .collect()
    }

    pub fn is_fully_signed(&self) -> bool {
        self.check_slots().is_ok() && self.missing_participants().is_empty()
    }

    /// Folds the slots of another copy of the same document into this one.
    ///
    /// `a.merge(&b)` and `b.merge(&a)` leave equal values. On error `self`
    /// is unchanged.
    pub fn merge(&mut self, other: &SignedAgreementTx) -> Result<(), AgreementError> {
        if self.transaction != other.transaction {
            return Err(AgreementError::DocumentMismatch);
        }
        self.check_slots()?;
        other.check_slots()?;
        if other.signatures.is_empty() {
            return Ok(());
        }
        if self.signatures.is_empty() {
            self.signatures = other.signatures.clone();
            return Ok(());
        }

        let mut merged = Vec::with_capacity(self.signatures.len());
        for (i, (ours, theirs)) in self.signatures.iter().zip(&other.signatures).enumerate() {
            let slot = match (ours.is_empty(), theirs.is_empty()) {
                (_, true) => ours.clone(),
                (true, false) => theirs.clone(),
                (false, false) if ours.eq_ignore_ascii_case(theirs) => ours.to_ascii_uppercase(),
                (false, false) => {
                    return Err(AgreementError::ConflictingSignature {
                        name: self.transaction.participants[i].clone(),
                    })
                }
            };
            merged.push(slot);
        }
        self.signatures = merged;
        Ok(())
    }

    /// Checks the slots under `policy`. `key_of` resolves a participant
    /// name to its registered public key.
    pub fn verify<F>(
        &self,
        chain_id: &str,
        policy: VerificationPolicy,
        key_of: F,
    ) -> Result<(), AgreementError>
    where
        F: Fn(&str) -> Option<PublicKey>,
    {
        self.check_slots()?;
        let missing = self.missing_participants();
        if !missing.is_empty() {
            return Err(AgreementError::Incomplete {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        if policy == VerificationPolicy::PresenceOnly {
            return Ok(());
        }

        let sign_bytes = self.sign_bytes(chain_id);
        for (name, slot) in self.transaction.participants.iter().zip(&self.signatures) {
            let signature =
                Signature::from_hex(slot).map_err(|e| AgreementError::MalformedSignature {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let key = key_of(name).ok_or_else(|| AgreementError::UnknownKey { name: name.clone() })?;
            if !key.verify(&sign_bytes, &signature) {
                return Err(AgreementError::InvalidSignature { name: name.clone() });
            }
        }
        Ok(())
    }
}

impl SignBytes for SignedAgreementTx {
    fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        self.transaction.sign_bytes(chain_id)
    }
}

impl fmt::Display for SignedAgreementTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signed = self.participants().len() - self.missing_participants().len();
        write!(
            f,
            "SignedAgreementTx{{[{}] {}/{} signed}}",
            self.participants().join(", "),
            signed,
            self.participants().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CHAIN_ID, SIGNATURE_HEX_LENGTH};
    use crate::transaction::signing::tx_id;
    use serde_json::json;
    use std::collections::BTreeMap;

    const SAMPLE: &str = r#"{
      "signatures": [
        "304502210098c69c3daf1eb17928c5c9b4b72b0c3b5dc3a1aa30bb15c8c372e086ebb04caa",
        "3043021f2c0e73f6711935a2b0c6d7a6adb250851942e65472dfb3d16bd4fe7d67400f0220"
      ],
      "transaction": {
        "cobaltNormalisedRepresentation": {
          "entityA": "Citibank",
          "entityB": "Deutsche Bank",
          "product": "FX Spot",
          "currencyPair": "EURUSD",
          "quantity1": 1000000,
          "rate": "1.0965"
        },
        "cipherText": ["04d69f6f", "0448d2f1"],
        "participants": ["Citibank", "Deutsche Bank"]
      }
    }"#;

    fn trade() -> AgreementTx {
        AgreementTx::new(
            &json!({"product": "FX Spot", "currencyPair": "EURUSD", "quantity1": 1000000}),
            vec!["aa".into(), "bb".into()],
            vec!["Citibank".into(), "Deutsche Bank".into()],
        )
        .unwrap()
    }

    fn keys() -> (Keypair, Keypair) {
        (Keypair::from_secret("citi"), Keypair::from_secret("deutsche"))
    }

    fn registry(citi: &Keypair, db: &Keypair) -> BTreeMap<String, PublicKey> {
        BTreeMap::from([
            ("Citibank".to_string(), citi.public_key()),
            ("Deutsche Bank".to_string(), db.public_key()),
        ])
    }

    #[test]
    fn parses_document_json() {
        let doc = SignedAgreementTx::from_json(SAMPLE).unwrap();
        assert_eq!(doc.participants(), ["Citibank", "Deutsche Bank"]);
        assert_eq!(doc.transaction.cipher_text.len(), 2);
        assert!(doc.transaction.normalized_json().contains("FX Spot"));
        assert!(doc.is_fully_signed());
    }

    #[test]
    fn accepts_american_spelling_and_null_signatures() {
        let json = r#"{"signatures": null, "transaction": {
            "cobaltNormalizedRepresentation": {"id": 1},
            "cipherText": [], "participants": ["A"]}}"#;
        let doc = SignedAgreementTx::from_json(json).unwrap();
        assert!(doc.signatures.is_empty());
        assert_eq!(doc.transaction.normalized_json(), r#"{"id":1}"#);

        let absent = r#"{"transaction": {"cobaltNormalisedRepresentation": {},
            "participants": ["A"]}}"#;
        let doc = SignedAgreementTx::from_json(absent).unwrap();
        assert!(doc.signatures.is_empty());
        assert_eq!(doc.missing_participants(), vec!["A"]);
    }

    #[test]
    fn formatting_does_not_change_identity() {
        let pretty = r#"{"transaction": {
            "cobaltNormalisedRepresentation": {
                "rate" : "1.0965",
                "note": "two  spaces, a \"quote\" and a \\ slash",
                "legs": [ 1, 2.50 ]
            },
            "cipherText": ["aa"],
            "participants": ["Citibank", "Deutsche Bank"]}}"#;
        let compact = r#"{"transaction":{"cobaltNormalisedRepresentation":{"rate":"1.0965","note":"two  spaces, a \"quote\" and a \\ slash","legs":[1,2.50]},"cipherText":["aa"],"participants":["Citibank","Deutsche Bank"]}}"#;

        let mut a = SignedAgreementTx::from_json(pretty).unwrap();
        let b = SignedAgreementTx::from_json(compact).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.transaction.normalized_json(),
            r#"{"rate":"1.0965","note":"two  spaces, a \"quote\" and a \\ slash","legs":[1,2.50]}"#
        );
        assert_eq!(a.sign_bytes(DEFAULT_CHAIN_ID), b.sign_bytes(DEFAULT_CHAIN_ID));
        assert_eq!(tx_id(DEFAULT_CHAIN_ID, &a), tx_id(DEFAULT_CHAIN_ID, &b));

        let (citi, db) = keys();
        a.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
        let mut b = b;
        b.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &db).unwrap();
        a.merge(&b).unwrap();
        assert!(a
            .verify(
                DEFAULT_CHAIN_ID,
                VerificationPolicy::Cryptographic,
                |name| registry(&citi, &db).get(name).copied()
            )
            .is_ok());
    }

    #[test]
    fn sign_bytes_match_serde_rendering() {
        let doc = SignedAgreementTx::from_json(SAMPLE).unwrap();
        let mut expected = encode_chain_id(DEFAULT_CHAIN_ID);
        expected.extend(serde_json::to_vec(&doc.transaction).unwrap());
        assert_eq!(doc.sign_bytes(DEFAULT_CHAIN_ID), expected);
    }

    #[test]
    fn serializes_with_british_field_name() {
        let json = SignedAgreementTx::new(trade()).to_json().unwrap();
        assert!(json.contains("\"cobaltNormalisedRepresentation\""));
        assert!(json.contains("\"cipherText\""));
    }

    #[test]
    fn signatures_land_in_named_slots() {
        let (citi, db) = keys();
        let mut doc = SignedAgreementTx::new(trade());
        doc.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &db).unwrap();

        assert_eq!(doc.signatures.len(), 2);
        assert_eq!(doc.signatures[0], "");
        assert_eq!(doc.signatures[1].len(), SIGNATURE_HEX_LENGTH);
        assert_eq!(doc.signatures[1], doc.signatures[1].to_uppercase());
        assert_eq!(doc.missing_participants(), vec!["Citibank"]);
        assert!(!doc.is_fully_signed());

        doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
        assert!(doc.is_fully_signed());
        assert!(doc.signature_of("Citibank").is_some());
    }

    #[test]
    fn unknown_participant_is_rejected_without_change() {
        let (citi, _) = keys();
        let mut doc = SignedAgreementTx::new(trade());
        let sig = citi.sign(b"x");
        let err = doc.set_signature("citibank", &sig).unwrap_err();
        assert_eq!(
            err,
            AgreementError::UnknownParticipant {
                name: "citibank".into()
            }
        );
        assert!(doc.signatures.is_empty());
    }

    #[test]
    fn setting_same_slot_twice_overwrites() {
        let (citi, _) = keys();
        let mut doc = SignedAgreementTx::new(trade());
        doc.set_signature("Citibank", &citi.sign(b"1")).unwrap();
        let second = citi.sign(b"2");
        doc.set_signature("Citibank", &second).unwrap();
        assert_eq!(doc.signature_of("Citibank"), Some(second.to_hex().as_str()));
    }

    #[test]
    fn sign_bytes_ignore_slots() {
        let (citi, _) = keys();
        let mut doc = SignedAgreementTx::new(trade());
        let before = doc.sign_bytes(DEFAULT_CHAIN_ID);
        doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
        assert_eq!(before, doc.sign_bytes(DEFAULT_CHAIN_ID));
        assert_eq!(tx_id(DEFAULT_CHAIN_ID, &doc), tx_id(DEFAULT_CHAIN_ID, &doc.transaction));
    }

    #[test]
    fn merge_is_commutative() {
        let (citi, db) = keys();
        let mut a = SignedAgreementTx::new(trade());
        a.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
        let mut b = SignedAgreementTx::new(trade());
        b.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &db).unwrap();

        let mut ab = a.clone();
        ab.merge(&b).unwrap();
        let mut ba = b.clone();
        ba.merge(&a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab.is_fully_signed());
    }

    #[test]
    fn merge_rejects_conflicts_and_other_documents() {
        let (citi, _) = keys();
        let mut a = SignedAgreementTx::new(trade());
        a.set_signature("Citibank", &citi.sign(b"1")).unwrap();
        let mut b = SignedAgreementTx::new(trade());
        b.set_signature("Citibank", &citi.sign(b"2")).unwrap();

        let snapshot = a.clone();
        assert_eq!(
            a.merge(&b),
            Err(AgreementError::ConflictingSignature {
                name: "Citibank".into()
            })
        );
        assert_eq!(a, snapshot);

        let mut other = trade();
        other.participants.pop();
        assert_eq!(
            a.merge(&SignedAgreementTx::new(other)),
            Err(AgreementError::DocumentMismatch)
        );
    }

    #[test]
    fn presence_policy_only_counts_slots() {
        let doc = SignedAgreementTx::from_json(SAMPLE).unwrap();
        assert!(doc
            .verify(DEFAULT_CHAIN_ID, VerificationPolicy::PresenceOnly, |_| None)
            .is_ok());

        let mut partial = doc.clone();
        partial.signatures[1].clear();
        assert_eq!(
            partial.verify(DEFAULT_CHAIN_ID, VerificationPolicy::PresenceOnly, |_| None),
            Err(AgreementError::Incomplete {
                missing: vec!["Deutsche Bank".into()]
            })
        );
    }

    #[test]
    fn cryptographic_policy_checks_every_slot() {
        let (citi, db) = keys();
        let keys = registry(&citi, &db);
        let lookup = |name: &str| keys.get(name).copied();

        let mut doc = SignedAgreementTx::new(trade());
        doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
        doc.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &db).unwrap();
        assert!(doc
            .verify(DEFAULT_CHAIN_ID, VerificationPolicy::Cryptographic, lookup)
            .is_ok());

        assert!(matches!(
            doc.verify("other_chain", VerificationPolicy::Cryptographic, lookup),
            Err(AgreementError::InvalidSignature { .. })
        ));

        let mut swapped = doc.clone();
        swapped.signatures.swap(0, 1);
        assert_eq!(
            swapped.verify(DEFAULT_CHAIN_ID, VerificationPolicy::Cryptographic, lookup),
            Err(AgreementError::InvalidSignature {
                name: "Citibank".into()
            })
        );

        assert_eq!(
            doc.verify(DEFAULT_CHAIN_ID, VerificationPolicy::Cryptographic, |_| None),
            Err(AgreementError::UnknownKey {
                name: "Citibank".into()
            })
        );
    }

    #[test]
    fn cryptographic_policy_rejects_malformed_slots() {
        let doc = SignedAgreementTx::from_json(SAMPLE).unwrap();
        assert!(matches!(
            doc.verify(DEFAULT_CHAIN_ID, VerificationPolicy::default(), |_| None),
            Err(AgreementError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn slot_count_mismatch_is_reported() {
        let mut doc = SignedAgreementTx::new(trade());
        doc.signatures = vec!["AB".into()];
        assert_eq!(
            doc.verify(DEFAULT_CHAIN_ID, VerificationPolicy::PresenceOnly, |_| None),
            Err(AgreementError::SlotCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        let (citi, _) = keys();
        assert!(doc.set_signature("Citibank", &citi.sign(b"x")).is_err());
    }

    #[test]
    fn policy_parses_from_option_values() {
        assert_eq!("presence".parse::<VerificationPolicy>(), Ok(VerificationPolicy::PresenceOnly));
        assert_eq!("Cryptographic".parse::<VerificationPolicy>(), Ok(VerificationPolicy::Cryptographic));
        assert!("strict".parse::<VerificationPolicy>().is_err());
        assert_eq!(VerificationPolicy::default(), VerificationPolicy::Cryptographic);
    }
}
