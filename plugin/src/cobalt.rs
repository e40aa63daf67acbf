//! # Cobalt Agreement Plugin
//!
//! Accepts signed agreement documents carried as opaque transactions.
//!
//! ## Options
//!
//! | key           | value                                   |
//! |---------------|-----------------------------------------|
//! | `participant` | JSON `{"name": ..., "pub_key": "<hex>"}` |
//! | `policy`      | `presence` or `cryptographic`           |
//! | `chain_id`    | chain identifier the documents sign      |
//!
//! ## Acceptance
//!
//! 1. The payload parses as a signed agreement document.
//! 2. Its ID (RIPEMD-160 of the signable bytes) was not accepted before.
//! 3. Its slots pass the configured [`VerificationPolicy`] against the
//!    registered participant keys.
//!
//! Accepted documents are kept by ID and folded into the commit root in
//! ID order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use cobalt_protocol::config::{DEFAULT_CHAIN_ID, OPTION_SUCCESS, TX_ID_LENGTH};
use cobalt_protocol::crypto::{sha256_multi, PublicKey};
use cobalt_protocol::ledger::{CommitResult, ResultCode, TxResult};
use cobalt_protocol::transaction::{tx_id, AgreementError, SignedAgreementTx, TxId, VerificationPolicy};

use crate::Plugin;

pub const OPTION_PARTICIPANT: &str = "participant";
pub const OPTION_POLICY: &str = "policy";
pub const OPTION_CHAIN_ID: &str = "chain_id";

/// Errors raised while configuring or querying the plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Unrecognized option key {key:?}")]
    UnknownOption { key: String },

    #[error("invalid participant: {0}")]
    InvalidParticipant(#[from] serde_json::Error),

    #[error("participant name must not be empty")]
    EmptyParticipantName,

    #[error(transparent)]
    Agreement(#[from] AgreementError),

    #[error("chain id must not be empty")]
    EmptyChainId,

    #[error("invalid document id {0:?}")]
    InvalidDocumentId(String),
}

/// A named signer and the key its signatures must verify under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub pub_key: PublicKey,
}

#[derive(Debug)]
pub struct CobaltPlugin {
    chain_id: String,
    policy: VerificationPolicy,
    participants: BTreeMap<String, PublicKey>,
    accepted: BTreeMap<TxId, SignedAgreementTx>,
}

impl Default for CobaltPlugin {
    fn default() -> Self {
        Self::new(DEFAULT_CHAIN_ID)
    }
}

impl CobaltPlugin {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            policy: VerificationPolicy::default(),
            participants: BTreeMap::new(),
            accepted: BTreeMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: VerificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn policy(&self) -> VerificationPolicy {
        self.policy
    }

    /// Registers or replaces the key for `name`.
    pub fn register_participant(&mut self, participant: Participant) -> Result<(), PluginError> {
        if participant.name.is_empty() {
            return Err(PluginError::EmptyParticipantName);
        }
        info!(
            name = %participant.name,
            pub_key = %participant.pub_key,
            "participant registered"
        );
        self.participants.insert(participant.name, participant.pub_key);
        Ok(())
    }

    pub fn participant_key(&self, name: &str) -> Option<PublicKey> {
        self.participants.get(name).copied()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn document(&self, id: &TxId) -> Option<&SignedAgreementTx> {
        self.accepted.get(id)
    }

    fn apply_option(&mut self, key: &str, value: &str) -> Result<(), PluginError> {
        match key {
            OPTION_PARTICIPANT => {
                let participant: Participant = serde_json::from_str(value)?;
                self.register_participant(participant)
            }
            OPTION_POLICY => {
                self.policy = value.parse()?;
                info!(policy = %self.policy, "verification policy set");
                Ok(())
            }
            OPTION_CHAIN_ID => {
                if value.is_empty() {
                    return Err(PluginError::EmptyChainId);
                }
                self.chain_id = value.to_string();
                Ok(())
            }
            _ => Err(PluginError::UnknownOption {
                key: key.to_string(),
            }),
        }
    }

    /// Parses and checks a payload. Returns the document and its ID.
    fn admit(&self, tx_bytes: &[u8]) -> Result<(TxId, SignedAgreementTx), TxResult> {
        let doc = SignedAgreementTx::from_json_slice(tx_bytes).map_err(TxResult::from)?;
        let id = tx_id(&self.chain_id, &doc);
        if self.accepted.contains_key(&id) {
            return Err(TxResult::error(
                ResultCode::InvalidSequence,
                format!("document {} already accepted", id),
            ));
        }
        doc.verify(&self.chain_id, self.policy, |name| self.participant_key(name))
            .map_err(TxResult::from)?;
        Ok((id, doc))
    }
}

fn parse_document_id(query: &[u8]) -> Result<TxId, PluginError> {
    if query.len() == TX_ID_LENGTH {
        let mut id = [0u8; TX_ID_LENGTH];
        id.copy_from_slice(query);
        return Ok(TxId(id));
    }
    let text = String::from_utf8_lossy(query);
    let bytes = hex::decode(text.trim())
        .map_err(|_| PluginError::InvalidDocumentId(text.to_string()))?;
    let id: [u8; TX_ID_LENGTH] = bytes
        .try_into()
        .map_err(|_| PluginError::InvalidDocumentId(text.to_string()))?;
    Ok(TxId(id))
}

impl Plugin for CobaltPlugin {
    fn name(&self) -> &str {
        "cobalt"
    }

    fn set_option(&mut self, key: &str, value: &str) -> String {
        match self.apply_option(key, value) {
            Ok(()) => OPTION_SUCCESS.to_string(),
            Err(e) => {
                warn!(key, error = %e, "option refused");
                e.to_string()
            }
        }
    }

    fn run_tx(&mut self, tx_bytes: &[u8]) -> TxResult {
        match self.admit(tx_bytes) {
            Ok((id, doc)) => {
                info!(
                    %id,
                    participants = ?doc.participants(),
                    "agreement document accepted"
                );
                self.accepted.insert(id, doc);
                TxResult::ok_with_data(id.as_bytes().to_vec())
            }
            Err(res) => {
                warn!(code = %res.code, log = %res.log, "agreement document rejected");
                res
            }
        }
    }

    fn check_tx(&self, tx_bytes: &[u8]) -> TxResult {
        match self.admit(tx_bytes) {
            Ok((id, _)) => TxResult::ok_with_data(id.as_bytes().to_vec()),
            Err(res) => res,
        }
    }

    fn query(&self, query: &[u8]) -> TxResult {
        let id = match parse_document_id(query) {
            Ok(id) => id,
            Err(e) => return TxResult::error(ResultCode::EncodingError, e.to_string()),
        };
        let Some(doc) = self.accepted.get(&id) else {
            return TxResult::error(ResultCode::InvalidInput, format!("no document {}", id));
        };
        match doc.to_json() {
            Ok(json) => TxResult::ok_with_data(json.into_bytes()),
            Err(e) => TxResult::error(ResultCode::InternalError, e.to_string()),
        }
    }

    fn commit(&mut self) -> CommitResult {
        let ids: Vec<&[u8]> = self.accepted.keys().map(|id| &id.as_bytes()[..]).collect();
        let root = sha256_multi(&ids);
        debug!(documents = ids.len(), root = %hex::encode_upper(root), "cobalt plugin commit");
        CommitResult { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobalt_protocol::crypto::Keypair;

    fn participant_json(name: &str, kp: &Keypair) -> String {
        serde_json::to_string(&Participant {
            name: name.to_string(),
            pub_key: kp.public_key(),
        })
        .unwrap()
    }

    #[test]
    fn options_configure_the_plugin() {
        let mut plugin = CobaltPlugin::default();
        let citi = Keypair::from_secret("citi");

        assert_eq!(plugin.set_option("participant", &participant_json("Citibank", &citi)), "Success");
        assert_eq!(plugin.participant_key("Citibank"), Some(citi.public_key()));

        assert_eq!(plugin.set_option("policy", "presence"), "Success");
        assert_eq!(plugin.policy(), VerificationPolicy::PresenceOnly);

        assert_eq!(plugin.set_option("chain_id", "other"), "Success");
        assert_eq!(plugin.chain_id(), "other");
    }

    #[test]
    fn bad_options_return_diagnostics() {
        let mut plugin = CobaltPlugin::default();
        assert!(plugin.set_option("admin", "x").contains("Unrecognized option key"));
        assert!(plugin.set_option("participant", "{not json").starts_with("invalid participant"));
        assert!(plugin.set_option("policy", "strict").contains("unknown verification policy"));
        assert_ne!(plugin.set_option("chain_id", ""), "Success");
        assert_eq!(plugin.policy(), VerificationPolicy::Cryptographic);
    }

    #[test]
    fn document_ids_parse_from_hex_or_raw_bytes() {
        let id = TxId([0xab; TX_ID_LENGTH]);
        assert_eq!(parse_document_id(id.to_hex().as_bytes()).unwrap(), id);
        assert_eq!(parse_document_id(&[0xab; TX_ID_LENGTH]).unwrap(), id);
        assert!(parse_document_id(b"zz").is_err());
    }

    #[test]
    fn empty_commit_is_stable() {
        let mut a = CobaltPlugin::default();
        let mut b = CobaltPlugin::new("elsewhere");
        assert_eq!(a.commit(), b.commit());
    }
}
