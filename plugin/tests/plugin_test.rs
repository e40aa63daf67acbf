//! Integration tests for the Cobalt agreement plugin.
//!
//! These drive the plugin the way a ledger host does: options first, then
//! opaque payloads, then queries and commits.

use cobalt_plugin::{CobaltPlugin, Participant, Plugin};
use cobalt_protocol::config::DEFAULT_CHAIN_ID;
use cobalt_protocol::crypto::Keypair;
use cobalt_protocol::ledger::ResultCode;
use cobalt_protocol::transaction::{tx_id, AgreementTx, OpaqueTx, SignedAgreementTx};
use serde_json::json;

fn banks() -> (Keypair, Keypair) {
    (Keypair::from_secret("citi"), Keypair::from_secret("deutsche"))
}

fn plugin_with(policy: &str) -> CobaltPlugin {
    let (citi, db) = banks();
    let mut plugin = CobaltPlugin::default();
    for (name, kp) in [("Citibank", &citi), ("Deutsche Bank", &db)] {
        let participant = Participant {
            name: name.to_string(),
            pub_key: kp.public_key(),
        };
        let log = plugin.set_option("participant", &serde_json::to_string(&participant).unwrap());
        assert_eq!(log, "Success");
    }
    assert_eq!(plugin.set_option("policy", policy), "Success");
    plugin
}

fn trade(id: &str) -> SignedAgreementTx {
    let doc = AgreementTx::new(
        &json!({
            "entityA": "Citibank",
            "entityB": "Deutsche Bank",
            "product": "FX Spot",
            "currencyPair": "EURUSD",
            "quantity1": 1000000,
            "rate": "1.0965",
            "id": id,
        }),
        vec!["04d69f6fcd55".into(), "0448d2f1f8ef".into()],
        vec!["Citibank".into(), "Deutsche Bank".into()],
    )
    .unwrap();
    SignedAgreementTx::new(doc)
}

fn fully_signed(id: &str) -> SignedAgreementTx {
    let (citi, db) = banks();
    let mut doc = trade(id);
    doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
    doc.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &db).unwrap();
    doc
}

fn payload(doc: &SignedAgreementTx) -> Vec<u8> {
    OpaqueTx::from_signed_agreement(doc).unwrap().bytes
}

// ---------------------------------------------------------------------------
// Acceptance
// ---------------------------------------------------------------------------

#[test]
fn accepts_fully_signed_document() {
    let mut plugin = plugin_with("cryptographic");
    let doc = fully_signed("d64cbbeb");

    let res = plugin.run_tx(&payload(&doc));
    assert!(res.is_ok(), "{}", res);
    let id = tx_id(DEFAULT_CHAIN_ID, &doc);
    assert_eq!(res.data, id.as_bytes().to_vec());
    assert_eq!(plugin.accepted_count(), 1);
    assert_eq!(plugin.document(&id), Some(&doc));
}

#[test]
fn rejects_replayed_document() {
    let mut plugin = plugin_with("cryptographic");
    let bytes = payload(&fully_signed("d64cbbeb"));
    assert!(plugin.run_tx(&bytes).is_ok());

    let replay = plugin.run_tx(&bytes);
    assert_eq!(replay.code, ResultCode::InvalidSequence);
    assert_eq!(plugin.accepted_count(), 1);
}

#[test]
fn rejects_partially_signed_document() {
    let mut plugin = plugin_with("presence");
    let (citi, _) = banks();
    let mut doc = trade("partial");
    doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();

    let res = plugin.run_tx(&payload(&doc));
    assert_eq!(res.code, ResultCode::Unauthorized);
    assert!(res.log.contains("Deutsche Bank"));
    assert_eq!(plugin.accepted_count(), 0);
}

#[test]
fn cryptographic_policy_rejects_wrong_key() {
    let mut plugin = plugin_with("cryptographic");
    let (citi, _) = banks();
    let impostor = Keypair::from_secret("not-deutsche");
    let mut doc = trade("impostor");
    doc.sign(DEFAULT_CHAIN_ID, "Citibank", &citi).unwrap();
    doc.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &impostor).unwrap();

    let res = plugin.run_tx(&payload(&doc));
    assert_eq!(res.code, ResultCode::Unauthorized);
    assert!(res.log.contains("Deutsche Bank"));
}

#[test]
fn presence_policy_accepts_any_populated_slots() {
    let mut plugin = plugin_with("presence");
    let impostor = Keypair::from_secret("anyone");
    let mut doc = trade("presence");
    doc.sign(DEFAULT_CHAIN_ID, "Citibank", &impostor).unwrap();
    doc.sign(DEFAULT_CHAIN_ID, "Deutsche Bank", &impostor).unwrap();

    assert!(plugin.run_tx(&payload(&doc)).is_ok());
}

#[test]
fn signatures_under_another_chain_fail_verification() {
    let mut plugin = plugin_with("cryptographic");
    assert_eq!(plugin.set_option("chain_id", "other_chain"), "Success");
    let res = plugin.run_tx(&payload(&fully_signed("chain")));
    assert_eq!(res.code, ResultCode::Unauthorized);
}

#[test]
fn rejects_non_document_payload() {
    let mut plugin = plugin_with("cryptographic");
    let res = plugin.run_tx(b"\x00\x01not json");
    assert_eq!(res.code, ResultCode::EncodingError);
}

#[test]
fn check_tx_does_not_record() {
    let plugin = plugin_with("cryptographic");
    let bytes = payload(&fully_signed("check"));
    assert!(plugin.check_tx(&bytes).is_ok());
    assert!(plugin.check_tx(&bytes).is_ok());
    assert_eq!(plugin.accepted_count(), 0);
}

// ---------------------------------------------------------------------------
// Query & Commit
// ---------------------------------------------------------------------------

#[test]
fn query_returns_stored_document() {
    let mut plugin = plugin_with("cryptographic");
    let doc = fully_signed("query");
    let id = tx_id(DEFAULT_CHAIN_ID, &doc);
    plugin.run_tx(&payload(&doc));

    let res = plugin.query(id.to_hex().as_bytes());
    assert!(res.is_ok());
    let stored = SignedAgreementTx::from_json_slice(&res.data).unwrap();
    assert_eq!(stored, doc);

    let missing = plugin.query(&[0u8; 20]);
    assert!(missing.is_err());
}

#[test]
fn commit_root_is_order_independent() {
    let first = payload(&fully_signed("one"));
    let second = payload(&fully_signed("two"));

    let mut a = plugin_with("cryptographic");
    a.run_tx(&first);
    a.run_tx(&second);

    let mut b = plugin_with("cryptographic");
    b.run_tx(&second);
    b.run_tx(&first);

    let mut empty = plugin_with("cryptographic");
    assert_eq!(a.commit(), b.commit());
    assert_ne!(a.commit(), empty.commit());
}
