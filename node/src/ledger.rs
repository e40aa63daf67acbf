//! # Reference Ledger
//!
//! An in-memory [`LedgerApp`] that enforces the authorization rules for
//! single-party transactions and hands opaque payloads to a plugin.
//!
//! ## Send / App transactions
//!
//! 1. Decode the tagged bytes and run `validate_basic`.
//! 2. For each input, resolve the account. An unknown address may register
//!    on its first transaction: sequence 1, public key present, and the key
//!    hashes to the address.
//! 3. The input's sequence must be exactly one past the account's.
//! 4. The input's signature must verify under the account key over the
//!    chain's signable bytes.
//! 5. Only when every input passes are the sequences bumped.
//!
//! Balances and app payloads are not interpreted.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use cobalt_plugin::{CobaltPlugin, Participant, Plugin};
use cobalt_protocol::codec::{WireEncode, Writer};
use cobalt_protocol::config::{
    DEFAULT_CHAIN_ID, OPTION_ACCOUNT, OPTION_CHAIN_ID, OPTION_PLUGIN_PREFIX, OPTION_SUCCESS,
};
use cobalt_protocol::crypto::sha256_multi;
use cobalt_protocol::ledger::{CommitResult, LedgerApp, ResultCode, TxResult};
use cobalt_protocol::transaction::{verify_input_signature, SignBytes, Tx, TxInput};
use cobalt_protocol::types::Address;

use crate::account::Account;

pub struct MemLedger<P: Plugin = CobaltPlugin> {
    chain_id: String,
    accounts: BTreeMap<Address, Account>,
    plugin: P,
    tx_count: u64,
}

impl Default for MemLedger<CobaltPlugin> {
    fn default() -> Self {
        Self::new(CobaltPlugin::default())
    }
}

impl<P: Plugin> MemLedger<P> {
    pub fn new(plugin: P) -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            accounts: BTreeMap::new(),
            plugin,
            tx_count: 0,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn tx_count(&self) -> u64 {
        self.tx_count
    }

    fn seed_account(&mut self, json: &str) -> String {
        let account: Account = match serde_json::from_str(json) {
            Ok(account) => account,
            Err(e) => return format!("Error decoding account: {}", e),
        };
        if let Some(name) = &account.name {
            let participant = Participant {
                name: name.clone(),
                pub_key: account.pub_key,
            };
            match serde_json::to_string(&participant) {
                Ok(value) => {
                    let log = self.plugin.set_option("participant", &value);
                    if log != OPTION_SUCCESS {
                        return log;
                    }
                }
                Err(e) => return format!("Error encoding participant: {}", e),
            }
        }
        let address = account.address();
        info!(%address, name = ?account.name, sequence = account.sequence, "account seeded");
        self.accounts.insert(address, account);
        OPTION_SUCCESS.to_string()
    }

    /// Checks every input of a transaction against current state and
    /// returns the accounts as they would be after it.
    fn authorize_inputs(
        &self,
        inputs: &[&TxInput],
        sign_bytes: &[u8],
    ) -> Result<BTreeMap<Address, Account>, TxResult> {
        let mut updated: BTreeMap<Address, Account> = BTreeMap::new();
        for input in inputs {
            let mut account = match updated
                .get(&input.address)
                .or_else(|| self.accounts.get(&input.address))
            {
                Some(account) => account.clone(),
                None => register_from_input(input)?,
            };

            let Some(expected) = account.sequence.checked_add(1) else {
                return Err(TxResult::error(
                    ResultCode::InvalidSequence,
                    format!("sequence exhausted for {}", input.address),
                ));
            };
            if input.sequence != expected {
                return Err(TxResult::error(
                    ResultCode::InvalidSequence,
                    format!(
                        "invalid sequence for {}: expected {}, got {}",
                        input.address, expected, input.sequence
                    ),
                ));
            }
            if let Some(pub_key) = input.pub_key {
                if pub_key != account.pub_key {
                    return Err(TxResult::error(
                        ResultCode::Unauthorized,
                        format!("public key does not match account {}", input.address),
                    ));
                }
            }
            verify_input_signature(input, sign_bytes, &account.pub_key).map_err(TxResult::from)?;

            account.sequence = input.sequence;
            updated.insert(input.address.clone(), account);
        }
        Ok(updated)
    }

    /// Runs every check for `tx` without touching state.
    fn authorize(&self, tx: &Tx) -> Result<BTreeMap<Address, Account>, TxResult> {
        tx.validate_basic().map_err(TxResult::from)?;
        let sign_bytes = tx.sign_bytes(&self.chain_id);
        match tx {
            Tx::Send(send) => {
                let inputs: Vec<&TxInput> = send.inputs.iter().collect();
                self.authorize_inputs(&inputs, &sign_bytes)
            }
            Tx::App(app) => self.authorize_inputs(&[&app.input], &sign_bytes),
            Tx::Opaque(_) => Ok(BTreeMap::new()),
        }
    }

    /// Canonical encoding of the account map in address order.
    fn state_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_len(self.accounts.len());
        for (address, account) in &self.accounts {
            address.encode_to(&mut w);
            account.encode_to(&mut w);
        }
        w.into_bytes()
    }
}

/// First transaction from an address: the input must reveal the key the
/// address was derived from.
fn register_from_input(input: &TxInput) -> Result<Account, TxResult> {
    match input.pub_key {
        Some(pub_key) if input.sequence == 1 && pub_key.address() == input.address => {
            Ok(Account::new(pub_key))
        }
        Some(_) if input.sequence == 1 => Err(TxResult::error(
            ResultCode::Unauthorized,
            format!("public key does not hash to {}", input.address),
        )),
        _ => Err(TxResult::error(
            ResultCode::UnknownAccount,
            format!("unknown account {}", input.address),
        )),
    }
}

impl<P: Plugin> LedgerApp for MemLedger<P> {
    fn info(&self) -> String {
        format!(
            "cobalt-node v{} chain={} accounts={} txs={}",
            env!("CARGO_PKG_VERSION"),
            self.chain_id,
            self.accounts.len(),
            self.tx_count
        )
    }

    fn set_option(&mut self, key: &str, value: &str) -> String {
        let log = match key {
            OPTION_CHAIN_ID => {
                self.chain_id = value.to_string();
                let forwarded = self.plugin.set_option("chain_id", value);
                if forwarded != OPTION_SUCCESS {
                    warn!(log = %forwarded, "plugin refused chain id");
                }
                OPTION_SUCCESS.to_string()
            }
            OPTION_ACCOUNT => self.seed_account(value),
            _ => match key.strip_prefix(OPTION_PLUGIN_PREFIX) {
                Some(plugin_key) => self.plugin.set_option(plugin_key, value),
                None => format!("Unrecognized option key {:?}", key),
            },
        };
        debug!(key, log = %log, "set_option");
        log
    }

    fn append_tx(&mut self, tx_bytes: &[u8]) -> TxResult {
        let tx = match Tx::decode(tx_bytes) {
            Ok(tx) => tx,
            Err(e) => {
                warn!(error = %e, "rejected undecodable transaction");
                return TxResult::from(e);
            }
        };

        let res = match &tx {
            Tx::Opaque(opaque) => self.plugin.run_tx(&opaque.bytes),
            _ => match self.authorize(&tx) {
                Ok(updated) => {
                    self.accounts.extend(updated);
                    TxResult::ok_with_data(tx.id(&self.chain_id).as_bytes().to_vec())
                }
                Err(res) => res,
            },
        };

        if res.is_ok() {
            self.tx_count += 1;
            info!(kind = %tx.kind(), id = %tx.id(&self.chain_id), "transaction appended");
        } else {
            warn!(kind = %tx.kind(), code = %res.code, log = %res.log, "transaction rejected");
        }
        res
    }

    fn check_tx(&self, tx_bytes: &[u8]) -> TxResult {
        let tx = match Tx::decode(tx_bytes) {
            Ok(tx) => tx,
            Err(e) => return TxResult::from(e),
        };
        match &tx {
            Tx::Opaque(opaque) => self.plugin.check_tx(&opaque.bytes),
            _ => match self.authorize(&tx) {
                Ok(_) => TxResult::ok_with_data(tx.id(&self.chain_id).as_bytes().to_vec()),
                Err(res) => res,
            },
        }
    }

    fn commit(&mut self) -> CommitResult {
        let plugin_root = self.plugin.commit();
        let state = self.state_bytes();
        let root = sha256_multi(&[&state[..], &plugin_root.root[..]]);
        info!(
            root = %hex::encode_upper(root),
            accounts = self.accounts.len(),
            "state committed"
        );
        CommitResult { root }
    }
}
