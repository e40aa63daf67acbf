//! End-to-end runs against a fresh [`MemLedger`].
//!
//! Each scenario seeds accounts through `set_option`, builds and signs
//! transactions the way a client would, and appends their tagged encoding.
//! Any rejection aborts the scenario with an error.

use anyhow::{bail, ensure, Context, Result};
use rand::Rng;
use serde_json::json;
use tracing::info;

use cobalt_protocol::config::{OPTION_ACCOUNT, OPTION_CHAIN_ID, OPTION_SUCCESS};
use cobalt_protocol::ledger::{CommitResult, LedgerApp};
use cobalt_protocol::transaction::{
    AgreementTx, OpaqueTx, SendTx, SignBytes, SignedAgreementTx, Tx, TxInput, TxOutput,
};
use cobalt_protocol::types::Coins;

use crate::account::{Account, PrivAccount};
use crate::ledger::MemLedger;

/// What a scenario did, for printing and assertions.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub appended: usize,
    pub root: CommitResult,
}

fn new_ledger(chain_id: &str) -> Result<MemLedger> {
    let mut ledger: MemLedger = MemLedger::default();
    set_option(&mut ledger, OPTION_CHAIN_ID, chain_id)?;
    info!("{}", ledger.info());
    Ok(ledger)
}

fn set_option(ledger: &mut MemLedger, key: &str, value: &str) -> Result<()> {
    let log = ledger.set_option(key, value);
    if log != OPTION_SUCCESS {
        bail!("failed to set option {}: {}", key, log);
    }
    Ok(())
}

fn seed(ledger: &mut MemLedger, account: &Account) -> Result<()> {
    let json = serde_json::to_string(account).context("failed to encode account")?;
    set_option(ledger, OPTION_ACCOUNT, &json)
}

fn append(ledger: &mut MemLedger, tx: Tx) -> Result<()> {
    let res = ledger.append_tx(&tx.encode());
    if res.is_err() {
        bail!("append_tx failed for {}: {}", tx, res);
    }
    Ok(())
}

/// Builds a signed one-input, one-output transfer.
fn transfer(
    chain_id: &str,
    from: &PrivAccount,
    sequence: i64,
    to: &PrivAccount,
    amount: i64,
    fee: i64,
) -> Result<SendTx> {
    let mut input = TxInput::new(from.address(), Coins::single("", amount + fee), sequence);
    if sequence == 1 {
        input = input.with_pub_key(from.pub_key());
    }
    let mut tx = SendTx::new(
        fee,
        fee,
        vec![input],
        vec![TxOutput::new(to.address(), Coins::single("", amount))],
    );
    tx.sign(chain_id, &from.keypair)
        .context("failed to sign transfer")?;
    Ok(tx)
}

/// One signed transfer from `test1` to `test2`.
pub fn send(chain_id: &str) -> Result<ScenarioReport> {
    let mut ledger = new_ledger(chain_id)?;
    let test1 = PrivAccount::from_secret("test1");
    let test2 = PrivAccount::from_secret("test2");
    seed(&mut ledger, &test1.account)?;

    let tx = transfer(chain_id, &test1, 1, &test2, 1, 0)?;
    println!("Sign bytes: {}", hex::encode_upper(tx.sign_bytes(chain_id)));

    let tx = Tx::from(tx);
    let bytes = tx.encode();
    println!("Signed TX bytes: {}", hex::encode_upper(&bytes));
    let decoded = Tx::decode(&bytes).context("signed transaction failed to decode")?;
    ensure!(decoded == tx, "decode(encode(tx)) differs from tx");

    append(&mut ledger, tx)?;
    let root = ledger.commit();
    println!("{}", ledger.info());
    Ok(ScenarioReport { appended: 1, root })
}

/// Funds `count` fresh accounts from `test1`, then moves coins between them
/// at random for `rounds` transfers. Every sender's sequence advances by
/// exactly one per transaction.
pub fn sequence(chain_id: &str, count: usize, rounds: usize) -> Result<ScenarioReport> {
    ensure!(count >= 2 || rounds == 0, "random sends need at least 2 accounts");
    let mut ledger = new_ledger(chain_id)?;
    let test1 = PrivAccount::from_secret("test1");
    seed(&mut ledger, &test1.account)?;

    let accounts = PrivAccount::random(count);
    let mut sequences = vec![0i64; count];
    let mut appended = 0;

    for (i, account) in accounts.iter().enumerate() {
        let tx = transfer(chain_id, &test1, i as i64 + 1, account, 1_000_000, 2)?;
        append(&mut ledger, Tx::from(tx))?;
        appended += 1;
    }
    info!(funded = count, "funding complete");

    let mut rng = rand::thread_rng();
    for _ in 0..rounds {
        let a = rng.gen_range(0..count);
        let b = rng.gen_range(0..count);
        if a == b {
            continue;
        }
        sequences[a] += 1;
        let tx = transfer(chain_id, &accounts[a], sequences[a], &accounts[b], 1, 2)?;
        append(&mut ledger, Tx::from(tx))?;
        appended += 1;
    }

    let root = ledger.commit();
    println!("{}", ledger.info());
    Ok(ScenarioReport { appended, root })
}

/// The trade signed by both banks in the agreement scenario.
pub fn fx_trade() -> Result<AgreementTx> {
    let normalized = json!({
        "entityA": "Citibank",
        "entityB": "Deutsche Bank",
        "product": "FX Spot",
        "currencyPair": "EURUSD",
        "quantity1": 1000000,
        "currency1": "EUR",
        "currency2": "USD",
        "rate": "1.0965",
        "tradeDate": "9 March 2016",
        "valueDate": "11 March 2016",
        "venueTradeExecutionTime": "10 Mar 2016 09:34:04.2323",
        "id": "d64cbbeb-31fe-446a-8017-397696cdf2d0"
    });
    let doc = AgreementTx::new(
        &normalized,
        vec![
            "04d69f6fcd5521065c6b05e044e9d566cc1ca30450e5dce6f50e3fd11ebc223b".to_string(),
            "0448d2f1f8ef80ffb0699bcd63494598c7a7f7e0e6c4b54263a135151d746275".to_string(),
        ],
        vec!["Citibank".to_string(), "Deutsche Bank".to_string()],
    )?;
    Ok(doc)
}

/// Two banks sign an FX trade, and the signed document goes through the
/// ledger as an opaque transaction.
pub fn cobalt(chain_id: &str) -> Result<ScenarioReport> {
    let mut ledger = new_ledger(chain_id)?;
    let citi = PrivAccount::from_secret("citi");
    let deutsche = PrivAccount::from_secret("deutsche");
    seed(&mut ledger, &Account::named("Citibank", citi.pub_key()))?;
    seed(&mut ledger, &Account::named("Deutsche Bank", deutsche.pub_key()))?;
    println!("Citibank pubkey:      {}", citi.pub_key());
    println!("Deutsche Bank pubkey: {}", deutsche.pub_key());

    let mut tx = SignedAgreementTx::new(fx_trade()?);
    let sign_bytes = tx.sign_bytes(chain_id);
    println!("Tx sign string: {}", String::from_utf8_lossy(&sign_bytes));

    tx.sign(chain_id, "Citibank", &citi.keypair)?;
    tx.sign(chain_id, "Deutsche Bank", &deutsche.keypair)?;
    ensure!(tx.is_fully_signed(), "missing signatures: {:?}", tx.missing_participants());
    ensure!(
        tx.sign_bytes(chain_id) == sign_bytes,
        "sign bytes changed while signing"
    );
    println!("Fully signed tx: {}", tx.to_json()?);

    let opaque = OpaqueTx::from_signed_agreement(&tx)?;
    append(&mut ledger, Tx::from(opaque))?;
    let root = ledger.commit();
    println!("{}", ledger.info());
    Ok(ScenarioReport { appended: 1, root })
}
