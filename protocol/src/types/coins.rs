//! Coin sets.
//!
//! A [`Coins`] value is an ordered list of `(denom, amount)` pairs. Amounts
//! are signed so that a negative quantity coming off the wire can be
//! represented and rejected, rather than silently wrapping. Ordering is
//! preserved exactly; it is part of the signable bytes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::config::MAX_COINS_PER_SET;

/// Why a coin set is invalid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoinsError {
    #[error("negative amount {amount} for denomination {denom:?}")]
    NegativeAmount { denom: String, amount: i64 },

    #[error("duplicate denomination {denom:?}")]
    DuplicateDenom { denom: String },

    #[error("{count} coin entries, limit is {max}")]
    TooManyEntries { count: usize, max: usize },
}

/// One denomination and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: i64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A coin set. Serializes as a JSON array of `{"denom", "amount"}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(pub Vec<Coin>);

impl Coins {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    /// Shorthand for a single-denomination set.
    pub fn single(denom: impl Into<String>, amount: i64) -> Self {
        Self(vec![Coin::new(denom, amount)])
    }

    /// Checks that no amount is negative and no denomination repeats.
    /// Reports the first violation in list order. Sets longer than the
    /// decoder accepts are refused up front.
    pub fn validate(&self) -> Result<(), CoinsError> {
        if self.0.len() > MAX_COINS_PER_SET {
            return Err(CoinsError::TooManyEntries {
                count: self.0.len(),
                max: MAX_COINS_PER_SET,
            });
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        for coin in &self.0 {
            if coin.amount < 0 {
                return Err(CoinsError::NegativeAmount {
                    denom: coin.denom.clone(),
                    amount: coin.amount,
                });
            }
            if !seen.insert(coin.denom.as_str()) {
                return Err(CoinsError::DuplicateDenom {
                    denom: coin.denom.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// `true` when the set is empty or every amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount == 0)
    }

    /// Quantity held of `denom`, or 0 when absent.
    pub fn amount_of(&self, denom: &str) -> i64 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Coins {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(d, a)| Coin::new(d, a)).collect())
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}
