//! Value types shared by every transaction variant: addresses and coin sets.

pub mod address;
pub mod coins;

pub use address::Address;
pub use coins::{Coin, Coins, CoinsError};
