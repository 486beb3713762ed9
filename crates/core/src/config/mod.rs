//! Station, terminal and payment-instrument configuration.
//!
//! These types describe the fixed setup a close operates against: which
//! station it belongs to, which terminals feed it, which money types and
//! amount types those terminals accept, and the accounts and sequences the
//! posting step needs.

pub mod types;

pub use types::{
    AmountType, CloseConfig, ConfigError, MoneyType, Station, Terminal, TransferPolicy,
};
