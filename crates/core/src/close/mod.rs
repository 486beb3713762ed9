//! The register-shift close aggregate and its derived totals.
//!
//! A close reconciles one register shift against every payment channel that
//! fed it: terminal collections, deferred customer balances, and advances.
//! All derived totals are recomputed eagerly after every structural
//! mutation; there is no reactive dependency graph.
//!
//! # Modules
//!
//! - `types` - The close aggregate and its owned collection records
//! - `totals` - The aggregation/diff engine
//! - `error` - Close-level validation errors

pub mod error;
pub mod totals;
pub mod types;

#[cfg(test)]
mod totals_props;

pub use error::CloseError;
pub use totals::CloseTotals;
pub use types::{
    AdvanceApplied, AdvanceCollected, AmountEntry, BankCollection, Close, CloseState,
    CustomerPayable, CustomerReceivable, DocumentInfo, MoneyTypeEntry, SaleSummary, TerminalMove,
};
