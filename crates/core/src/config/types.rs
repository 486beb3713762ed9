//! Configuration types for stations, terminals and payment instruments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tally_shared::types::{
    AccountId, AmountTypeId, CompanyId, MoneyTypeId, PartyId, SequenceId, StationId, TerminalId,
};

use crate::cascade::AdjustmentDef;

/// Errors raised when a configuration record is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A non-affecting amount type must say where its money goes instead.
    #[error("Amount type '{name}' does not affect the close total and requires an alternate account")]
    AlternateAccountRequired {
        /// The offending amount type's name.
        name: String,
    },
}

/// How a terminal's collections are moved to its bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferPolicy {
    /// One transfer for the terminal's full total.
    Grouped,
    /// One transfer per money type.
    PerMoneyType,
}

/// A cashier station: the register a close reconciles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Unique identifier.
    pub id: StationId,
    /// Owning company.
    pub company: CompanyId,
    /// Display name, used in posting descriptions.
    pub name: String,
    /// The cash account receipts draw on.
    pub cash_account: AccountId,
    /// Receipt kind label forwarded to the ledger subsystem.
    pub receipt_kind: String,
    /// Configuration flag used to filter selectable stations.
    pub active: bool,
}

/// A collection point (cash drawer, card machine) feeding a close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    /// Unique identifier.
    pub id: TerminalId,
    /// The station this terminal belongs to.
    pub station: StationId,
    /// Display name, used in posting descriptions.
    pub name: String,
    /// The bank account collections are transferred into.
    pub bank_account: AccountId,
    /// Group vs. split per money-type transfer policy.
    pub transfer_policy: TransferPolicy,
    /// Configuration flag used to filter selectable terminals.
    pub active: bool,
}

/// A category of payment instrument (cash, check, a card brand).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyType {
    /// Unique identifier.
    pub id: MoneyTypeId,
    /// Display name, used in posting descriptions.
    pub name: String,
    /// Whether collections of this type are physical documents
    /// (checks, drafts) carrying party/date/reference metadata.
    pub is_document: bool,
    /// Discount/charge cascade applied to this money type's total.
    pub adjustments: Vec<AdjustmentDef>,
}

/// A named sub-amount within a money type (e.g. "Base", "Tips").
///
/// Amount types are configured globally and decide whether their money
/// counts toward the close's reconciliation total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountType {
    /// Unique identifier.
    pub id: AmountTypeId,
    /// Display name.
    pub name: String,
    /// Whether entries of this type count toward the reconciliation total.
    pub affects_total: bool,
    /// Where non-affecting money is posted instead. Required exactly when
    /// `affects_total` is false.
    pub alternate_account: Option<AccountId>,
    /// Discount/charge cascade applied to this amount type's entries.
    pub adjustments: Vec<AdjustmentDef>,
}

impl AmountType {
    /// Validates the alternate-account invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.affects_total && self.alternate_account.is_none() {
            return Err(ConfigError::AlternateAccountRequired {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Company-level configuration the close lifecycle depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseConfig {
    /// Sequence used to allocate close display numbers at confirmation.
    pub close_sequence: SequenceId,
    /// Default counterparty receipts are posted under.
    pub sale_party: PartyId,
    /// Account the reconciliation diff is balanced against.
    pub diff_account: AccountId,
    /// Clearing account transfers move through.
    pub transfer_account: AccountId,
}
