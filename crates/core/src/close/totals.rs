//! The aggregation/diff engine.
//!
//! Sums heterogeneous contribution sources into a single reconciliation
//! delta with a stable sign convention: `diff = sale_amount - total_affected`.
//! A positive diff is a shortage, a negative diff an overage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Close, MoneyTypeEntry, TerminalMove};

impl MoneyTypeEntry {
    /// Sum of sub-amounts whose amount type affects the close total.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amounts
            .iter()
            .filter(|a| a.amount_type.affects_total)
            .map(|a| a.amount)
            .sum()
    }

    /// Sum of sub-amounts that are recorded but do not affect the total.
    #[must_use]
    pub fn amount_ignore(&self) -> Decimal {
        self.amounts
            .iter()
            .filter(|a| !a.amount_type.affects_total)
            .map(|a| a.amount)
            .sum()
    }

    /// Sum of all sub-amounts.
    #[must_use]
    pub fn amount_total(&self) -> Decimal {
        self.amount() + self.amount_ignore()
    }
}

impl TerminalMove {
    /// Sum of affecting amounts over this terminal's entries.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.entries.iter().map(MoneyTypeEntry::amount).sum()
    }

    /// Sum of ignored amounts over this terminal's entries.
    #[must_use]
    pub fn amount_ignore(&self) -> Decimal {
        self.entries.iter().map(MoneyTypeEntry::amount_ignore).sum()
    }

    /// Sum of all amounts over this terminal's entries.
    #[must_use]
    pub fn amount_total(&self) -> Decimal {
        self.amount() + self.amount_ignore()
    }
}

/// Derived totals of a close.
///
/// Computed in a fixed order where each step may depend only on previously
/// computed values. Recomputed eagerly after every structural mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseTotals {
    /// Σ total_amount over assigned sales.
    pub sale_amount: Decimal,
    /// Σ affecting amounts over terminal moves.
    pub terminal_amount: Decimal,
    /// Σ customer receivable amounts.
    pub customer_receivable_amount: Decimal,
    /// Σ customer payable amounts.
    pub customer_payable_amount: Decimal,
    /// Σ electronic bank collection amounts.
    pub bank_collection_amount: Decimal,
    /// Σ advance collection amounts.
    pub collected_in_advance_amount: Decimal,
    /// Σ advance applications that affect the close total.
    pub collected_in_advance_apply_amount: Decimal,
    /// Collections counting toward reconciliation.
    pub total_affected: Decimal,
    /// Recorded-only money: ignored terminal amounts plus ignored advance
    /// applications.
    pub total_extra: Decimal,
    /// Everything that physically moved: `total_affected + total_extra`.
    pub total_collected: Decimal,
    /// `sale_amount - total_affected`. Zero means the close balances;
    /// positive is a shortage, negative an overage.
    pub diff: Decimal,
}

impl CloseTotals {
    /// Computes the totals for a close in the fixed recomputation order.
    #[must_use]
    pub fn compute(close: &Close) -> Self {
        let sale_amount: Decimal = close.sales.iter().map(|s| s.total_amount).sum();
        let terminal_amount: Decimal = close.terminal_moves.iter().map(TerminalMove::amount).sum();
        let customer_receivable_amount: Decimal =
            close.receivables.iter().map(|r| r.amount).sum();
        let customer_payable_amount: Decimal = close.payables.iter().map(|p| p.amount).sum();
        let bank_collection_amount: Decimal =
            close.bank_collections.iter().map(|b| b.amount).sum();
        let collected_in_advance_amount: Decimal =
            close.advances_collected.iter().map(|a| a.amount).sum();
        let collected_in_advance_apply_amount: Decimal = close
            .advances_applied
            .iter()
            .filter(|a| a.affects_total)
            .map(|a| a.amount)
            .sum();

        let total_affected = (terminal_amount
            + customer_receivable_amount
            + bank_collection_amount
            + collected_in_advance_apply_amount)
            - (customer_payable_amount + collected_in_advance_amount);

        let ignored_advances: Decimal = close
            .advances_applied
            .iter()
            .filter(|a| !a.affects_total)
            .map(|a| a.amount)
            .sum();
        let ignored_terminal: Decimal = close
            .terminal_moves
            .iter()
            .map(TerminalMove::amount_ignore)
            .sum();
        let total_extra = ignored_terminal + ignored_advances;

        let total_collected = total_affected + total_extra;
        let diff = sale_amount - total_affected;

        Self {
            sale_amount,
            terminal_amount,
            customer_receivable_amount,
            customer_payable_amount,
            bank_collection_amount,
            collected_in_advance_amount,
            collected_in_advance_apply_amount,
            total_affected,
            total_extra,
            total_collected,
            diff,
        }
    }
}
