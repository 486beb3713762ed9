//! Adjustment definitions and computed cascade lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, AdjustmentId};

/// How an adjustment's amount is derived from its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// A percentage of the base amount (`amount` is the rate, e.g. 15 = 15%).
    Percentage,
    /// A fixed amount, independent of the base.
    Fixed,
}

/// A named discount or charge definition.
///
/// Definitions form a tree: a discount's `charges` are applied recursively
/// to the discount's own computed amount, not to the original base. The
/// configured depth is two levels (discount -> charge) but the calculation
/// is recursion-safe for arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDef {
    /// Unique identifier of this definition.
    pub id: AdjustmentId,
    /// Display name, used in ledger line descriptions.
    pub name: String,
    /// Percentage or fixed.
    pub kind: AdjustmentKind,
    /// Rate (for percentage) or amount (for fixed).
    pub amount: Decimal,
    /// The account the computed amount is posted against.
    pub account: AccountId,
    /// Nested charges taxing this adjustment's computed amount.
    pub charges: Vec<AdjustmentDef>,
}

impl AdjustmentDef {
    /// Creates a leaf definition with no nested charges.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AdjustmentKind, amount: Decimal, account: AccountId) -> Self {
        Self {
            id: AdjustmentId::new(),
            name: name.into(),
            kind,
            amount,
            account,
            charges: Vec::new(),
        }
    }

    /// Attaches nested charge definitions, returning the definition.
    #[must_use]
    pub fn with_charges(mut self, charges: Vec<AdjustmentDef>) -> Self {
        self.charges = charges;
        self
    }
}

/// One computed adjustment, ready to become a ledger line.
///
/// The emission order of cascade lines is the declaration order of the
/// definitions that produced them and must stay stable for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeLine {
    /// The account the amount is posted against.
    pub account: AccountId,
    /// The computed, currency-quantized amount. Always positive.
    pub amount: Decimal,
    /// Display label taken from the definition's name.
    pub label: String,
}
