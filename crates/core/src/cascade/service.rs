//! Single-node computation and cascade expansion.
//!
//! Guard behavior is a silent skip, never an error: a non-positive base,
//! a non-positive configured amount, or a computed amount that quantizes
//! to zero omits the node and its entire subtree. No zero-amount lines
//! are ever produced.

use rust_decimal::Decimal;
use tally_shared::types::round_currency;

use super::types::{AdjustmentDef, AdjustmentKind, CascadeLine};

/// Computes a single adjustment amount against a base.
///
/// - `Fixed`: the configured amount.
/// - `Percentage`: `base * amount / 100`.
///
/// The result is quantized to `digits` decimal places with banker's
/// rounding. Callers are expected to apply the positivity guards; this
/// function is the bare formula.
#[must_use]
pub fn compute(base: Decimal, def: &AdjustmentDef, digits: u32) -> Decimal {
    let raw = match def.kind {
        AdjustmentKind::Fixed => def.amount,
        AdjustmentKind::Percentage => base * def.amount / Decimal::ONE_HUNDRED,
    };
    round_currency(raw, digits)
}

/// Expands a list of adjustment definitions against a base amount into a
/// flat, ordered list of cascade lines.
///
/// For each definition in declaration order: compute its amount against
/// `base`, append it, then recurse into its nested charges using the
/// computed amount as the new base. Charges tax the discount, not the
/// original base.
#[must_use]
pub fn compute_cascade(base: Decimal, defs: &[AdjustmentDef], digits: u32) -> Vec<CascadeLine> {
    let mut lines = Vec::new();
    expand(base, defs, digits, &mut lines);
    lines
}

fn expand(base: Decimal, defs: &[AdjustmentDef], digits: u32, lines: &mut Vec<CascadeLine>) {
    if base <= Decimal::ZERO {
        return;
    }
    for def in defs {
        if def.amount <= Decimal::ZERO {
            continue;
        }
        let amount = compute(base, def, digits);
        if amount <= Decimal::ZERO {
            continue;
        }
        lines.push(CascadeLine {
            account: def.account,
            amount,
            label: def.name.clone(),
        });
        expand(amount, &def.charges, digits, lines);
    }
}
