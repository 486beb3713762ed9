//! Property-based tests for the discount/charge cascade.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{round_currency, AccountId};

use super::service::{compute, compute_cascade};
use super::types::{AdjustmentDef, AdjustmentKind};

/// Strategy to generate a positive base amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a positive percentage rate (0.01% to 100.00%).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|bps| Decimal::new(bps, 2))
}

fn percentage(rate: Decimal) -> AdjustmentDef {
    AdjustmentDef::new("p", AdjustmentKind::Percentage, rate, AccountId::new())
}

fn fixed(amount: Decimal) -> AdjustmentDef {
    AdjustmentDef::new("f", AdjustmentKind::Fixed, amount, AccountId::new())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* non-negative base and percentage rate r,
    /// `compute(base, percentage(r), d) == round(base * r / 100, d)`.
    #[test]
    fn prop_percentage_formula(base in positive_amount(), rate in positive_rate()) {
        let def = percentage(rate);
        let expected = round_currency(base * rate / Decimal::ONE_HUNDRED, 2);
        prop_assert_eq!(compute(base, &def, 2), expected);
    }

    /// *For any* positive base, a fixed definition computes its configured
    /// amount, quantized.
    #[test]
    fn prop_fixed_formula(base in positive_amount(), amount in positive_amount()) {
        let def = fixed(amount);
        prop_assert_eq!(compute(base, &def, 2), round_currency(amount, 2));
    }

    /// A zero or negative base yields an empty cascade regardless of the
    /// definitions.
    #[test]
    fn prop_non_positive_base_yields_empty(rate in positive_rate(), amount in positive_amount()) {
        let defs = vec![percentage(rate), fixed(amount)];
        prop_assert!(compute_cascade(Decimal::ZERO, &defs, 2).is_empty());
        prop_assert!(compute_cascade(-amount, &defs, 2).is_empty());
    }

    /// Every emitted line carries a strictly positive amount.
    #[test]
    fn prop_no_zero_amount_lines(base in positive_amount(), rate in positive_rate()) {
        let def = percentage(rate).with_charges(vec![percentage(rate), fixed(Decimal::ZERO)]);
        for line in compute_cascade(base, &[def], 2) {
            prop_assert!(line.amount > Decimal::ZERO);
        }
    }

    /// A nested charge is computed against the parent's computed amount,
    /// never against the original base.
    #[test]
    fn prop_charge_base_is_parent_amount(base in positive_amount(), rate in positive_rate()) {
        let parent = percentage(rate).with_charges(vec![percentage(rate)]);
        let lines = compute_cascade(base, &[parent.clone()], 2);
        if lines.len() == 2 {
            let expected_child = compute(lines[0].amount, &parent.charges[0], 2);
            prop_assert_eq!(lines[1].amount, expected_child);
        }
    }
}
