//! Property-based tests for the aggregation/diff engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{
    AccountId, AdvanceId, AmountTypeId, CompanyId, Currency, MoneyTypeId, PartyId, SaleId,
    StationId, TerminalId,
};

use crate::config::{AmountType, MoneyType};

use super::types::{
    AdvanceApplied, AdvanceCollected, AmountEntry, BankCollection, Close, CustomerPayable,
    CustomerReceivable, MoneyTypeEntry, SaleSummary, TerminalMove,
};

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_close(
    sales: Vec<Decimal>,
    terminal_affecting: Vec<Decimal>,
    terminal_ignored: Vec<Decimal>,
    receivables: Vec<Decimal>,
    payables: Vec<Decimal>,
    collected: Vec<Decimal>,
    applied: Vec<(Decimal, bool)>,
    bank: Vec<Decimal>,
) -> Close {
    let mut close = Close::new(
        CompanyId::new(),
        StationId::new(),
        Currency::Usd,
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    );
    for total_amount in sales {
        close
            .assign_sale(SaleSummary {
                id: SaleId::new(),
                total_amount,
            })
            .unwrap();
    }
    let entries: Vec<AmountEntry> = terminal_affecting
        .into_iter()
        .map(|a| (a, true))
        .chain(terminal_ignored.into_iter().map(|a| (a, false)))
        .map(|(a, affects_total)| AmountEntry {
            amount_type: AmountType {
                id: AmountTypeId::new(),
                name: "x".to_string(),
                affects_total,
                alternate_account: (!affects_total).then(AccountId::new),
                adjustments: Vec::new(),
            },
            amount: a,
        })
        .collect();
    if !entries.is_empty() {
        close
            .add_terminal_move(TerminalMove {
                terminal: TerminalId::new(),
                entries: vec![MoneyTypeEntry {
                    money_type: MoneyType {
                        id: MoneyTypeId::new(),
                        name: "Cash".to_string(),
                        is_document: false,
                        adjustments: Vec::new(),
                    },
                    document: None,
                    amounts: entries,
                }],
            })
            .unwrap();
    }
    for a in receivables {
        close
            .add_receivable(CustomerReceivable {
                party: PartyId::new(),
                account: AccountId::new(),
                amount: a,
                description: None,
            })
            .unwrap();
    }
    for a in payables {
        close
            .add_payable(CustomerPayable {
                party: PartyId::new(),
                account: AccountId::new(),
                amount: a,
                description: None,
            })
            .unwrap();
    }
    for a in collected {
        close
            .add_advance_collected(AdvanceCollected {
                advance: AdvanceId::new(),
                party: PartyId::new(),
                account: AccountId::new(),
                amount: a,
            })
            .unwrap();
    }
    for (a, affects_total) in applied {
        close
            .add_advance_applied(AdvanceApplied {
                advance: AdvanceId::new(),
                party: PartyId::new(),
                account: AccountId::new(),
                amount: a,
                affects_total,
                alternate_account: (!affects_total).then(AccountId::new),
            })
            .unwrap();
    }
    for a in bank {
        close
            .add_bank_collection(BankCollection {
                party: PartyId::new(),
                date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                reference: None,
                description: None,
                bank_account: AccountId::new(),
                receipt_kind: "bank-in".to_string(),
                amount: a,
                receipt: None,
            })
            .unwrap();
    }
    close
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* combination of contributions,
    /// `diff == sale_amount - total_affected`.
    #[test]
    fn prop_diff_identity(
        sales in proptest::collection::vec(amount(), 0..4),
        affecting in proptest::collection::vec(amount(), 0..4),
        ignored in proptest::collection::vec(amount(), 0..4),
        receivables in proptest::collection::vec(amount(), 0..3),
        payables in proptest::collection::vec(amount(), 0..3),
        collected in proptest::collection::vec(amount(), 0..3),
        applied in proptest::collection::vec((amount(), any::<bool>()), 0..3),
        bank in proptest::collection::vec(amount(), 0..3),
    ) {
        let close = make_close(
            sales, affecting, ignored, receivables, payables, collected, applied, bank,
        );
        let t = &close.totals;
        prop_assert_eq!(t.diff, t.sale_amount - t.total_affected);
        prop_assert_eq!(t.total_collected, t.total_affected + t.total_extra);
    }

    /// With no collections at all, the diff equals the sale amount.
    #[test]
    fn prop_empty_collections_diff_is_sale_amount(
        sales in proptest::collection::vec(amount(), 0..4),
    ) {
        let expected: Decimal = sales.iter().copied().sum();
        let close = make_close(sales, vec![], vec![], vec![], vec![], vec![], vec![], vec![]);
        prop_assert_eq!(close.totals.diff, expected);
        prop_assert_eq!(close.totals.total_extra, Decimal::ZERO);
    }

    /// Ignored amounts never move `total_affected`, only `total_extra`.
    #[test]
    fn prop_ignored_amounts_do_not_affect_total(
        affecting in proptest::collection::vec(amount(), 0..4),
        ignored in proptest::collection::vec(amount(), 1..4),
    ) {
        let with_ignored = make_close(
            vec![], affecting.clone(), ignored.clone(),
            vec![], vec![], vec![], vec![], vec![],
        );
        let without_ignored = make_close(
            vec![], affecting, vec![], vec![], vec![], vec![], vec![], vec![],
        );
        prop_assert_eq!(
            with_ignored.totals.total_affected,
            without_ignored.totals.total_affected
        );
        let expected_extra: Decimal = ignored.iter().copied().sum();
        prop_assert_eq!(with_ignored.totals.total_extra, expected_extra);
    }
}
