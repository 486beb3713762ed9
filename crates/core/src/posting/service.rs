//! The posting translator.
//!
//! Emission order is fixed and audit-stable: invoice settlement lines,
//! terminal cascade debit/credit pairs, customer receivables (negative),
//! customer payables (positive), advances collected (positive), advances
//! applied (negative, plus the alternate-account balancing line when the
//! application does not affect the total), the diff balancing line, and
//! finally the money-plus lines for non-affecting amount entries.

use rust_decimal::Decimal;
use tracing::debug;

use tally_shared::types::{AccountId, AdvanceId, InvoiceId, PartyId};

use crate::cascade::{compute_cascade, CascadeLine};
use crate::close::{Close, MoneyTypeEntry, TerminalMove};
use crate::config::{CloseConfig, Station, Terminal, TransferPolicy};

use super::error::PostingError;
use super::types::{
    DocumentSlip, InvoiceLineInput, PostingPlan, ReceiptDraft, ReceiptLine, TransferDraft,
};

/// Pure translator from a close's contribution graph to ledger drafts.
pub struct PostingService;

impl PostingService {
    /// Translates a close into one receipt draft and its transfer partition.
    ///
    /// `terminals` must contain every terminal referenced by the close's
    /// moves; `invoice_lines` are the settlement lines gathered from the
    /// sales subsystem and become the first lines of the receipt.
    pub fn translate(
        close: &Close,
        station: &Station,
        terminals: &[Terminal],
        invoice_lines: &[InvoiceLineInput],
        config: &CloseConfig,
    ) -> Result<PostingPlan, PostingError> {
        let digits = close.currency.digits();
        let msg = format!("Cashier close {}", close.rec_name());

        let mut lines: Vec<ReceiptLine> = Vec::new();
        let mut cash = Decimal::ZERO;
        let mut documents: Vec<DocumentSlip> = Vec::new();

        for input in invoice_lines {
            lines.push(line(
                msg.clone(),
                input.amount_to_pay,
                input.account,
                Some(input.party),
                Some(input.invoice),
                None,
            ));
        }

        for terminal_move in &close.terminal_moves {
            let terminal = resolve_terminal(terminals, terminal_move)?;
            for entry in &terminal_move.entries {
                let total = entry.amount_total();
                if entry.money_type.is_document {
                    if let Some(slip) = slip_for(entry) {
                        documents.push(slip);
                    }
                } else {
                    cash += total;
                }
                for cascade_line in expand_entry_cascades(entry, digits) {
                    let label = format!(
                        "[{}][{}][{}][{}][{}]",
                        close.rec_name(),
                        station.name,
                        terminal.name,
                        entry.money_type.name,
                        cascade_line.label,
                    );
                    lines.push(line(
                        label.clone(),
                        -cascade_line.amount,
                        cascade_line.account,
                        None,
                        None,
                        None,
                    ));
                    lines.push(line(
                        label,
                        cascade_line.amount,
                        terminal.bank_account,
                        None,
                        None,
                        None,
                    ));
                }
            }
        }

        for receivable in &close.receivables {
            lines.push(line(
                describe(&msg, receivable.description.as_deref()),
                -receivable.amount,
                receivable.account,
                Some(receivable.party),
                None,
                None,
            ));
        }

        for payable in &close.payables {
            lines.push(line(
                describe(&msg, payable.description.as_deref()),
                payable.amount,
                payable.account,
                Some(payable.party),
                None,
                None,
            ));
        }

        // Electronic collections never reach the register: the close
        // receipt credits the clearing account, and a dedicated bank
        // receipt books the money into the collection's bank account.
        let mut bank_receipts: Vec<ReceiptDraft> = Vec::new();
        for collection in &close.bank_collections {
            let description = format!("{msg} {}", collection.label());
            lines.push(line(
                description.clone(),
                -collection.amount,
                config.transfer_account,
                None,
                None,
                None,
            ));
            bank_receipts.push(ReceiptDraft {
                date: collection.date,
                account: collection.bank_account,
                kind: collection.receipt_kind.clone(),
                party: collection.party,
                description: description.clone(),
                cash: collection.amount,
                documents: Vec::new(),
                lines: vec![line(
                    description,
                    collection.amount,
                    config.transfer_account,
                    None,
                    None,
                    None,
                )],
            });
        }

        for advance in &close.advances_collected {
            lines.push(line(
                format!("{msg} - advance"),
                advance.amount,
                advance.account,
                Some(advance.party),
                None,
                Some(advance.advance),
            ));
        }

        for applied in &close.advances_applied {
            lines.push(line(
                format!("{msg} - advance applied"),
                -applied.amount,
                applied.account,
                Some(applied.party),
                None,
                Some(applied.advance),
            ));
            if !applied.affects_total {
                let alternate =
                    applied
                        .alternate_account
                        .ok_or_else(|| PostingError::MissingAdvanceAlternateAccount {
                            close: close.rec_name(),
                        })?;
                lines.push(line(
                    format!("{msg} - advance applied"),
                    applied.amount,
                    alternate,
                    Some(applied.party),
                    None,
                    Some(applied.advance),
                ));
            }
        }

        let diff = close.totals.diff;
        if diff != Decimal::ZERO {
            lines.push(line(
                format!("{msg} Diff"),
                -diff,
                config.diff_account,
                None,
                None,
                None,
            ));
        }

        for terminal_move in &close.terminal_moves {
            for entry in &terminal_move.entries {
                for amount_entry in &entry.amounts {
                    if amount_entry.amount_type.affects_total {
                        continue;
                    }
                    let alternate = amount_entry.amount_type.alternate_account.ok_or_else(|| {
                        PostingError::MissingAlternateAccount {
                            amount_type: amount_entry.amount_type.name.clone(),
                        }
                    })?;
                    lines.push(line(
                        format!("{msg} - {}", amount_entry.amount_type.name),
                        -amount_entry.amount,
                        alternate,
                        None,
                        None,
                        None,
                    ));
                }
            }
        }

        let transfers = Self::partition_transfers(close, station, terminals, config)?;

        debug!(
            close = %close.rec_name(),
            lines = lines.len(),
            bank_receipts = bank_receipts.len(),
            transfers = transfers.len(),
            %cash,
            "translated close into ledger drafts"
        );

        Ok(PostingPlan {
            receipt: ReceiptDraft {
                date: close.date,
                account: station.cash_account,
                kind: station.receipt_kind.clone(),
                party: config.sale_party,
                description: msg,
                cash,
                documents,
                lines,
            },
            bank_receipts,
            transfers,
        })
    }

    /// Partitions the close's terminal collections into transfer drafts,
    /// honoring each terminal's group vs. split policy. Each transfer
    /// settles through the configured clearing account. Zero-amount
    /// transfers are never produced.
    pub fn partition_transfers(
        close: &Close,
        station: &Station,
        terminals: &[Terminal],
        config: &CloseConfig,
    ) -> Result<Vec<TransferDraft>, PostingError> {
        let mut transfers = Vec::new();
        for terminal_move in &close.terminal_moves {
            let terminal = resolve_terminal(terminals, terminal_move)?;
            let prefix = format!(
                "Transfer [{}][{}][{}]",
                close.rec_name(),
                station.name,
                terminal.name
            );
            match terminal.transfer_policy {
                TransferPolicy::Grouped => {
                    let amount = terminal_move.amount_total();
                    if amount > Decimal::ZERO {
                        transfers.push(TransferDraft {
                            date: close.date,
                            currency: close.currency,
                            from_account: station.cash_account,
                            to_account: terminal.bank_account,
                            terminal: terminal.id,
                            clearing_account: config.transfer_account,
                            amount,
                            description: prefix,
                            documents: terminal_move.entries.iter().filter_map(slip_for).collect(),
                        });
                    }
                }
                TransferPolicy::PerMoneyType => {
                    for entry in &terminal_move.entries {
                        let amount = entry.amount_total();
                        if amount > Decimal::ZERO {
                            transfers.push(TransferDraft {
                                date: close.date,
                                currency: close.currency,
                                from_account: station.cash_account,
                                to_account: terminal.bank_account,
                                terminal: terminal.id,
                                clearing_account: config.transfer_account,
                                amount,
                                description: format!("{prefix}[{}]", entry.money_type.name),
                                documents: slip_for(entry).into_iter().collect(),
                            });
                        }
                    }
                }
            }
        }
        Ok(transfers)
    }
}

fn resolve_terminal<'a>(
    terminals: &'a [Terminal],
    terminal_move: &TerminalMove,
) -> Result<&'a Terminal, PostingError> {
    terminals
        .iter()
        .find(|t| t.id == terminal_move.terminal)
        .ok_or(PostingError::UnknownTerminal {
            terminal: terminal_move.terminal,
        })
}

/// Expands a money-type entry's own cascade, then each amount entry's
/// cascade, preserving declaration order.
fn expand_entry_cascades(entry: &MoneyTypeEntry, digits: u32) -> Vec<CascadeLine> {
    let mut cascade_lines = compute_cascade(entry.amount_total(), &entry.money_type.adjustments, digits);
    for amount_entry in &entry.amounts {
        cascade_lines.extend(compute_cascade(
            amount_entry.amount,
            &amount_entry.amount_type.adjustments,
            digits,
        ));
    }
    cascade_lines
}

fn slip_for(entry: &MoneyTypeEntry) -> Option<DocumentSlip> {
    let doc = entry.document.as_ref()?;
    Some(DocumentSlip {
        money_type: entry.money_type.id,
        party: doc.party,
        date: doc.date,
        reference: doc.reference.clone(),
        entity: doc.entity.clone(),
        amount: entry.amount_total(),
    })
}

fn describe(msg: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{msg} {detail}"),
        None => msg.to_string(),
    }
}

fn line(
    description: String,
    amount: Decimal,
    account: AccountId,
    party: Option<PartyId>,
    invoice: Option<InvoiceId>,
    advance: Option<AdvanceId>,
) -> ReceiptLine {
    ReceiptLine {
        description,
        amount,
        account,
        party,
        invoice,
        advance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tally_shared::types::{
        AmountTypeId, CompanyId, Currency, MoneyTypeId, PartyId, SequenceId, StationId, TerminalId,
    };

    use crate::cascade::{AdjustmentDef, AdjustmentKind};
    use crate::close::{
        AdvanceApplied, AmountEntry, BankCollection, CustomerPayable, CustomerReceivable,
        DocumentInfo, SaleSummary, TerminalMove,
    };
    use crate::config::{AmountType, MoneyType};
    use tally_shared::types::{AdvanceId, SaleId};

    fn station() -> Station {
        Station {
            id: StationId::new(),
            company: CompanyId::new(),
            name: "Front desk".to_string(),
            cash_account: AccountId::new(),
            receipt_kind: "cash-in".to_string(),
            active: true,
        }
    }

    fn terminal(station: &Station, policy: TransferPolicy) -> Terminal {
        Terminal {
            id: TerminalId::new(),
            station: station.id,
            name: "Drawer 1".to_string(),
            bank_account: AccountId::new(),
            transfer_policy: policy,
            active: true,
        }
    }

    fn config() -> CloseConfig {
        CloseConfig {
            close_sequence: SequenceId::new(),
            sale_party: PartyId::new(),
            diff_account: AccountId::new(),
            transfer_account: AccountId::new(),
        }
    }

    fn close(station: &Station) -> Close {
        Close::new(
            station.company,
            station.id,
            Currency::Usd,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        )
    }

    fn base_type() -> AmountType {
        AmountType {
            id: AmountTypeId::new(),
            name: "Base".to_string(),
            affects_total: true,
            alternate_account: None,
            adjustments: Vec::new(),
        }
    }

    fn cash_money_type() -> MoneyType {
        MoneyType {
            id: MoneyTypeId::new(),
            name: "Cash".to_string(),
            is_document: false,
            adjustments: Vec::new(),
        }
    }

    fn cash_move(terminal: &Terminal, amount: Decimal) -> TerminalMove {
        TerminalMove {
            terminal: terminal.id,
            entries: vec![MoneyTypeEntry {
                money_type: cash_money_type(),
                document: None,
                amounts: vec![AmountEntry {
                    amount_type: base_type(),
                    amount,
                }],
            }],
        }
    }

    #[test]
    fn test_diff_line_sign_convention() {
        // Shortage: diff = 50 -> one line of -50 against the diff account.
        let st = station();
        let cfg = config();
        let mut c = close(&st);
        c.assign_sale(SaleSummary {
            id: SaleId::new(),
            total_amount: dec!(50.00),
        })
        .unwrap();
        let plan = PostingService::translate(&c, &st, &[], &[], &cfg).unwrap();
        let diff_lines: Vec<_> = plan
            .receipt
            .lines
            .iter()
            .filter(|l| l.account == cfg.diff_account)
            .collect();
        assert_eq!(diff_lines.len(), 1);
        assert_eq!(diff_lines[0].amount, dec!(-50.00));

        // Overage: diff = -50 -> the line is +50.
        let tr = terminal(&st, TransferPolicy::Grouped);
        let mut c = close(&st);
        c.add_terminal_move(cash_move(&tr, dec!(50.00))).unwrap();
        let plan = PostingService::translate(&c, &st, &[tr], &[], &cfg).unwrap();
        let diff_line = plan
            .receipt
            .lines
            .iter()
            .find(|l| l.account == cfg.diff_account)
            .unwrap();
        assert_eq!(diff_line.amount, dec!(50.00));
    }

    #[test]
    fn test_balanced_close_emits_no_diff_line() {
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let mut c = close(&st);
        c.assign_sale(SaleSummary {
            id: SaleId::new(),
            total_amount: dec!(75.00),
        })
        .unwrap();
        c.add_terminal_move(cash_move(&tr, dec!(75.00))).unwrap();
        let plan = PostingService::translate(&c, &st, &[tr], &[], &cfg).unwrap();
        assert!(plan
            .receipt
            .lines
            .iter()
            .all(|l| l.account != cfg.diff_account));
    }

    #[test]
    fn test_cascade_emits_debit_credit_pair() {
        // 100.00 with a 15% discount and a 25% charge on the discount:
        // -15.00 against the discount account, +15.00 back to the bank
        // account, then -3.75 / +3.75 for the charge.
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let discount_account = AccountId::new();
        let charge_account = AccountId::new();
        let mut money_type = cash_money_type();
        money_type.adjustments = vec![AdjustmentDef {
            id: tally_shared::types::AdjustmentId::new(),
            name: "Visa discount".to_string(),
            kind: AdjustmentKind::Percentage,
            amount: dec!(15),
            account: discount_account,
            charges: vec![AdjustmentDef {
                id: tally_shared::types::AdjustmentId::new(),
                name: "Discount tax".to_string(),
                kind: AdjustmentKind::Percentage,
                amount: dec!(25),
                account: charge_account,
                charges: Vec::new(),
            }],
        }];
        let mut c = close(&st);
        c.add_terminal_move(TerminalMove {
            terminal: tr.id,
            entries: vec![MoneyTypeEntry {
                money_type,
                document: None,
                amounts: vec![AmountEntry {
                    amount_type: base_type(),
                    amount: dec!(100.00),
                }],
            }],
        })
        .unwrap();

        let plan = PostingService::translate(&c, &st, &[tr.clone()], &[], &cfg).unwrap();
        let cascade: Vec<_> = plan
            .receipt
            .lines
            .iter()
            .filter(|l| l.description.starts_with('['))
            .collect();
        assert_eq!(cascade.len(), 4);
        assert_eq!(cascade[0].amount, dec!(-15.00));
        assert_eq!(cascade[0].account, discount_account);
        assert_eq!(cascade[1].amount, dec!(15.00));
        assert_eq!(cascade[1].account, tr.bank_account);
        assert_eq!(cascade[2].amount, dec!(-3.75));
        assert_eq!(cascade[2].account, charge_account);
        assert_eq!(cascade[3].amount, dec!(3.75));
        assert!(cascade[0].description.contains("[Visa discount]"));
        assert!(cascade[0].description.contains("[Drawer 1]"));
    }

    #[test]
    fn test_line_ordering_is_audit_stable() {
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let mut c = close(&st);
        c.add_terminal_move(cash_move(&tr, dec!(100.00))).unwrap();
        c.add_receivable(CustomerReceivable {
            party: PartyId::new(),
            account: AccountId::new(),
            amount: dec!(20.00),
            description: Some("tab".to_string()),
        })
        .unwrap();
        c.add_payable(CustomerPayable {
            party: PartyId::new(),
            account: AccountId::new(),
            amount: dec!(5.00),
            description: None,
        })
        .unwrap();
        let invoice_lines = vec![InvoiceLineInput {
            invoice: InvoiceId::new(),
            amount_to_pay: dec!(80.00),
            account: AccountId::new(),
            party: PartyId::new(),
        }];

        let plan = PostingService::translate(&c, &st, &[tr], &invoice_lines, &cfg).unwrap();
        let amounts: Vec<_> = plan.receipt.lines.iter().map(|l| l.amount).collect();
        // invoice, receivable (negative), payable (positive), diff
        assert_eq!(
            amounts,
            vec![dec!(80.00), dec!(-20.00), dec!(5.00), dec!(115.00)]
        );
        assert!(plan.receipt.lines[1].description.ends_with("tab"));
    }

    #[test]
    fn test_document_money_types_feed_documents_not_cash() {
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let check_type = MoneyType {
            id: MoneyTypeId::new(),
            name: "Check".to_string(),
            is_document: true,
            adjustments: Vec::new(),
        };
        let mut c = close(&st);
        c.add_terminal_move(TerminalMove {
            terminal: tr.id,
            entries: vec![
                MoneyTypeEntry {
                    money_type: cash_money_type(),
                    document: None,
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(100.00),
                    }],
                },
                MoneyTypeEntry {
                    money_type: check_type.clone(),
                    document: Some(DocumentInfo {
                        date: c.date,
                        party: PartyId::new(),
                        reference: Some("CHK-9".to_string()),
                        entity: None,
                    }),
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(40.00),
                    }],
                },
            ],
        })
        .unwrap();

        let plan = PostingService::translate(&c, &st, &[tr], &[], &cfg).unwrap();
        assert_eq!(plan.receipt.cash, dec!(100.00));
        assert_eq!(plan.receipt.documents.len(), 1);
        assert_eq!(plan.receipt.documents[0].money_type, check_type.id);
        assert_eq!(plan.receipt.documents[0].amount, dec!(40.00));
    }

    #[test]
    fn test_money_plus_lines_for_non_affecting_entries() {
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let alternate = AccountId::new();
        let tips = AmountType {
            id: AmountTypeId::new(),
            name: "Tips".to_string(),
            affects_total: false,
            alternate_account: Some(alternate),
            adjustments: Vec::new(),
        };
        let mut c = close(&st);
        c.add_terminal_move(TerminalMove {
            terminal: tr.id,
            entries: vec![MoneyTypeEntry {
                money_type: cash_money_type(),
                document: None,
                amounts: vec![
                    AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(100.00),
                    },
                    AmountEntry {
                        amount_type: tips,
                        amount: dec!(12.00),
                    },
                ],
            }],
        })
        .unwrap();

        let plan = PostingService::translate(&c, &st, &[tr], &[], &cfg).unwrap();
        // Cash figure includes the ignored money; the headline total does not.
        assert_eq!(plan.receipt.cash, dec!(112.00));
        assert_eq!(c.totals.total_affected, dec!(100.00));
        let plus_line = plan
            .receipt
            .lines
            .iter()
            .find(|l| l.account == alternate)
            .unwrap();
        assert_eq!(plus_line.amount, dec!(-12.00));
        // The money-plus line comes after the diff line.
        let diff_index = plan
            .receipt
            .lines
            .iter()
            .position(|l| l.account == cfg.diff_account)
            .unwrap();
        let plus_index = plan
            .receipt
            .lines
            .iter()
            .position(|l| l.account == alternate)
            .unwrap();
        assert!(plus_index > diff_index);
    }

    #[test]
    fn test_missing_alternate_account_is_an_error() {
        let st = station();
        let cfg = config();
        let tr = terminal(&st, TransferPolicy::Grouped);
        let broken = AmountType {
            id: AmountTypeId::new(),
            name: "Tips".to_string(),
            affects_total: false,
            alternate_account: None,
            adjustments: Vec::new(),
        };
        let mut c = close(&st);
        c.add_terminal_move(TerminalMove {
            terminal: tr.id,
            entries: vec![MoneyTypeEntry {
                money_type: cash_money_type(),
                document: None,
                amounts: vec![AmountEntry {
                    amount_type: broken,
                    amount: dec!(12.00),
                }],
            }],
        })
        .unwrap();
        let result = PostingService::translate(&c, &st, &[tr], &[], &cfg);
        assert!(matches!(
            result,
            Err(PostingError::MissingAlternateAccount { .. })
        ));
    }

    #[test]
    fn test_advance_lines_and_alternate_balancing() {
        let st = station();
        let cfg = config();
        let advance_account = AccountId::new();
        let alternate = AccountId::new();
        let mut c = close(&st);
        c.add_advance_applied(AdvanceApplied {
            advance: AdvanceId::new(),
            party: PartyId::new(),
            account: advance_account,
            amount: dec!(30.00),
            affects_total: false,
            alternate_account: Some(alternate),
        })
        .unwrap();

        let plan = PostingService::translate(&c, &st, &[], &[], &cfg).unwrap();
        let applied: Vec<_> = plan
            .receipt
            .lines
            .iter()
            .filter(|l| l.advance.is_some())
            .collect();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].amount, dec!(-30.00));
        assert_eq!(applied[0].account, advance_account);
        assert_eq!(applied[1].amount, dec!(30.00));
        assert_eq!(applied[1].account, alternate);
    }

    #[test]
    fn test_transfer_partition_grouped_vs_split() {
        let st = station();
        let grouped = terminal(&st, TransferPolicy::Grouped);
        let split = Terminal {
            id: TerminalId::new(),
            station: st.id,
            name: "Card machine".to_string(),
            bank_account: AccountId::new(),
            transfer_policy: TransferPolicy::PerMoneyType,
            active: true,
        };
        let mut c = close(&st);
        // Grouped terminal: two money types -> one transfer of the total.
        c.add_terminal_move(TerminalMove {
            terminal: grouped.id,
            entries: vec![
                MoneyTypeEntry {
                    money_type: cash_money_type(),
                    document: None,
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(60.00),
                    }],
                },
                MoneyTypeEntry {
                    money_type: MoneyType {
                        id: MoneyTypeId::new(),
                        name: "Voucher".to_string(),
                        is_document: false,
                        adjustments: Vec::new(),
                    },
                    document: None,
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(40.00),
                    }],
                },
            ],
        })
        .unwrap();
        // Split terminal: two money types -> two transfers.
        let check_type = MoneyType {
            id: MoneyTypeId::new(),
            name: "Check".to_string(),
            is_document: true,
            adjustments: Vec::new(),
        };
        c.add_terminal_move(TerminalMove {
            terminal: split.id,
            entries: vec![
                MoneyTypeEntry {
                    money_type: cash_money_type(),
                    document: None,
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(25.00),
                    }],
                },
                MoneyTypeEntry {
                    money_type: check_type.clone(),
                    document: Some(DocumentInfo {
                        date: c.date,
                        party: PartyId::new(),
                        reference: None,
                        entity: None,
                    }),
                    amounts: vec![AmountEntry {
                        amount_type: base_type(),
                        amount: dec!(15.00),
                    }],
                },
            ],
        })
        .unwrap();

        let cfg = config();
        let transfers =
            PostingService::partition_transfers(&c, &st, &[grouped.clone(), split.clone()], &cfg)
                .unwrap();
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0].terminal, grouped.id);
        assert_eq!(transfers[0].amount, dec!(100.00));
        // Every transfer settles through the configured clearing account.
        assert!(transfers
            .iter()
            .all(|t| t.clearing_account == cfg.transfer_account));
        assert_eq!(transfers[1].terminal, split.id);
        assert_eq!(transfers[1].amount, dec!(25.00));
        assert!(transfers[1].documents.is_empty());
        assert_eq!(transfers[2].amount, dec!(15.00));
        // The check document rides on its own money type's transfer.
        assert_eq!(transfers[2].documents.len(), 1);
        assert_eq!(transfers[2].documents[0].money_type, check_type.id);
        assert_eq!(transfers[2].from_account, st.cash_account);
        assert_eq!(transfers[2].to_account, split.bank_account);
    }

    #[test]
    fn test_bank_collection_posts_through_clearing_account() {
        let st = station();
        let cfg = config();
        let bank_account = AccountId::new();
        let party = PartyId::new();
        let mut c = close(&st);
        c.assign_sale(SaleSummary {
            id: SaleId::new(),
            total_amount: dec!(60.00),
        })
        .unwrap();
        c.add_bank_collection(BankCollection {
            party,
            date: c.date,
            reference: Some("TXN-17".to_string()),
            description: None,
            bank_account,
            receipt_kind: "bank-in".to_string(),
            amount: dec!(60.00),
            receipt: None,
        })
        .unwrap();

        let plan = PostingService::translate(&c, &st, &[], &[], &cfg).unwrap();

        // The close balances, so the only line is the clearing credit.
        assert_eq!(plan.receipt.lines.len(), 1);
        assert_eq!(plan.receipt.lines[0].amount, dec!(-60.00));
        assert_eq!(plan.receipt.lines[0].account, cfg.transfer_account);
        assert!(plan.receipt.lines[0].description.contains("ACH Ref: TXN-17"));

        // One bank receipt booking the money into the bank account,
        // balanced against the same clearing account.
        assert_eq!(plan.bank_receipts.len(), 1);
        let bank = &plan.bank_receipts[0];
        assert_eq!(bank.account, bank_account);
        assert_eq!(bank.kind, "bank-in");
        assert_eq!(bank.party, party);
        assert_eq!(bank.cash, dec!(60.00));
        assert_eq!(bank.lines.len(), 1);
        assert_eq!(bank.lines[0].amount, dec!(60.00));
        assert_eq!(bank.lines[0].account, cfg.transfer_account);
    }

    #[test]
    fn test_unknown_terminal_is_an_error() {
        let st = station();
        let cfg = config();
        let orphan = terminal(&st, TransferPolicy::Grouped);
        let mut c = close(&st);
        c.add_terminal_move(cash_move(&orphan, dec!(10.00))).unwrap();
        let result = PostingService::translate(&c, &st, &[], &[], &cfg);
        assert!(matches!(result, Err(PostingError::UnknownTerminal { .. })));
    }
}
