//! The close aggregate and its owned collection records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::{
    AccountId, AdvanceId, CloseId, CompanyId, Currency, PartyId, ReceiptId, SaleId, StationId,
    TerminalId,
};

use crate::config::MoneyType;

use super::error::CloseError;
use super::totals::CloseTotals;

/// Lifecycle state of a close.
///
/// The valid transitions are:
/// - Draft → Confirmed (confirm)
/// - Confirmed → Posted (post)
/// - Confirmed → Cancelled (cancel)
/// - Cancelled → Draft (reopen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseState {
    /// The close is being drafted and can be modified freely.
    Draft,
    /// The close is confirmed; its collections are locked.
    Confirmed,
    /// The close is posted to the ledger (immutable).
    Posted,
    /// The close has been cancelled; it can be reopened to draft.
    Cancelled,
}

impl CloseState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Posted => "posted",
            Self::Cancelled => "cancel",
        }
    }

    /// Returns true if the close's collections can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the close is fully immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Check if a state transition is in the machine's edge set.
    #[must_use]
    pub fn is_valid_transition(from: CloseState, to: CloseState) -> bool {
        matches!(
            (from, to),
            (CloseState::Draft, CloseState::Confirmed)
                | (CloseState::Confirmed, CloseState::Posted | CloseState::Cancelled)
                | (CloseState::Cancelled, CloseState::Draft)
        )
    }
}

impl std::fmt::Display for CloseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document metadata for physical-instrument collections (checks, drafts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document date.
    pub date: NaiveDate,
    /// The party the document is drawn on.
    pub party: PartyId,
    /// External reference (check number, draft id).
    pub reference: Option<String>,
    /// Issuing entity (bank name).
    pub entity: Option<String>,
}

/// One named sub-amount inside a money-type entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountEntry {
    /// The globally configured amount type this entry belongs to.
    pub amount_type: crate::config::AmountType,
    /// The collected amount, quantized to the close's currency.
    pub amount: Decimal,
}

/// One money type's collection within a terminal move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyTypeEntry {
    /// The money type collected.
    pub money_type: MoneyType,
    /// Document metadata; present exactly when the money type is a document.
    pub document: Option<DocumentInfo>,
    /// The named sub-amounts collected.
    pub amounts: Vec<AmountEntry>,
}

impl MoneyTypeEntry {
    /// Validates the document-metadata invariant.
    pub fn validate(&self) -> Result<(), CloseError> {
        if self.money_type.is_document && self.document.is_none() {
            return Err(CloseError::DocumentInfoRequired {
                money_type: self.money_type.name.clone(),
            });
        }
        if !self.money_type.is_document && self.document.is_some() {
            return Err(CloseError::DocumentInfoNotAllowed {
                money_type: self.money_type.name.clone(),
            });
        }
        Ok(())
    }
}

/// One terminal's submitted collections for a close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalMove {
    /// The submitting terminal.
    pub terminal: TerminalId,
    /// Collections per money type.
    pub entries: Vec<MoneyTypeEntry>,
}

/// Weak reference to a sale assigned to a close.
///
/// The sales subsystem owns the sale; the close only needs its total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleSummary {
    /// The sale's identifier in the sales subsystem.
    pub id: SaleId,
    /// The sale's total amount.
    pub total_amount: Decimal,
}

/// Money a customer still owes after the shift (reduces collections).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerReceivable {
    /// The owing party.
    pub party: PartyId,
    /// The party's receivable account.
    pub account: AccountId,
    /// Amount owed.
    pub amount: Decimal,
    /// Free-text description carried into the ledger line.
    pub description: Option<String>,
}

/// Money owed back to a customer (increases collections).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPayable {
    /// The party owed.
    pub party: PartyId,
    /// The party's payable account.
    pub account: AccountId,
    /// Amount owed.
    pub amount: Decimal,
    /// Free-text description carried into the ledger line.
    pub description: Option<String>,
}

/// Money taken in advance of a sale that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceCollected {
    /// Identifier of the advance balance this collection opens.
    pub advance: AdvanceId,
    /// The paying party.
    pub party: PartyId,
    /// The advance's posting account.
    pub account: AccountId,
    /// Amount collected.
    pub amount: Decimal,
}

/// An electronic (ACH) collection landing directly in a bank account
/// instead of the register.
///
/// Counts toward the reconciliation total like a terminal collection,
/// but posts through the clearing account: the close receipt carries a
/// negative clearing line and a dedicated bank receipt books the money
/// into the collection's bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankCollection {
    /// The paying party.
    pub party: PartyId,
    /// Value date of the electronic transfer.
    pub date: NaiveDate,
    /// External reference (transaction id).
    pub reference: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// The bank account the money arrived in.
    pub bank_account: AccountId,
    /// Receipt kind label forwarded to the ledger subsystem.
    pub receipt_kind: String,
    /// Collected amount.
    pub amount: Decimal,
    /// The bank receipt produced by posting, once posted.
    pub receipt: Option<ReceiptId>,
}

impl BankCollection {
    /// Display label carried into the ledger lines.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = "ACH".to_string();
        if let Some(reference) = &self.reference {
            label.push_str(" Ref: ");
            label.push_str(reference);
        }
        if let Some(description) = &self.description {
            label.push_str(" - ");
            label.push_str(description);
        }
        label
    }
}

/// Application of an outstanding advance balance against this shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceApplied {
    /// The originating advance balance.
    pub advance: AdvanceId,
    /// The party whose advance is applied.
    pub party: PartyId,
    /// The originating advance's own posting account.
    pub account: AccountId,
    /// Amount applied.
    pub amount: Decimal,
    /// Whether this application counts toward the reconciliation total.
    pub affects_total: bool,
    /// Where the amount is recorded instead when it does not affect the
    /// total.
    pub alternate_account: Option<AccountId>,
}

/// One register-shift reconciliation record.
///
/// Owns its collection records (terminal moves, receivables, payables,
/// advances); weakly references the sales assigned to it and the ledger
/// receipt it produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Close {
    /// Unique identifier.
    pub id: CloseId,
    /// Owning company.
    pub company: CompanyId,
    /// The station this shift ran on.
    pub station: StationId,
    /// The close's currency; all owned amounts are quantized to it.
    pub currency: Currency,
    /// Sequential display number, assigned at confirmation.
    pub number: Option<String>,
    /// Business date of the shift.
    pub date: NaiveDate,
    /// Free-text note.
    pub note: Option<String>,
    /// Lifecycle state.
    pub state: CloseState,
    /// Sales assigned to this close.
    pub sales: Vec<SaleSummary>,
    /// Terminal collection records.
    pub terminal_moves: Vec<TerminalMove>,
    /// Customer receivable records.
    pub receivables: Vec<CustomerReceivable>,
    /// Customer payable records.
    pub payables: Vec<CustomerPayable>,
    /// Advance collections taken during the shift.
    pub advances_collected: Vec<AdvanceCollected>,
    /// Advance applications consumed during the shift.
    pub advances_applied: Vec<AdvanceApplied>,
    /// Electronic collections received directly in bank accounts.
    pub bank_collections: Vec<BankCollection>,
    /// Cached derived totals, refreshed on every structural mutation.
    pub totals: CloseTotals,
    /// The ledger receipt produced by posting, once posted.
    pub receipt: Option<ReceiptId>,
}

impl Close {
    /// Creates a new draft close for a station.
    #[must_use]
    pub fn new(company: CompanyId, station: StationId, currency: Currency, date: NaiveDate) -> Self {
        Self {
            id: CloseId::new(),
            company,
            station,
            currency,
            number: None,
            date,
            note: None,
            state: CloseState::Draft,
            sales: Vec::new(),
            terminal_moves: Vec::new(),
            receivables: Vec::new(),
            payables: Vec::new(),
            advances_collected: Vec::new(),
            advances_applied: Vec::new(),
            bank_collections: Vec::new(),
            totals: CloseTotals::default(),
            receipt: None,
        }
    }

    /// Human-readable identifier: the display number once assigned, the
    /// raw id before that. Used in every user-facing error message.
    #[must_use]
    pub fn rec_name(&self) -> String {
        self.number.clone().unwrap_or_else(|| self.id.to_string())
    }

    fn ensure_editable(&self) -> Result<(), CloseError> {
        if !self.state.is_editable() {
            return Err(CloseError::NotEditable {
                close: self.rec_name(),
            });
        }
        Ok(())
    }

    /// Assigns a sale to this close.
    pub fn assign_sale(&mut self, sale: SaleSummary) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.sales.push(sale);
        self.refresh_totals();
        Ok(())
    }

    /// Releases a sale from this close.
    pub fn release_sale(&mut self, sale: SaleId) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.sales.retain(|s| s.id != sale);
        self.refresh_totals();
        Ok(())
    }

    /// Adds a terminal collection record, validating its entries.
    pub fn add_terminal_move(&mut self, terminal_move: TerminalMove) -> Result<(), CloseError> {
        self.ensure_editable()?;
        for entry in &terminal_move.entries {
            entry.validate()?;
        }
        self.terminal_moves.push(terminal_move);
        self.refresh_totals();
        Ok(())
    }

    /// Adds a customer receivable record.
    pub fn add_receivable(&mut self, receivable: CustomerReceivable) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.receivables.push(receivable);
        self.refresh_totals();
        Ok(())
    }

    /// Adds a customer payable record.
    pub fn add_payable(&mut self, payable: CustomerPayable) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.payables.push(payable);
        self.refresh_totals();
        Ok(())
    }

    /// Adds an advance collection record.
    pub fn add_advance_collected(&mut self, advance: AdvanceCollected) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.advances_collected.push(advance);
        self.refresh_totals();
        Ok(())
    }

    /// Adds an advance application record.
    pub fn add_advance_applied(&mut self, applied: AdvanceApplied) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.advances_applied.push(applied);
        self.refresh_totals();
        Ok(())
    }

    /// Adds an electronic bank collection record.
    pub fn add_bank_collection(&mut self, collection: BankCollection) -> Result<(), CloseError> {
        self.ensure_editable()?;
        self.bank_collections.push(collection);
        self.refresh_totals();
        Ok(())
    }

    /// Recomputes and caches the derived totals.
    pub fn refresh_totals(&mut self) {
        self.totals = CloseTotals::compute(self);
    }

    /// The cached reconciliation delta.
    #[must_use]
    pub fn diff(&self) -> Decimal {
        self.totals.diff
    }
}
