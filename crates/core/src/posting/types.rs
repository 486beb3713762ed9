//! Receipt/transfer drafts and line descriptors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::{
    AccountId, AdvanceId, Currency, InvoiceId, MoneyTypeId, PartyId, TerminalId,
};

/// One ledger line descriptor inside a receipt draft.
///
/// Sign convention, relative to the close: revenue claims are positive,
/// collections routed to their own accounts are negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Human-readable description, stable for audit reports.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// The account this line posts against.
    pub account: AccountId,
    /// Optional counterparty.
    pub party: Option<PartyId>,
    /// Originating invoice, for invoice settlement lines.
    pub invoice: Option<InvoiceId>,
    /// Originating advance balance, for advance lines.
    pub advance: Option<AdvanceId>,
}

/// A physical document (check, draft) collected during the shift,
/// tagged with its originating money type so the transfer pass can
/// reassign it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSlip {
    /// The money type the document was collected under.
    pub money_type: MoneyTypeId,
    /// The party the document is drawn on.
    pub party: PartyId,
    /// Document date.
    pub date: NaiveDate,
    /// External reference.
    pub reference: Option<String>,
    /// Issuing entity.
    pub entity: Option<String>,
    /// Document amount.
    pub amount: Decimal,
}

/// Description of the single ledger receipt a posted close produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDraft {
    /// Receipt date, taken from the close.
    pub date: NaiveDate,
    /// The station's cash account the receipt draws on.
    pub account: AccountId,
    /// Receipt kind label from the station configuration.
    pub kind: String,
    /// The company's default sale counterparty.
    pub party: PartyId,
    /// Receipt description.
    pub description: String,
    /// Aggregated cash figure over non-document money types.
    pub cash: Decimal,
    /// Documents collected during the shift.
    pub documents: Vec<DocumentSlip>,
    /// Ordered line descriptors.
    pub lines: Vec<ReceiptLine>,
}

/// Description of one ledger transfer moving a terminal's collections
/// from the station cash account to the terminal's bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDraft {
    /// Transfer date, taken from the close.
    pub date: NaiveDate,
    /// Transfer currency.
    pub currency: Currency,
    /// Source account (station cash).
    pub from_account: AccountId,
    /// Target account (terminal bank).
    pub to_account: AccountId,
    /// The terminal this transfer settles.
    pub terminal: TerminalId,
    /// Clearing account the transfer total is posted through.
    pub clearing_account: AccountId,
    /// Transferred amount.
    pub amount: Decimal,
    /// Transfer description.
    pub description: String,
    /// Documents reassigned to this transfer, matched by money type.
    pub documents: Vec<DocumentSlip>,
}

/// An invoice settlement line gathered from the sales subsystem before
/// translation. These become the first lines of the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineInput {
    /// The posted invoice.
    pub invoice: InvoiceId,
    /// The invoice's outstanding amount.
    pub amount_to_pay: Decimal,
    /// The invoice's receivable account.
    pub account: AccountId,
    /// The invoiced party.
    pub party: PartyId,
}

/// The full posting output for one close: the close receipt, one bank
/// receipt per electronic collection, and one-or-many transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingPlan {
    /// The receipt draft.
    pub receipt: ReceiptDraft,
    /// Bank receipt drafts, one per electronic bank collection, in
    /// collection order.
    pub bank_receipts: Vec<ReceiptDraft>,
    /// Transfer drafts, one-or-many per terminal according to policy.
    pub transfers: Vec<TransferDraft>,
}
