//! Collaborator seams the workflow drives.
//!
//! The workflow itself owns no persistence and no sales logic; it talks
//! to these traits and leaves transaction boundaries to the caller.

use chrono::NaiveDate;

use tally_shared::types::{CloseId, InvoiceId, ReceiptId, SaleId, SequenceId, ShipmentId, TransferId};
use tally_shared::AppResult;

use crate::posting::{ReceiptDraft, TransferDraft};

use super::types::SaleDetail;

/// The sales subsystem: sale lifecycle, shipments and invoicing.
pub trait SalesSubsystem {
    /// Returns the given sales to draft.
    fn draft(&mut self, sales: &[SaleId]) -> AppResult<()>;
    /// Quotes the given sales.
    fn quote(&mut self, sales: &[SaleId]) -> AppResult<()>;
    /// Confirms the given sales.
    fn confirm(&mut self, sales: &[SaleId]) -> AppResult<()>;
    /// Processes the given sales (starts fulfilment).
    fn process(&mut self, sales: &[SaleId]) -> AppResult<()>;
    /// Cancels the given sales.
    fn cancel(&mut self, sales: &[SaleId]) -> AppResult<()>;
    /// Reads one sale with its shipments and invoices.
    fn detail(&self, sale: SaleId) -> AppResult<SaleDetail>;
    /// Reserves stock for a waiting shipment.
    fn assign_shipment(&mut self, shipment: ShipmentId) -> AppResult<()>;
    /// Packs an assigned shipment.
    fn pack_shipment(&mut self, shipment: ShipmentId) -> AppResult<()>;
    /// Completes a packed shipment.
    fn complete_shipment(&mut self, shipment: ShipmentId) -> AppResult<()>;
    /// Sets the date on a draft invoice.
    fn set_invoice_date(&mut self, invoice: InvoiceId, date: NaiveDate) -> AppResult<()>;
    /// Posts the given draft invoices.
    fn post_invoices(&mut self, invoices: &[InvoiceId]) -> AppResult<()>;
}

/// Allocates sequential display numbers. Uniqueness is this
/// collaborator's guarantee.
pub trait SequenceService {
    /// Allocates the next number from a sequence.
    fn allocate(&mut self, sequence: SequenceId) -> AppResult<String>;
}

/// The ledger subsystem: receipts and transfers.
pub trait LedgerSubsystem {
    /// Creates a draft receipt from a draft descriptor.
    fn create_receipt(&mut self, draft: &ReceiptDraft) -> AppResult<ReceiptId>;
    /// Confirms the given receipts.
    fn confirm_receipts(&mut self, receipts: &[ReceiptId]) -> AppResult<()>;
    /// Posts the given receipts.
    fn post_receipts(&mut self, receipts: &[ReceiptId]) -> AppResult<()>;
    /// Creates a draft transfer from a draft descriptor.
    fn create_transfer(&mut self, draft: &TransferDraft) -> AppResult<TransferId>;
    /// Confirms the given transfers.
    fn confirm_transfers(&mut self, transfers: &[TransferId]) -> AppResult<()>;
    /// Posts the given transfers.
    fn post_transfers(&mut self, transfers: &[TransferId]) -> AppResult<()>;
}

/// Domain audit trail for close transitions.
pub trait AuditLog {
    /// Records one labeled event over a set of closes under an event key.
    fn write_log(&mut self, label: &str, closes: &[CloseId], key: &str) -> AppResult<()>;
}
