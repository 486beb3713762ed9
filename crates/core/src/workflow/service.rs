//! The close state machine driver.
//!
//! Batch operations validate every close before any side effect, then
//! drive the sales subsystem, allocate numbers, translate into ledger
//! drafts and record the audit trail.

use rust_decimal::Decimal;
use tracing::{debug, info};

use tally_shared::types::{ReceiptId, SaleId, TransferId};

use crate::close::{Close, CloseState};
use crate::config::{CloseConfig, Station, Terminal};
use crate::posting::{InvoiceLineInput, PostingService, TransferDraft};

use super::collab::{AuditLog, LedgerSubsystem, SalesSubsystem, SequenceService};
use super::error::WorkflowError;
use super::types::{InvoiceState, SaleDetail, ShipmentKind, ShipmentState};

/// Drives closes through their lifecycle over generic collaborators.
///
/// Owns no state of its own beyond the collaborators; every operation
/// takes the closes and their configuration explicitly.
pub struct CloseWorkflow<S, Q, L, A> {
    /// Sales subsystem seam.
    pub sales: S,
    /// Display-number allocator.
    pub sequences: Q,
    /// Ledger subsystem seam.
    pub ledger: L,
    /// Domain audit trail.
    pub audit: A,
}

impl<S, Q, L, A> CloseWorkflow<S, Q, L, A>
where
    S: SalesSubsystem,
    Q: SequenceService,
    L: LedgerSubsystem,
    A: AuditLog,
{
    /// Creates a workflow over the given collaborators.
    pub fn new(sales: S, sequences: Q, ledger: L, audit: A) -> Self {
        Self {
            sales,
            sequences,
            ledger,
            audit,
        }
    }

    fn check_transition(close: &Close, to: CloseState) -> Result<(), WorkflowError> {
        if !CloseState::is_valid_transition(close.state, to) {
            return Err(WorkflowError::InvalidTransition {
                from: close.state,
                to,
            });
        }
        Ok(())
    }

    fn sale_ids(closes: &[Close]) -> Vec<SaleId> {
        closes
            .iter()
            .flat_map(|c| c.sales.iter().map(|s| s.id))
            .collect()
    }

    fn close_ids(closes: &[Close]) -> Vec<tally_shared::types::CloseId> {
        closes.iter().map(|c| c.id).collect()
    }

    /// Confirms a batch of draft closes.
    ///
    /// Every close is validated before any side effect: each must be in
    /// draft and have at least one sale assigned. Assigned sales are
    /// quoted, missing display numbers allocated, and the transition
    /// recorded in the audit trail.
    pub fn confirm(
        &mut self,
        closes: &mut [Close],
        config: &CloseConfig,
    ) -> Result<(), WorkflowError> {
        for close in closes.iter() {
            Self::check_transition(close, CloseState::Confirmed)?;
            if close.sales.is_empty() {
                return Err(WorkflowError::NoSales {
                    close: close.rec_name(),
                });
            }
        }

        let sale_ids = Self::sale_ids(closes);
        self.sales.quote(&sale_ids)?;
        self.assign_numbers(closes, config)?;
        for close in closes.iter_mut() {
            close.state = CloseState::Confirmed;
            debug!(close = %close.rec_name(), "close confirmed");
        }

        self.audit
            .write_log("Close confirmed", &Self::close_ids(closes), "confirm")?;
        info!(count = closes.len(), "confirmed closes");
        Ok(())
    }

    /// Allocates display numbers for closes that have none yet.
    ///
    /// Idempotent over already-numbered closes; uniqueness is the
    /// sequence collaborator's guarantee.
    pub fn assign_numbers(
        &mut self,
        closes: &mut [Close],
        config: &CloseConfig,
    ) -> Result<(), WorkflowError> {
        for close in closes.iter_mut() {
            if close.number.is_none() {
                close.number = Some(self.sequences.allocate(config.close_sequence)?);
            }
        }
        Ok(())
    }

    /// Posts a batch of confirmed closes.
    ///
    /// Per close: confirms and processes its sales, runs the
    /// invoice-on-order fulfilment shortcut, gathers the posted
    /// invoices' settlement lines, translates the close into its
    /// receipt and transfer drafts and stores the receipt
    /// back-reference. Receipts and transfers are then confirmed and
    /// posted as batches.
    pub fn post(
        &mut self,
        closes: &mut [Close],
        stations: &[Station],
        terminals: &[Terminal],
        config: &CloseConfig,
    ) -> Result<(), WorkflowError> {
        for close in closes.iter() {
            Self::check_transition(close, CloseState::Posted)?;
        }

        let mut receipt_ids: Vec<ReceiptId> = Vec::new();
        let mut bank_receipt_ids: Vec<ReceiptId> = Vec::new();
        let mut transfer_drafts: Vec<TransferDraft> = Vec::new();
        for close in closes.iter_mut() {
            let sale_ids: Vec<SaleId> = close.sales.iter().map(|s| s.id).collect();
            self.sales.confirm(&sale_ids)?;
            self.sales.process(&sale_ids)?;

            let mut invoice_lines: Vec<InvoiceLineInput> = Vec::new();
            for &sale_id in &sale_ids {
                let detail = self.sales.detail(sale_id)?;
                if detail.invoices_on_order() {
                    self.fulfill_on_order(&detail)?;
                }
                // Re-read: the fulfilment pass may have posted invoices.
                let detail = self.sales.detail(sale_id)?;
                for invoice in &detail.invoices {
                    if invoice.state == InvoiceState::Posted
                        && invoice.amount_to_pay > Decimal::ZERO
                    {
                        invoice_lines.push(InvoiceLineInput {
                            invoice: invoice.id,
                            amount_to_pay: invoice.amount_to_pay,
                            account: invoice.account,
                            party: invoice.party,
                        });
                    }
                }
            }

            let station = stations
                .iter()
                .find(|s| s.id == close.station)
                .ok_or(WorkflowError::UnknownStation {
                    station: close.station,
                })?;
            let plan = PostingService::translate(close, station, terminals, &invoice_lines, config)?;
            let receipt = self.ledger.create_receipt(&plan.receipt)?;
            close.receipt = Some(receipt);
            receipt_ids.push(receipt);
            for (collection, draft) in close.bank_collections.iter_mut().zip(&plan.bank_receipts) {
                let bank_receipt = self.ledger.create_receipt(draft)?;
                collection.receipt = Some(bank_receipt);
                bank_receipt_ids.push(bank_receipt);
            }
            transfer_drafts.extend(plan.transfers);
            close.state = CloseState::Posted;
            debug!(
                close = %close.rec_name(),
                diff = %close.diff(),
                "close posted"
            );
        }

        self.ledger.confirm_receipts(&receipt_ids)?;
        self.ledger.post_receipts(&receipt_ids)?;
        if !bank_receipt_ids.is_empty() {
            self.ledger.confirm_receipts(&bank_receipt_ids)?;
            self.ledger.post_receipts(&bank_receipt_ids)?;
        }

        let mut transfer_ids: Vec<TransferId> = Vec::new();
        for draft in &transfer_drafts {
            transfer_ids.push(self.ledger.create_transfer(draft)?);
        }
        if !transfer_ids.is_empty() {
            self.ledger.confirm_transfers(&transfer_ids)?;
            self.ledger.post_transfers(&transfer_ids)?;
        }

        self.audit
            .write_log("Close posted", &Self::close_ids(closes), "post")?;
        info!(
            count = closes.len(),
            transfers = transfer_ids.len(),
            "posted closes"
        );
        Ok(())
    }

    /// Advances a processing sale's fulfilment when it invoices on
    /// order: a single waiting outbound shipment is driven to done, and
    /// the sale's draft invoices are dated from the sale and posted.
    ///
    /// Sales with more than one shipment are left for manual handling.
    fn fulfill_on_order(&mut self, detail: &SaleDetail) -> Result<(), WorkflowError> {
        if detail.shipments.len() > 1 {
            debug!(sale = %detail.id, "multiple shipments, skipping fulfilment");
            return Ok(());
        }
        if let [shipment] = detail.shipments.as_slice() {
            if shipment.kind == ShipmentKind::Outbound && shipment.state == ShipmentState::Waiting {
                self.sales.assign_shipment(shipment.id)?;
                self.sales.pack_shipment(shipment.id)?;
                self.sales.complete_shipment(shipment.id)?;
            }
        }

        let mut drafts = Vec::new();
        for invoice in &detail.invoices {
            if invoice.state == InvoiceState::Draft {
                if invoice.invoice_date.is_none() {
                    self.sales.set_invoice_date(invoice.id, detail.sale_date)?;
                }
                drafts.push(invoice.id);
            }
        }
        if !drafts.is_empty() {
            self.sales.post_invoices(&drafts)?;
        }
        Ok(())
    }

    /// Cancels a batch of confirmed closes, cancelling their sales.
    pub fn cancel(&mut self, closes: &mut [Close]) -> Result<(), WorkflowError> {
        for close in closes.iter() {
            Self::check_transition(close, CloseState::Cancelled)?;
        }

        let sale_ids = Self::sale_ids(closes);
        self.sales.cancel(&sale_ids)?;
        for close in closes.iter_mut() {
            close.state = CloseState::Cancelled;
            debug!(close = %close.rec_name(), "close cancelled");
        }

        self.audit
            .write_log("Close cancelled", &Self::close_ids(closes), "cancel")?;
        Ok(())
    }

    /// Reopens a batch of cancelled closes back to draft, re-drafting
    /// their sales. Display numbers, once assigned, are kept.
    pub fn reopen(&mut self, closes: &mut [Close]) -> Result<(), WorkflowError> {
        for close in closes.iter() {
            Self::check_transition(close, CloseState::Draft)?;
        }

        let sale_ids = Self::sale_ids(closes);
        self.sales.draft(&sale_ids)?;
        for close in closes.iter_mut() {
            close.state = CloseState::Draft;
            debug!(close = %close.rec_name(), "close reopened");
        }

        self.audit
            .write_log("Close reopened", &Self::close_ids(closes), "draft")?;
        Ok(())
    }

    /// Guards deletion: only draft closes may be deleted. A blocked
    /// attempt is recorded in the audit trail before failing.
    pub fn delete(&mut self, close: &Close) -> Result<(), WorkflowError> {
        if close.state != CloseState::Draft {
            self.audit
                .write_log("Delete attempt", &[close.id], "delete")?;
            return Err(WorkflowError::DeleteNonDraft {
                close: close.rec_name(),
            });
        }
        Ok(())
    }
}
