//! Snapshots of external records the workflow consults.
//!
//! The sales subsystem owns sales, shipments and invoices; the workflow
//! only reads these read-only views to decide what to drive next.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::{AccountId, InvoiceId, PartyId, SaleId, ShipmentId};

/// Lifecycle state of a sale in the sales subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleState {
    /// Being drafted.
    Draft,
    /// Quoted, awaiting confirmation.
    Quotation,
    /// Confirmed by the customer.
    Confirmed,
    /// Being fulfilled.
    Processing,
    /// Fully fulfilled and invoiced.
    Done,
    /// Cancelled.
    Cancelled,
}

/// When a sale triggers invoicing or shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentPolicy {
    /// Triggered when the order is confirmed.
    OnOrder,
    /// Triggered when the shipment completes.
    OnShipment,
    /// Driven by hand.
    Manual,
}

/// Direction of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentKind {
    /// Goods leaving the company.
    Outbound,
    /// Goods coming back.
    Return,
}

/// Fulfilment state of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentState {
    /// Created, stock not yet reserved.
    Waiting,
    /// Stock reserved.
    Assigned,
    /// Goods packed.
    Packed,
    /// Delivered.
    Done,
    /// Cancelled.
    Cancelled,
}

/// Read-only view of one shipment attached to a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentInfo {
    /// The shipment's identifier.
    pub id: ShipmentId,
    /// Shipment direction.
    pub kind: ShipmentKind,
    /// Current fulfilment state.
    pub state: ShipmentState,
}

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    /// Being drafted.
    Draft,
    /// Validated, not yet posted.
    Validated,
    /// Posted to the ledger.
    Posted,
    /// Fully paid.
    Paid,
    /// Cancelled.
    Cancelled,
}

/// Read-only view of one invoice attached to a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInfo {
    /// The invoice's identifier.
    pub id: InvoiceId,
    /// Current lifecycle state.
    pub state: InvoiceState,
    /// Invoice date, if already set.
    pub invoice_date: Option<NaiveDate>,
    /// Outstanding amount.
    pub amount_to_pay: Decimal,
    /// The invoice's receivable account.
    pub account: AccountId,
    /// The invoiced party.
    pub party: PartyId,
}

/// Read-only view of one sale and its fulfilment records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    /// The sale's identifier.
    pub id: SaleId,
    /// Current lifecycle state.
    pub state: SaleState,
    /// Order date; draft invoices created by the sale are dated from it.
    pub sale_date: NaiveDate,
    /// When the sale invoices.
    pub invoice_policy: FulfillmentPolicy,
    /// When the sale ships.
    pub shipment_policy: FulfillmentPolicy,
    /// Shipments attached to the sale.
    pub shipments: Vec<ShipmentInfo>,
    /// Invoices attached to the sale.
    pub invoices: Vec<InvoiceInfo>,
}

impl SaleDetail {
    /// A sale takes the invoice-on-order shortcut when both policies
    /// fire on order and the sale is already processing.
    #[must_use]
    pub fn invoices_on_order(&self) -> bool {
        self.invoice_policy == FulfillmentPolicy::OnOrder
            && self.shipment_policy == FulfillmentPolicy::OnOrder
            && self.state == SaleState::Processing
    }
}
