//! Close lifecycle state machine.
//!
//! Drives batches of closes through draft, confirmed, posted and
//! cancelled, orchestrating the sales and ledger subsystems through
//! collaborator traits. All context is explicit; atomicity belongs to
//! the caller's transaction boundary.
//!
//! # Modules
//!
//! - `types` - Snapshots of external sales/shipment/invoice records
//! - `collab` - Collaborator traits
//! - `error` - Workflow errors
//! - `service` - The state machine driver

pub mod collab;
pub mod error;
pub mod service;
pub mod types;

pub use collab::{AuditLog, LedgerSubsystem, SalesSubsystem, SequenceService};
pub use error::WorkflowError;
pub use service::CloseWorkflow;
pub use types::{
    FulfillmentPolicy, InvoiceInfo, InvoiceState, SaleDetail, SaleState, ShipmentInfo,
    ShipmentKind, ShipmentState,
};
