//! Translation of a posted close into ledger line items and transfers.
//!
//! Pure transformation: the close's in-memory contribution graph becomes an
//! ordered list of receipt line descriptors plus a partition of terminal
//! collections into transfer drafts. Line order is deterministic and
//! audit-stable.
//!
//! # Modules
//!
//! - `types` - Receipt/transfer drafts and line descriptors
//! - `error` - Translation errors
//! - `service` - The translator

pub mod error;
pub mod service;
pub mod types;

pub use error::PostingError;
pub use service::PostingService;
pub use types::{
    DocumentSlip, InvoiceLineInput, PostingPlan, ReceiptDraft, ReceiptLine, TransferDraft,
};
