//! Close workflow errors.

use thiserror::Error;

use tally_shared::types::StationId;
use tally_shared::AppError;

use crate::close::CloseState;
use crate::posting::PostingError;

/// Errors raised while driving closes through their lifecycle.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The requested edge is not in the state machine's set.
    #[error("Cannot move a close from '{from}' to '{to}'")]
    InvalidTransition {
        /// The close's current state.
        from: CloseState,
        /// The requested target state.
        to: CloseState,
    },

    /// A close cannot be confirmed without at least one sale.
    #[error("Close {close} has no sales assigned and cannot be confirmed")]
    NoSales {
        /// The close's human-readable identifier.
        close: String,
    },

    /// Only draft closes may be deleted.
    #[error("Close {close} is not a draft and cannot be deleted")]
    DeleteNonDraft {
        /// The close's human-readable identifier.
        close: String,
    },

    /// A close references a station not in the supplied set.
    #[error("Station {station} is not configured")]
    UnknownStation {
        /// The unresolved station reference.
        station: StationId,
    },

    /// Translation into ledger drafts failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// A collaborator call failed.
    #[error(transparent)]
    Collaborator(#[from] AppError),
}
