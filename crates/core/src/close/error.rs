//! Close-level validation errors.

use thiserror::Error;

/// Errors raised when mutating a close or its owned collections.
#[derive(Debug, Error)]
pub enum CloseError {
    /// Collections can only be edited while the close is in draft.
    #[error("Close {close} is not in draft and cannot be modified")]
    NotEditable {
        /// The close's human-readable identifier.
        close: String,
    },

    /// A document money type was submitted without document metadata.
    #[error("Money type '{money_type}' is a document and requires document details")]
    DocumentInfoRequired {
        /// The money type's name.
        money_type: String,
    },

    /// Document metadata was submitted for a non-document money type.
    #[error("Money type '{money_type}' is not a document and cannot carry document details")]
    DocumentInfoNotAllowed {
        /// The money type's name.
        money_type: String,
    },
}
