//! Translation errors.

use tally_shared::types::TerminalId;
use thiserror::Error;

/// Errors raised while translating a close into ledger drafts.
///
/// These are configuration errors: the close references setup records the
/// caller failed to supply or left inconsistent.
#[derive(Debug, Error)]
pub enum PostingError {
    /// A terminal move references a terminal not in the supplied set.
    #[error("Terminal {terminal} is not configured for this station")]
    UnknownTerminal {
        /// The unresolved terminal reference.
        terminal: TerminalId,
    },

    /// A non-affecting amount entry has no alternate account to post to.
    #[error("Amount type '{amount_type}' requires an alternate account to post against")]
    MissingAlternateAccount {
        /// The offending amount type's name.
        amount_type: String,
    },

    /// A non-affecting advance application has no alternate account.
    #[error("Advance application for close {close} requires an alternate account")]
    MissingAdvanceAlternateAccount {
        /// The close's human-readable identifier.
        close: String,
    },
}
