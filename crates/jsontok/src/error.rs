//! Tokenizer error signals.

use thiserror::Error;

/// Why a scan stopped before the end of the document.
///
/// Every error is reported through `Result`; the tokenizer never
/// panics on malformed input. [`Capacity`] and [`Truncated`] leave the
/// retained [`Tokenizer`](crate::Tokenizer) state positioned so the
/// caller can supply a larger pool or more input and resume; after
/// [`Invalid`] the tokens up to the last successfully closed one are
/// trustworthy, but the parse cannot continue.
///
/// [`Capacity`]: TokenizeError::Capacity
/// [`Invalid`]: TokenizeError::Invalid
/// [`Truncated`]: TokenizeError::Truncated
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// The token pool has no free slot for a token that would otherwise
    /// have been accepted. The cursor and the next-token index are left
    /// exactly where they were before the failing token began.
    #[error("token pool exhausted")]
    Capacity,
    /// A malformed character or escape, or a token that violates the
    /// current grammar expectation.
    #[error("invalid character or unexpected token")]
    Invalid,
    /// The input ended mid-string, mid-primitive, or with containers
    /// still open.
    #[error("input ended before the document was complete")]
    Truncated,
}

impl TokenizeError {
    /// Whether re-invoking with more pool capacity or more input can
    /// continue the parse.
    #[must_use]
    pub fn is_recoverable(self) -> bool {
        !matches!(self, TokenizeError::Invalid)
    }
}
