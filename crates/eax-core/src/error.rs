//! Error types for EAX operations.

use thiserror::Error;

/// Errors returned by the OMAC, CTR and EAX state machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation was attempted before the state was initialised, or after
    /// it was cleared.
    #[error("{operation} called before init")]
    Uninitialized {
        /// The rejected operation
        operation: &'static str,
    },

    /// An authentication operation was attempted after the digest was taken.
    #[error("{operation} called after digest")]
    Finalized {
        /// The rejected operation
        operation: &'static str,
    },

    /// The computed tag does not match the expected one.
    #[error("authentication failed")]
    TagMismatch,

    /// The expected tag is empty or longer than a block.
    #[error("invalid tag length: expected 1..={max} bytes, got {actual}")]
    InvalidTagLength {
        /// Block size of the cipher
        max: usize,
        /// Length of the supplied tag
        actual: usize,
    },
}

impl Error {
    /// Returns true if the error reports caller misuse of a state machine
    /// rather than a property of the message.
    pub fn is_misuse(&self) -> bool {
        match self {
            Self::Uninitialized { .. } | Self::Finalized { .. } => true,
            Self::InvalidTagLength { .. } => true,
            Self::TagMismatch => false,
        }
    }
}
