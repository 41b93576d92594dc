//! Error types for the prompt flows.
//!
//! Store failures are caught per sub-flow and turned into
//! [`FlowOutcome::Failed`](crate::FlowOutcome::Failed); everything that
//! escapes a sub-flow ends the session.

use emptrack_core::CoreError;
use thiserror::Error;

use crate::prompt::PromptError;
use crate::questions::Field;

/// A result type using `FlowError`.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors that can occur while driving a prompt session.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] emptrack_store::StoreError),

    /// The terminal went away or could not be read.
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// An answer reached a parser without passing its rule first.
    #[error("invalid answer: {0}")]
    Invalid(#[from] CoreError),

    /// A sub-flow read an answer it never asked for.
    #[error("no answer recorded for {0:?}")]
    MissingAnswer(Field),
}

impl FlowError {
    /// Returns true if the session should end quietly.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Prompt(PromptError::Closed))
    }
}
