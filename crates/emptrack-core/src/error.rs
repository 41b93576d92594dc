//! Common error types for emptrack.
//!
//! This module provides shared error types that are used across multiple crates.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur throughout the employee tracker.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An answer failed its validation rule.
    #[error(transparent)]
    Validation(#[from] crate::validate::ValidationError),

    /// An invalid identifier was provided.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] crate::ids::IdError),
}
