//! Commerce error types.

use thiserror::Error;

use crate::booking::BookingErrors;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Checkout attempted with zero items.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Price text could not be read as a non-negative amount.
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Persisted state could not be read back.
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// One or more booking form fields were rejected.
    #[error("Invalid booking: {0}")]
    InvalidBooking(BookingErrors),
}

impl From<glowup_cache::CacheError> for CommerceError {
    fn from(e: glowup_cache::CacheError) -> Self {
        match e {
            glowup_cache::CacheError::SerializeError(e) => {
                CommerceError::MalformedPersistedState(e.to_string())
            }
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}
