//! # Domain Error Types
//!
//! Typed errors for the pure business logic. The storage layer and the
//! settlement engine define their own error enums in their own crates;
//! everything surfaces at the UI boundary as a displayed message with the
//! form state left intact, so nothing here is fatal.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity was zero or negative.
    #[error("quantity must be positive, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// The merged quantity for a medicine would exceed its current stock.
    ///
    /// `requested` is the total after merging with any existing cart line,
    /// not just the increment that triggered the failure.
    #[error("not enough stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures, raised before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Customer phone number is not 10-12 ASCII digits.
    #[error("phone number must be 10-12 digits with no other characters")]
    InvalidPhone,

    /// A percentage is outside the 0-100% range.
    #[error("{field} must be between 0% and 100%, got {bps} bps")]
    RateOutOfRange { field: &'static str, bps: u32 },

    /// A monetary value is negative where it may not be.
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
