//! # Settlement Error Taxonomy
//!
//! Precondition failures abort with no side effects; storage failures are
//! split on whether the invoice header had already been written, because the
//! operator's next step differs: a pre-header failure can simply be retried,
//! a post-header failure needs manual reconciliation.

use thiserror::Error;

use pharma_core::Money;

use crate::store::StoreError;

/// Errors from [`crate::settlement::SettlementEngine::settle`].
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Customer name was blank.
    #[error("customer name is required")]
    MissingCustomerName,

    /// Customer phone was provided but is not 10-12 digits.
    #[error("phone number must be 10-12 digits with no other characters")]
    InvalidPhone,

    /// Cash tendered is below the grand total.
    #[error("amount received {received} is less than total {required}")]
    InsufficientAmount { received: Money, required: Money },

    /// A storage step failed before the invoice header was written. No
    /// partial state exists; the operator can correct and retry.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A storage step failed after the invoice header was written. The
    /// header exists without complete items/stock updates; surfaced
    /// distinctly so the operator knows manual reconciliation is needed.
    #[error(
        "settlement of invoice {invoice_number} is incomplete after the header was written: {source}"
    )]
    PartialSettlement {
        invoice_number: String,
        invoice_id: String,
        #[source]
        source: StoreError,
    },
}

/// Result alias for settlement operations.
pub type SettlementResult<T> = Result<T, SettlementError>;
