//! # Settlement Store Trait
//!
//! The persistence seam the settlement engine writes through. pharma-db
//! implements it over SQLite; tests implement it with an in-memory spy.
//!
//! The engine calls the three operations in a fixed order (header, then
//! items, then stock). The ordering is part of the settlement contract:
//! a failure mid-sequence leaves the most recoverable partial state: an
//! orphaned header with no items is easy to detect and clean up, decremented
//! stock with no invoice is not.

use async_trait::async_trait;
use thiserror::Error;

use pharma_core::types::{Invoice, NewInvoice, NewInvoiceItem};

/// Storage failures as seen by the settlement engine.
///
/// The engine does not retry; retry policy, if any, belongs to the storage
/// collaborator behind the trait.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The conditional stock decrement found fewer units than requested.
    /// Closes the cross-session oversell race at the storage layer.
    #[error("insufficient stock for medicine {medicine_id}: requested {requested}")]
    InsufficientStock { medicine_id: String, requested: i64 },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Any other storage failure, with the backend's message.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the settlement sequence needs.
///
/// Implementations must treat each call as an independent durable write;
/// the engine awaits each before issuing the next.
#[async_trait]
pub trait SettlementStore {
    /// Persists the invoice header and returns the stored row with its
    /// assigned identity.
    async fn persist_invoice(&self, invoice: &NewInvoice) -> StoreResult<Invoice>;

    /// Persists one row per cart line under the given invoice id.
    async fn persist_items(&self, invoice_id: &str, items: &[NewInvoiceItem]) -> StoreResult<()>;

    /// Decrements a medicine's stock by `quantity`, failing with
    /// [`StoreError::InsufficientStock`] rather than going negative.
    async fn decrement_stock(&self, medicine_id: &str, quantity: i64) -> StoreResult<()>;
}
