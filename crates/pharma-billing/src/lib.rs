//! # pharma-billing: Invoice Settlement Workflow
//!
//! Library-style workflow crate sitting between the UI shell and storage:
//!
//! ```text
//!   UI shell (external)
//!        │  settle(cart, customer, payment, biller)
//!        ▼
//!   SettlementEngine          precondition checks, totals, invoice number,
//!        │                    ordered header → items → stock writes
//!        ▼
//!   SettlementStore (trait)   implemented by pharma-db over SQLite,
//!                             and by an in-memory spy in tests
//! ```
//!
//! All errors are recovered at the UI boundary: the failure is displayed and
//! the cart/form state stays intact for correction. The engine never
//! retries; a failure after the header write is surfaced distinctly as
//! [`SettlementError::PartialSettlement`] so the operator knows the stored
//! state needs manual reconciliation.

pub mod error;
pub mod settlement;
pub mod store;

pub use error::{SettlementError, SettlementResult};
pub use settlement::{Biller, CustomerDetails, Payment, SettledInvoice, SettlementEngine};
pub use store::{SettlementStore, StoreError, StoreResult};
