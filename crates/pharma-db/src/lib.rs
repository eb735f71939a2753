//! # pharma-db: Database Layer for Pharma POS
//!
//! This crate provides database access for the Pharma POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Pharma POS Data Flow                           │
//! │                                                                     │
//! │  SettlementEngine (pharma-billing)                                  │
//! │       │                                                             │
//! │       │  SettlementStore trait                                      │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  pharma-db (THIS CRATE)                       │  │
//! │  │                                                               │  │
//! │  │  ┌──────────────┐   ┌────────────────┐   ┌──────────────┐     │  │
//! │  │  │   Database   │   │  Repositories  │   │  Migrations  │     │  │
//! │  │  │  (pool.rs)   │◄──│ (medicine.rs,  │   │  (embedded)  │     │  │
//! │  │  │  SqlitePool  │   │  invoice.rs)   │   │ 001_init.sql │     │  │
//! │  │  └──────────────┘   └────────────────┘   └──────────────┘     │  │
//! │  │                                                               │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite Database (pharma.db, WAL mode)                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (medicine, invoice)
//! - [`store`] - [`SettlementStore`](pharma_billing::SettlementStore) impl
//!   for [`Database`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pharma_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/pharma.db");
//! let db = Database::new(config).await?;
//!
//! // Billing catalog
//! let catalog = db.medicines().list_available().await?;
//!
//! // Settle through the engine
//! let engine = SettlementEngine::new(db.clone());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::invoice::InvoiceRepository;
pub use repository::medicine::MedicineRepository;
pub use repository::vendor::VendorRepository;
