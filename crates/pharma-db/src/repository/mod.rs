//! # Repository Module
//!
//! Database repository implementations for Pharma POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Caller (settlement engine, seed binary, future app layer)          │
//! │       │                                                             │
//! │       │  db.medicines().list_available()                            │
//! │       ▼                                                             │
//! │  MedicineRepository / InvoiceRepository                             │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • Clean separation of concerns                                     │
//! │  • SQL is isolated in one place                                     │
//! │  • Can swap database implementations                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MedicineRepository`] - Catalog reads, stock decrements, alert queries
//! - [`InvoiceRepository`] - Invoice header and line item persistence
//! - [`VendorRepository`] - Supplier records referenced by catalog rows
//!
//! [`MedicineRepository`]: medicine::MedicineRepository
//! [`InvoiceRepository`]: invoice::InvoiceRepository
//! [`VendorRepository`]: vendor::VendorRepository

pub mod invoice;
pub mod medicine;
pub mod vendor;
