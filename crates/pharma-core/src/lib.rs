//! # pharma-core: Pure Business Logic for Pharma POS
//!
//! Everything in this crate is a deterministic function over its inputs:
//! pricing arithmetic, cart aggregation with the prescription gate, and the
//! stock/expiry status classifier. No database, no network, no file system.
//!
//! ## Architecture Position
//! ```text
//!   UI shell (external)
//!        │
//!        ▼
//!   pharma-billing ── Invoice Settlement Engine (async workflow)
//!        │
//!        ▼
//!   pharma-core  ★ THIS CRATE ★
//!     money      integer paise + basis points, single rounding point
//!     pricing    discount / subtotal / tax arithmetic
//!     status     Expired > Near Expiry > Out of Stock > Low Stock > In Stock
//!     cart       line merging, stock limits, prescription gate
//!     validation phone / name / rate boundary checks
//!        │
//!        ▼
//!   pharma-db ── SQLite repositories
//! ```
//!
//! ## Example
//! ```rust
//! use pharma_core::money::{Money, Rate};
//! use pharma_core::pricing;
//!
//! // ₹100 unit price, 10% discount, quantity 2
//! let subtotal = pricing::line_subtotal(Money::from_rupees(100), Rate::from_bps(1_000), 2);
//! assert_eq!(subtotal.paise(), 18_000);
//!
//! // 12% tax on the discounted subtotal
//! let tax = pricing::line_tax_amount(subtotal, Rate::from_bps(1_200));
//! assert_eq!(tax.paise(), 2_160);
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod status;
pub mod types;
pub mod validation;

// Convenience re-exports: `use pharma_core::Money` instead of the full path.
pub use cart::{AddOutcome, Cart, CartLine, CartTotals, PendingAdd};
pub use error::{CartError, ValidationError};
pub use money::{Money, Rate};
pub use status::{StockStatus, LOW_STOCK_THRESHOLD, NEAR_EXPIRY_WINDOW_DAYS};
pub use types::{
    Invoice, InvoiceItem, Medicine, NewInvoice, NewInvoiceItem, PaymentMethod, Vendor,
};
