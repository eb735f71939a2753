//! # Domain Types
//!
//! Core entities shared across the workspace.
//!
//! ## Dual-Key Identity
//! Every persisted entity has:
//! - `id`: UUID v4 string, immutable, used for database relations
//! - a business identifier where humans need one (the invoice number)
//!
//! ## Snapshot Pattern
//! Invoice line items copy the medicine's name, price, discount, and tax at
//! settlement time. Later catalog edits never rewrite sales history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};
use crate::pricing;
use crate::status::{self, StockStatus};

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
///
/// Cash carries tendered-amount/change semantics; UPI and card settle for
/// exactly the grand total.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
}

impl PaymentMethod {
    /// Label used on receipts and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A catalog entry, as served to the billing screen.
///
/// Created and edited by admin catalog management (external); billing treats
/// it as a read-only snapshot. Stock is never negative, enforced both here
/// (cart validation) and by the storage layer's conditional decrement.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the biller and on the invoice.
    pub name: String,

    /// Unit price in paise, before discount.
    pub price_paise: i64,

    /// Tax rate in basis points (1200 = 12% GST).
    pub tax_bps: u32,

    /// Discount in basis points (0-10000). Defaults to 0.
    pub discount_bps: u32,

    /// Units currently on the shelf.
    pub stock: i64,

    /// Last date the medicine may be sold.
    pub expiry_date: NaiveDate,

    /// Whether a prescription must be verified before dispensing.
    pub prescription_required: bool,

    /// Supplying vendor, if recorded.
    pub vendor_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Tax rate.
    #[inline]
    pub fn tax_rate(&self) -> Rate {
        Rate::from_bps(self.tax_bps)
    }

    /// Discount percentage.
    #[inline]
    pub fn discount_rate(&self) -> Rate {
        Rate::from_bps(self.discount_bps)
    }

    /// Unit price after discount. Always ≤ `price()`.
    pub fn discounted_unit_price(&self) -> Money {
        pricing::discounted_unit_price(self.price(), self.discount_rate())
    }

    /// Stock/expiry status relative to `reference` (see [`status::classify`]).
    pub fn status(&self, reference: NaiveDate) -> StockStatus {
        status::classify(self.stock, self.expiry_date, reference)
    }

    /// Whether `quantity` more units can be dispensed.
    pub fn can_dispense(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

// =============================================================================
// Vendor
// =============================================================================

/// A medicine supplier. Managed by admin screens (external); carried here so
/// catalog rows can reference their source for reorder alerts.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub shop_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Invoice
// =============================================================================

/// A committed sale. Immutable once written; there is no update or delete
/// path for invoices.
///
/// Invariants: `total = subtotal + tax_total`; for cash payments
/// `amount_received ≥ total` and `change_returned = amount_received - total`;
/// for non-cash `amount_received = total` and `change_returned` is absent.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID v4), assigned by storage.
    pub id: String,

    /// Human-readable business identifier, e.g. `INV-39541276`.
    pub invoice_number: String,

    /// Operator who created the sale.
    pub biller_id: String,

    pub customer_name: String,
    pub customer_phone: Option<String>,

    pub subtotal_paise: i64,
    pub tax_total_paise: i64,
    pub total_paise: i64,

    pub payment_method: PaymentMethod,

    /// Amount tendered. Equals `total_paise` for non-cash payments.
    pub amount_received_paise: i64,

    /// Change handed back; only present for cash payments.
    pub change_returned_paise: Option<i64>,

    /// Issue timestamp.
    pub date: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    #[inline]
    pub fn tax_total(&self) -> Money {
        Money::from_paise(self.tax_total_paise)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

/// Invoice header as composed by the settlement engine, before storage has
/// assigned an `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub biller_id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub subtotal_paise: i64,
    pub tax_total_paise: i64,
    pub total_paise: i64,
    pub payment_method: PaymentMethod,
    pub amount_received_paise: i64,
    pub change_returned_paise: Option<i64>,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Invoice Line Item
// =============================================================================

/// A persisted line of an invoice. Foreign-keyed to both the invoice and the
/// medicine; price, discount and tax are frozen at settlement time.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub medicine_id: String,

    /// Medicine name at time of sale (frozen).
    pub name: String,
    pub quantity: i64,

    /// Unit price in paise at time of sale, before discount (frozen).
    pub unit_price_paise: i64,
    pub tax_bps: u32,
    pub discount_bps: u32,

    /// Discounted unit price × quantity, in paise.
    pub subtotal_paise: i64,
}

/// Line item content as composed by the settlement engine; storage assigns
/// `id` and `invoice_id` when the parent header is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub medicine_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub tax_bps: u32,
    pub discount_bps: u32,
    pub subtotal_paise: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
