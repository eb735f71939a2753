//! # Invoice Settlement Engine
//!
//! Converts a validated cart into a persisted invoice and adjusts stock.
//!
//! ## Sequence
//! ```text
//! settle(cart, customer, payment, biller)
//!   1. preconditions (first failure aborts, zero writes):
//!        cart non-empty -> customer name -> phone format -> cash sufficiency
//!   2. totals from the cart (derived, never stored redundantly)
//!   3. invoice number from the clock
//!   4. persist header            ─┐
//!   5. persist line items         ├─ strictly ordered awaits; a failure
//!   6. decrement stock per line  ─┘  after step 4 is a PartialSettlement
//!   7. clear the cart
//!   8. return the display-ready invoice
//! ```
//!
//! One billing session settles one cart at a time; there is no concurrent
//! settlement within a session. Concurrent sessions racing on the same
//! medicine are resolved by the store's conditional decrement.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pharma_core::cart::Cart;
use pharma_core::types::{Invoice, NewInvoice, NewInvoiceItem, PaymentMethod};
use pharma_core::validation::{validate_customer_name, validate_phone};
use pharma_core::Money;

use crate::error::{SettlementError, SettlementResult};
use crate::store::SettlementStore;

// =============================================================================
// Inputs
// =============================================================================

/// Customer details entered on the billing form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    /// Optional; when present it must be 10-12 digits.
    pub phone: Option<String>,
}

/// How the sale is being paid. Cash carries the tendered amount; UPI and
/// card settle for exactly the grand total, so they carry nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Payment {
    Cash { amount_received: Money },
    Upi,
    Card,
}

impl Payment {
    pub fn method(&self) -> PaymentMethod {
        match self {
            Payment::Cash { .. } => PaymentMethod::Cash,
            Payment::Upi => PaymentMethod::Upi,
            Payment::Card => PaymentMethod::Card,
        }
    }
}

/// The operator creating the invoice, resolved from the authenticated
/// session by the external auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biller {
    pub id: String,
    /// Shown on the printed invoice.
    pub display_name: String,
}

// =============================================================================
// Output
// =============================================================================

/// The display-ready result of a settlement: the persisted header, the item
/// snapshots, and the biller's display name for printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettledInvoice {
    pub invoice: Invoice,
    pub items: Vec<NewInvoiceItem>,
    pub biller_name: String,
}

// =============================================================================
// Engine
// =============================================================================

/// The settlement workflow over a [`SettlementStore`].
#[derive(Debug, Clone)]
pub struct SettlementEngine<S> {
    store: S,
}

impl<S: SettlementStore> SettlementEngine<S> {
    pub fn new(store: S) -> Self {
        SettlementEngine { store }
    }

    /// Settles the cart into a persisted invoice.
    ///
    /// Precondition failures return before any storage call. Once the
    /// header write has succeeded, later failures surface as
    /// [`SettlementError::PartialSettlement`] and the cart is left intact
    /// for the operator to reconcile against.
    pub async fn settle(
        &self,
        cart: &mut Cart,
        customer: &CustomerDetails,
        payment: &Payment,
        biller: &Biller,
    ) -> SettlementResult<SettledInvoice> {
        // --- Preconditions, checked in order; first failure wins ---
        if cart.is_empty() {
            return Err(SettlementError::EmptyCart);
        }
        if validate_customer_name(&customer.name).is_err() {
            return Err(SettlementError::MissingCustomerName);
        }
        if let Some(phone) = customer.phone.as_deref() {
            if validate_phone(phone).is_err() {
                return Err(SettlementError::InvalidPhone);
            }
        }

        let totals = cart.totals();
        let (amount_received, change_returned) = match payment {
            Payment::Cash { amount_received } => {
                if *amount_received < totals.grand_total {
                    return Err(SettlementError::InsufficientAmount {
                        received: *amount_received,
                        required: totals.grand_total,
                    });
                }
                (*amount_received, Some(*amount_received - totals.grand_total))
            }
            // Non-cash settles for exactly the total; no change concept.
            Payment::Upi | Payment::Card => (totals.grand_total, None),
        };

        let invoice_number = generate_invoice_number();
        debug!(
            invoice_number = %invoice_number,
            lines = cart.line_count(),
            total = %totals.grand_total,
            method = payment.method().as_str(),
            "settling cart"
        );

        let header = NewInvoice {
            invoice_number: invoice_number.clone(),
            biller_id: biller.id.clone(),
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            subtotal_paise: totals.subtotal.paise(),
            tax_total_paise: totals.tax_total.paise(),
            total_paise: totals.grand_total.paise(),
            payment_method: payment.method(),
            amount_received_paise: amount_received.paise(),
            change_returned_paise: change_returned.map(|c| c.paise()),
            date: Utc::now(),
        };

        let items: Vec<NewInvoiceItem> = cart
            .lines()
            .iter()
            .map(|line| NewInvoiceItem {
                medicine_id: line.medicine_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price_paise: line.unit_price_paise,
                tax_bps: line.tax_bps,
                discount_bps: line.discount_bps,
                subtotal_paise: line.subtotal().paise(),
            })
            .collect();

        // Header first: everything after this point must surface as a
        // partial settlement if it fails.
        let invoice = self.store.persist_invoice(&header).await?;

        if let Err(source) = self.store.persist_items(&invoice.id, &items).await {
            warn!(invoice_number = %invoice.invoice_number, %source, "item persistence failed after header write");
            return Err(SettlementError::PartialSettlement {
                invoice_number: invoice.invoice_number,
                invoice_id: invoice.id,
                source,
            });
        }

        for item in &items {
            if let Err(source) = self
                .store
                .decrement_stock(&item.medicine_id, item.quantity)
                .await
            {
                warn!(
                    invoice_number = %invoice.invoice_number,
                    medicine_id = %item.medicine_id,
                    %source,
                    "stock decrement failed after header write"
                );
                return Err(SettlementError::PartialSettlement {
                    invoice_number: invoice.invoice_number,
                    invoice_id: invoice.id,
                    source,
                });
            }
        }

        cart.clear();

        info!(
            invoice_number = %invoice.invoice_number,
            total = %invoice.total(),
            items = items.len(),
            "invoice settled"
        );

        Ok(SettledInvoice {
            invoice,
            items,
            biller_name: biller.display_name.clone(),
        })
    }
}

/// Generates a human-readable, time-ordered invoice number from the last
/// eight digits of the epoch millisecond clock, e.g. `INV-39541276`.
///
/// Collisions would need two settlements in the same millisecond at a
/// single register; the unique index on `invoice_number` turns that into a
/// storage error rather than a silent duplicate.
fn generate_invoice_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let suffix = &millis[millis.len().saturating_sub(8)..];
    format!("INV-{}", suffix)
}
