//! # Cart Aggregator
//!
//! The in-progress, unsaved collection of line items for the invoice being
//! built. One billing session owns exactly one cart; it is reused across
//! invoices within the session (settle, clear, start again).
//!
//! ## Merge Semantics
//! Adding a medicine that is already in the cart increases the existing
//! line's quantity (re-validated against current stock) rather than creating
//! a duplicate line.
//!
//! ## Prescription Gate
//! Adding a prescription-flagged medicine does not commit the line. Instead
//! the add is handed back as a [`PendingAdd`]; the caller must obtain
//! operator confirmation ("prescription checked") and call
//! [`Cart::confirm_prescription`] to commit it. Dropping the `PendingAdd`
//! discards the attempt with no cart change. The check is per add attempt,
//! never cached per medicine or session.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::{Money, Rate};
use crate::pricing;
use crate::types::Medicine;

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the in-progress invoice.
///
/// Price, discount, and tax are captured when the medicine is added; catalog
/// edits made while the cart is open do not retroactively change the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub medicine_id: String,

    /// Medicine name at time of adding (frozen).
    pub name: String,

    /// Unit price in paise at time of adding, before discount (frozen).
    pub unit_price_paise: i64,

    /// Discount in basis points at time of adding (frozen).
    pub discount_bps: u32,

    /// Tax rate in basis points at time of adding (frozen).
    pub tax_bps: u32,

    /// Whether the medicine was prescription-flagged when added.
    pub prescription_required: bool,

    pub quantity: i64,
}

impl CartLine {
    fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        CartLine {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            unit_price_paise: medicine.price_paise,
            discount_bps: medicine.discount_bps,
            tax_bps: medicine.tax_bps,
            prescription_required: medicine.prescription_required,
            quantity,
        }
    }

    /// Unit price after discount.
    pub fn discounted_unit_price(&self) -> Money {
        pricing::discounted_unit_price(
            Money::from_paise(self.unit_price_paise),
            Rate::from_bps(self.discount_bps),
        )
    }

    /// Discounted unit price × quantity.
    pub fn subtotal(&self) -> Money {
        pricing::line_subtotal(
            Money::from_paise(self.unit_price_paise),
            Rate::from_bps(self.discount_bps),
            self.quantity,
        )
    }

    /// Tax amount on this line's subtotal.
    pub fn tax_amount(&self) -> Money {
        pricing::line_tax_amount(self.subtotal(), Rate::from_bps(self.tax_bps))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart totals. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax_total: Money,
    pub grand_total: Money,
}

// =============================================================================
// Prescription Gate
// =============================================================================

/// An add attempt held at the prescription gate.
///
/// Holds a snapshot of the medicine and the requested quantity. Commit with
/// [`Cart::confirm_prescription`]; drop to discard. The token is not `Clone`,
/// so one confirmation commits at most one add.
#[derive(Debug)]
pub struct PendingAdd {
    medicine: Medicine,
    quantity: i64,
}

impl PendingAdd {
    /// The medicine awaiting confirmation, for the operator-facing prompt.
    pub fn medicine(&self) -> &Medicine {
        &self.medicine
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Result of an add attempt.
#[derive(Debug)]
pub enum AddOutcome {
    /// The line was committed to the cart.
    Added,
    /// The medicine is prescription-flagged; confirmation is required before
    /// the add commits.
    PrescriptionPending(PendingAdd),
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress invoice cart.
///
/// Two states: empty and non-empty. `add_item`/`confirm_prescription` move
/// it forward, `remove_line` may empty it, `clear` always does. There is no
/// terminal state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` units of `medicine`, merging with an existing line.
    ///
    /// Validates that the quantity is positive and that the merged quantity
    /// does not exceed current stock; a failed add leaves the cart unchanged.
    /// Prescription-flagged medicines are not committed here; the attempt
    /// comes back as [`AddOutcome::PrescriptionPending`] and must be
    /// confirmed through [`Cart::confirm_prescription`].
    pub fn add_item(&mut self, medicine: &Medicine, quantity: i64) -> Result<AddOutcome, CartError> {
        self.validate_add(medicine, quantity)?;

        if medicine.prescription_required {
            return Ok(AddOutcome::PrescriptionPending(PendingAdd {
                medicine: medicine.clone(),
                quantity,
            }));
        }

        self.commit_add(medicine, quantity)?;
        Ok(AddOutcome::Added)
    }

    /// Commits an add that was held at the prescription gate.
    ///
    /// Re-validates against stock at commit time; the cart may have gained
    /// a line for the same medicine while the confirmation prompt was open.
    pub fn confirm_prescription(&mut self, pending: PendingAdd) -> Result<(), CartError> {
        self.commit_add(&pending.medicine, pending.quantity)
    }

    /// Removes the line at `index`. The caller's display list only offers
    /// removal of lines it shows, so the index is in range by construction.
    pub fn remove_line(&mut self, index: usize) {
        self.lines.remove(index);
    }

    /// Empties the cart. Called after successful settlement and on
    /// abandonment.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Subtotal, tax total, and grand total across all lines.
    pub fn totals(&self) -> CartTotals {
        let subtotal: Money = self.lines.iter().map(|l| l.subtotal()).sum();
        let tax_total: Money = self.lines.iter().map(|l| l.tax_amount()).sum();
        CartTotals {
            subtotal,
            tax_total,
            grand_total: subtotal + tax_total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Quantity already in the cart for `medicine_id`.
    fn quantity_of(&self, medicine_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.medicine_id == medicine_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    fn validate_add(&self, medicine: &Medicine, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity { requested: quantity });
        }
        let merged = self.quantity_of(&medicine.id) + quantity;
        if merged > medicine.stock {
            return Err(CartError::InsufficientStock {
                name: medicine.name.clone(),
                available: medicine.stock,
                requested: merged,
            });
        }
        Ok(())
    }

    fn commit_add(&mut self, medicine: &Medicine, quantity: i64) -> Result<(), CartError> {
        // Re-run validation: for the prescription path, time passed between
        // the attempt and the confirmation.
        self.validate_add(medicine, quantity)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.medicine_id == medicine.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine::from_medicine(medicine, quantity));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
