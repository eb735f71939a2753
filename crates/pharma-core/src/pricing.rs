//! # Pricing Engine
//!
//! The arithmetic shared by the cart, the settlement engine, and the catalog
//! display: discount application, line subtotals, and tax amounts. Pure
//! functions over [`Money`] and [`Rate`]; display formatting is someone
//! else's job.
//!
//! ## Order of Operations
//! Discount applies to the unit price first, then the discounted price is
//! multiplied by quantity, and tax applies to the resulting subtotal:
//!
//! ```text
//! unit 100.00, discount 10%, tax 12%, qty 2
//!   discounted unit  =  90.00
//!   line subtotal    = 180.00
//!   line tax         =  21.60
//! ```
//!
//! Rates are assumed to be within 0-100%. The engine does not clamp;
//! callers validate with [`crate::validation::validate_rate`] at the
//! boundary where untrusted values arrive.

use crate::money::{Money, Rate};

/// Unit price after the percentage discount: `price × (1 - discount)`.
///
/// For any discount in [0, 100%] the result is ≤ `price`, and a zero
/// discount returns `price` unchanged.
#[inline]
pub fn discounted_unit_price(price: Money, discount: Rate) -> Money {
    price.apply_discount(discount)
}

/// Subtotal for a line: discounted unit price × quantity.
#[inline]
pub fn line_subtotal(price: Money, discount: Rate, quantity: i64) -> Money {
    discounted_unit_price(price, discount).times(quantity)
}

/// Tax amount on an already-discounted subtotal.
#[inline]
pub fn line_tax_amount(subtotal: Money, tax: Rate) -> Money {
    subtotal.portion(tax)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_bounds() {
        let price = Money::from_paise(10_000);
        // d = 0 leaves the price untouched
        assert_eq!(discounted_unit_price(price, Rate::zero()), price);
        // d = 100% zeroes it
        assert_eq!(discounted_unit_price(price, Rate::FULL), Money::zero());
        // any in-range discount never exceeds the original price
        for bps in [1, 250, 825, 5_000, 9_999] {
            assert!(discounted_unit_price(price, Rate::from_bps(bps)) <= price);
        }
    }

    #[test]
    fn standard_gst_line() {
        // unit ₹100, 10% discount, 12% tax, qty 2
        let price = Money::from_rupees(100);
        let discount = Rate::from_bps(1_000);
        let tax = Rate::from_bps(1_200);

        let subtotal = line_subtotal(price, discount, 2);
        assert_eq!(subtotal.paise(), 18_000); // ₹180.00

        let tax_amount = line_tax_amount(subtotal, tax);
        assert_eq!(tax_amount.paise(), 2_160); // ₹21.60
    }

    #[test]
    fn odd_discount_rounds_once_per_unit_price() {
        // ₹99.99 at 33.33% discount: discount amount 3332.66... -> 3333
        let price = Money::from_paise(9_999);
        let discounted = discounted_unit_price(price, Rate::from_bps(3_333));
        assert_eq!(discounted.paise(), 9_999 - 3_333);
        // quantity multiplies the already-rounded unit price
        assert_eq!(line_subtotal(price, Rate::from_bps(3_333), 3).paise(), (9_999 - 3_333) * 3);
    }

    #[test]
    fn zero_quantity_yields_zero() {
        let subtotal = line_subtotal(Money::from_rupees(50), Rate::zero(), 0);
        assert!(subtotal.is_zero());
        assert!(line_tax_amount(subtotal, Rate::from_bps(1_800)).is_zero());
    }
}
