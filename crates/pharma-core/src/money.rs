//! # Money and Rate Types
//!
//! Integer representations for monetary values and percentages.
//!
//! ## Why Integer Money?
//! Floating-point arithmetic drifts: `0.1 + 0.2 != 0.3`. A register that
//! computes totals in floats will eventually disagree with its own printed
//! receipts. Every monetary value in this system is therefore an `i64` count
//! of paise (the smallest currency unit), and every percentage is a `u32`
//! count of basis points. The only place rupees appear is display formatting.
//!
//! ## Usage
//! ```rust
//! use pharma_core::money::{Money, Rate};
//!
//! let price = Money::from_paise(10_000);      // ₹100.00
//! let discount = Rate::from_bps(1_000);       // 10%
//!
//! let discounted = price.apply_discount(discount);
//! assert_eq!(discounted.paise(), 9_000);      // ₹90.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (1 bp = 0.01%).
///
/// Used for both tax rates and discount percentages: 1200 bps = 12%,
/// 10000 bps = 100%. Integer basis points keep percentage math exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Full scale: 10000 bps = 100%.
    pub const FULL: Rate = Rate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage value (12.5 -> 1250 bps).
    ///
    /// Convenience for configuration and tests; storage always holds bps.
    pub fn from_percent(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage, for display only.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percent())
        }
    }
}

// =============================================================================
// Money
// =============================================================================

/// A monetary value in paise (smallest currency unit).
///
/// Signed so that refunds and corrections can be represented, although the
/// billing workflow itself only produces non-negative values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use pharma_core::money::Money;
    /// let price = Money::from_paise(9_950); // ₹99.50
    /// assert_eq!(price.paise(), 9_950);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes `self × rate`, rounded half-up to the nearest paisa.
    ///
    /// This is the single rounding point for all percentage math: tax
    /// amounts and discount amounts both flow through here, so a line's
    /// printed figures always sum to its printed total.
    ///
    /// ```rust
    /// use pharma_core::money::{Money, Rate};
    /// let subtotal = Money::from_paise(18_000);        // ₹180.00
    /// let tax = subtotal.portion(Rate::from_bps(1200)); // 12%
    /// assert_eq!(tax.paise(), 2_160);                   // ₹21.60
    /// ```
    pub fn portion(&self, rate: Rate) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let paise = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money(paise as i64)
    }

    /// Applies a percentage discount and returns the reduced amount.
    ///
    /// The discount amount is rounded first, then subtracted, so
    /// `original - discounted` is itself a representable Money value.
    pub fn apply_discount(&self, discount: Rate) -> Money {
        *self - self.portion(discount)
    }

    /// Multiplies by a quantity.
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Debug-friendly rupee formatting. UI layers format for locale themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
