//! # Stock/Expiry Status Classifier
//!
//! Maps a medicine's stock count and expiry date to a single display label.
//!
//! ## Precedence
//! Expiry concerns dominate stock concerns: an expired medicine that is also
//! out of stock reads "Expired", never "Out of Stock". The alert views
//! (external) bucket by stock and by expiry independently, so both alert
//! types still get counted; this precedence only governs the one label a
//! status column can show.
//!
//! ```text
//! 1. expiry ≤ reference                      -> Expired
//! 2. expiry ≤ reference + 30 days            -> Near Expiry
//! 3. stock == 0                              -> Out of Stock
//! 4. 0 < stock ≤ 50                          -> Low Stock
//! 5. otherwise                               -> In Stock
//! ```

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock level at or below which a medicine counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 50;

/// Days ahead of expiry at which a medicine counts as near expiry.
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 30;

/// The one label a medicine's status column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Expired,
    NearExpiry,
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Display label as shown in inventory views.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Expired => "Expired",
            StockStatus::NearExpiry => "Near Expiry",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// Whether the status blocks the medicine from appearing in the billing
    /// catalog (which only serves sellable medicines).
    pub fn is_sellable(&self) -> bool {
        matches!(
            self,
            StockStatus::NearExpiry | StockStatus::LowStock | StockStatus::InStock
        )
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a medicine by stock count and expiry date.
///
/// Total: always returns exactly one status, evaluated in the precedence
/// order documented at module level. `reference` is normally today; tests
/// pin it for determinism.
pub fn classify(stock: i64, expiry_date: NaiveDate, reference: NaiveDate) -> StockStatus {
    if expiry_date <= reference {
        return StockStatus::Expired;
    }
    if expiry_date <= reference + Duration::days(NEAR_EXPIRY_WINDOW_DAYS) {
        return StockStatus::NearExpiry;
    }
    if stock == 0 {
        return StockStatus::OutOfStock;
    }
    if stock <= LOW_STOCK_THRESHOLD {
        return StockStatus::LowStock;
    }
    StockStatus::InStock
}

/// [`classify`] against the current UTC date.
pub fn classify_today(stock: i64, expiry_date: NaiveDate) -> StockStatus {
    classify(stock, expiry_date, Utc::now().date_naive())
}

/// Days remaining until expiry, negative once expired. Used by expiry alert
/// tables to render "Expires in N days".
pub fn days_until_expiry(expiry_date: NaiveDate, reference: NaiveDate) -> i64 {
    (expiry_date - reference).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || date(2026, 6, 15);

    #[test]
    fn expired_wins_over_everything() {
        // expired AND out of stock must read Expired, never Out of Stock
        assert_eq!(classify(0, date(2026, 6, 1), TODAY()), StockStatus::Expired);
        // expiry exactly on the reference date counts as expired
        assert_eq!(classify(500, TODAY(), TODAY()), StockStatus::Expired);
    }

    #[test]
    fn near_expiry_wins_over_stock() {
        // 30 days out, inclusive
        assert_eq!(
            classify(500, date(2026, 7, 15), TODAY()),
            StockStatus::NearExpiry
        );
        // even when stock is zero, the expiry concern shows first
        assert_eq!(
            classify(0, date(2026, 7, 1), TODAY()),
            StockStatus::NearExpiry
        );
        // 31 days out is no longer near expiry
        assert_eq!(
            classify(500, date(2026, 7, 16), TODAY()),
            StockStatus::InStock
        );
    }

    #[test]
    fn stock_tiers() {
        let far = date(2027, 6, 15);
        assert_eq!(classify(0, far, TODAY()), StockStatus::OutOfStock);
        assert_eq!(classify(1, far, TODAY()), StockStatus::LowStock);
        assert_eq!(classify(50, far, TODAY()), StockStatus::LowStock);
        assert_eq!(classify(51, far, TODAY()), StockStatus::InStock);
    }

    #[test]
    fn sellable_excludes_expired_and_out_of_stock() {
        assert!(!StockStatus::Expired.is_sellable());
        assert!(!StockStatus::OutOfStock.is_sellable());
        assert!(StockStatus::NearExpiry.is_sellable());
        assert!(StockStatus::LowStock.is_sellable());
        assert!(StockStatus::InStock.is_sellable());
    }

    #[test]
    fn classify_today_agrees_with_classify() {
        // Far enough from today in both directions that the wall clock
        // cannot change the outcome
        let far_future = date(2099, 1, 1);
        let long_past = date(2000, 1, 1);

        assert_eq!(classify_today(500, far_future), StockStatus::InStock);
        assert_eq!(classify_today(0, far_future), StockStatus::OutOfStock);
        assert_eq!(classify_today(500, long_past), StockStatus::Expired);

        let today = Utc::now().date_naive();
        assert_eq!(classify_today(42, far_future), classify(42, far_future, today));
    }

    #[test]
    fn days_until_expiry_signed() {
        assert_eq!(days_until_expiry(date(2026, 6, 22), TODAY()), 7);
        assert_eq!(days_until_expiry(date(2026, 6, 10), TODAY()), -5);
    }
}
