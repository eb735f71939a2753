//! # Medicine Repository
//!
//! Database operations for the medicine catalog.
//!
//! ## Key Operations
//! - Billing catalog reads (in-stock, unexpired only)
//! - Conditional stock decrement at settlement
//! - Inventory alert queries (low stock, out of stock, expiry)
//!
//! ## Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  UPDATE medicines                                                   │
//! │  SET stock = stock - ?qty                                           │
//! │  WHERE id = ?id AND stock >= ?qty                                   │
//! │                                                                     │
//! │  rows_affected == 1  → decrement committed atomically               │
//! │  rows_affected == 0  → row missing OR another sale consumed the     │
//! │                        stock first; re-fetch to tell them apart     │
//! │                                                                     │
//! │  Stock can never go negative, even with concurrent settlements.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use pharma_core::{Medicine, LOW_STOCK_THRESHOLD};

const MEDICINE_COLUMNS: &str = "id, name, price_paise, tax_bps, discount_bps, stock, \
     expiry_date, prescription_required, vendor_id, created_at, updated_at";

/// Repository for medicine catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MedicineRepository::new(pool);
///
/// // Billing catalog
/// let catalog = repo.list_available().await?;
///
/// // Settle a sale line
/// repo.decrement_stock("uuid-here", 2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Lists medicines eligible for billing: in stock and not expired,
    /// ordered by name.
    ///
    /// "Not expired" means `expiry_date` strictly after today; a medicine
    /// expiring today is already unsellable.
    pub async fn list_available(&self) -> DbResult<Vec<Medicine>> {
        let today = Utc::now().date_naive();
        self.list_available_on(today).await
    }

    /// Same as [`list_available`](Self::list_available) with an explicit
    /// reference date, so tests are not wall-clock dependent.
    pub async fn list_available_on(&self, today: NaiveDate) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS}
             FROM medicines
             WHERE stock > 0 AND expiry_date > ?1
             ORDER BY name"
        ))
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = medicines.len(), "Billing catalog loaded");
        Ok(medicines)
    }

    /// Gets a medicine by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Medicine found
    /// * `Ok(None)` - Medicine not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Medicine>> {
        let medicine = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(medicine)
    }

    /// Inserts a medicine row.
    ///
    /// Used by the seed binary and admin tooling; billing never creates
    /// catalog entries.
    pub async fn insert(&self, medicine: &Medicine) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO medicines
                (id, name, price_paise, tax_bps, discount_bps, stock,
                 expiry_date, prescription_required, vendor_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(medicine.price_paise)
        .bind(medicine.tax_bps)
        .bind(medicine.discount_bps)
        .bind(medicine.stock)
        .bind(medicine.expiry_date)
        .bind(medicine.prescription_required)
        .bind(&medicine.vendor_id)
        .bind(medicine.created_at)
        .bind(medicine.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %medicine.id, name = %medicine.name, "Medicine inserted");
        Ok(())
    }

    /// Updates a medicine's editable fields, bumping `updated_at`.
    ///
    /// Full-row update keyed by id; `created_at` is never rewritten.
    pub async fn update(&self, medicine: &Medicine) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE medicines
             SET name = ?2, price_paise = ?3, tax_bps = ?4, discount_bps = ?5,
                 stock = ?6, expiry_date = ?7, prescription_required = ?8,
                 vendor_id = ?9, updated_at = ?10
             WHERE id = ?1",
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(medicine.price_paise)
        .bind(medicine.tax_bps)
        .bind(medicine.discount_bps)
        .bind(medicine.stock)
        .bind(medicine.expiry_date)
        .bind(medicine.prescription_required)
        .bind(&medicine.vendor_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Medicine", &medicine.id));
        }

        debug!(id = %medicine.id, "Medicine updated");
        Ok(())
    }

    /// Decrements stock by `quantity`, refusing to go below zero.
    ///
    /// The decrement is conditional (`AND stock >= ?qty`), so two
    /// concurrent settlements can never oversell: one wins, the other
    /// gets [`DbError::InsufficientStock`].
    pub async fn decrement_stock(&self, id: &str, quantity: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE medicines
             SET stock = stock - ?2, updated_at = ?3
             WHERE id = ?1 AND stock >= ?2",
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Zero rows: either the medicine doesn't exist or stock was
            // too low. Re-fetch to report the right error.
            return match self.get_by_id(id).await? {
                Some(m) => Err(DbError::InsufficientStock {
                    id: id.to_string(),
                    available: m.stock,
                    requested: quantity,
                }),
                None => Err(DbError::not_found("Medicine", id)),
            };
        }

        debug!(id = %id, quantity = quantity, "Stock decremented");
        Ok(())
    }

    // =========================================================================
    // Alert queries
    // =========================================================================

    /// Medicines running low: stock above zero but at or below the
    /// low-stock threshold.
    pub async fn low_stock(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS}
             FROM medicines
             WHERE stock > 0 AND stock <= ?1
             ORDER BY stock ASC, name"
        ))
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Medicines with zero stock.
    pub async fn out_of_stock(&self) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS}
             FROM medicines
             WHERE stock = 0
             ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Medicines expiring within `days` of `today` (inclusive), but not
    /// yet expired. Pass [`pharma_core::NEAR_EXPIRY_WINDOW_DAYS`] for the
    /// standard near-expiry alert.
    pub async fn expiring_within(&self, today: NaiveDate, days: i64) -> DbResult<Vec<Medicine>> {
        let horizon = today + chrono::Duration::days(days);

        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS}
             FROM medicines
             WHERE expiry_date >= ?1 AND expiry_date <= ?2
             ORDER BY expiry_date ASC, name"
        ))
        .bind(today)
        .bind(horizon)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Medicines already past their expiry date as of `today`.
    pub async fn expired(&self, today: NaiveDate) -> DbResult<Vec<Medicine>> {
        let medicines = sqlx::query_as::<_, Medicine>(&format!(
            "SELECT {MEDICINE_COLUMNS}
             FROM medicines
             WHERE expiry_date < ?1
             ORDER BY expiry_date ASC, name"
        ))
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    /// Total number of catalog rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
