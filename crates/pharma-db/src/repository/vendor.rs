//! # Vendor Repository
//!
//! Database operations for medicine suppliers. Vendors are written by
//! admin tooling and the seed binary; billing only ever follows the
//! `medicines.vendor_id` reference for reorder alerts.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pharma_core::Vendor;

/// Repository for vendor operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    pool: SqlitePool,
}

impl VendorRepository {
    /// Creates a new VendorRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VendorRepository { pool }
    }

    /// Inserts a vendor row.
    pub async fn insert(&self, vendor: &Vendor) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO vendors (id, name, shop_address, phone, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&vendor.id)
        .bind(&vendor.name)
        .bind(&vendor.shop_address)
        .bind(&vendor.phone)
        .bind(&vendor.email)
        .bind(vendor.created_at)
        .execute(&self.pool)
        .await?;

        debug!(id = %vendor.id, name = %vendor.name, "Vendor inserted");
        Ok(())
    }

    /// Gets a vendor by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            "SELECT id, name, shop_address, phone, email, created_at
             FROM vendors
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Lists all vendors, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            "SELECT id, name, shop_address, phone, email, created_at
             FROM vendors
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
