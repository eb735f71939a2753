//! # Invoice Repository
//!
//! Database operations for invoice headers and line items.
//!
//! Invoices are append-only: there is no update or delete path. The
//! settlement engine writes the header first, then the items, then
//! decrements stock; the UNIQUE index on `invoice_number` turns a
//! same-millisecond number collision into a storage error instead of a
//! silent duplicate.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use pharma_core::{Invoice, InvoiceItem, NewInvoice, NewInvoiceItem};

const INVOICE_COLUMNS: &str = "id, invoice_number, biller_id, customer_name, customer_phone, \
     subtotal_paise, tax_total_paise, total_paise, payment_method, \
     amount_received_paise, change_returned_paise, date";

/// Repository for invoice persistence.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InvoiceRepository::new(pool);
/// let invoice = repo.insert_invoice(&new_invoice).await?;
/// repo.insert_item(&invoice.id, &item).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Inserts an invoice header, assigning its UUID.
    pub async fn insert_invoice(&self, invoice: &NewInvoice) -> DbResult<Invoice> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO invoices
                (id, invoice_number, biller_id, customer_name, customer_phone,
                 subtotal_paise, tax_total_paise, total_paise, payment_method,
                 amount_received_paise, change_returned_paise, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&id)
        .bind(&invoice.invoice_number)
        .bind(&invoice.biller_id)
        .bind(&invoice.customer_name)
        .bind(&invoice.customer_phone)
        .bind(invoice.subtotal_paise)
        .bind(invoice.tax_total_paise)
        .bind(invoice.total_paise)
        .bind(invoice.payment_method)
        .bind(invoice.amount_received_paise)
        .bind(invoice.change_returned_paise)
        .bind(invoice.date)
        .execute(&self.pool)
        .await?;

        debug!(
            id = %id,
            invoice_number = %invoice.invoice_number,
            total_paise = invoice.total_paise,
            "Invoice header written"
        );

        Ok(Invoice {
            id,
            invoice_number: invoice.invoice_number.clone(),
            biller_id: invoice.biller_id.clone(),
            customer_name: invoice.customer_name.clone(),
            customer_phone: invoice.customer_phone.clone(),
            subtotal_paise: invoice.subtotal_paise,
            tax_total_paise: invoice.tax_total_paise,
            total_paise: invoice.total_paise,
            payment_method: invoice.payment_method,
            amount_received_paise: invoice.amount_received_paise,
            change_returned_paise: invoice.change_returned_paise,
            date: invoice.date,
        })
    }

    /// Inserts one line item under an existing invoice header.
    pub async fn insert_item(&self, invoice_id: &str, item: &NewInvoiceItem) -> DbResult<()> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO invoice_items
                (id, invoice_id, medicine_id, name, quantity,
                 unit_price_paise, tax_bps, discount_bps, subtotal_paise)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&id)
        .bind(invoice_id)
        .bind(&item.medicine_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(item.unit_price_paise)
        .bind(item.tax_bps)
        .bind(item.discount_bps)
        .bind(item.subtotal_paise)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an invoice header by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets an invoice header by its business number (e.g. `INV-39541276`).
    pub async fn get_by_number(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE invoice_number = ?1"
        ))
        .bind(invoice_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Lists the line items of an invoice, in insertion order.
    pub async fn get_items(&self, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT id, invoice_id, medicine_id, name, quantity,
                    unit_price_paise, tax_bps, discount_bps, subtotal_paise
             FROM invoice_items
             WHERE invoice_id = ?1
             ORDER BY rowid",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the most recent invoices, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS}
             FROM invoices
             ORDER BY date DESC
             LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use pharma_core::PaymentMethod;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_invoice(number: &str) -> NewInvoice {
        NewInvoice {
            invoice_number: number.to_string(),
            biller_id: "biller-1".to_string(),
            customer_name: "Asha Rao".to_string(),
            customer_phone: Some("9876543210".to_string()),
            subtotal_paise: 18_000,
            tax_total_paise: 2_160,
            total_paise: 20_160,
            payment_method: PaymentMethod::Cash,
            amount_received_paise: 25_000,
            change_returned_paise: Some(4_840),
            date: Utc::now(),
        }
    }

    fn new_item(medicine_id: &str) -> NewInvoiceItem {
        NewInvoiceItem {
            medicine_id: medicine_id.to_string(),
            name: "Paracetamol 500mg".to_string(),
            quantity: 2,
            unit_price_paise: 10_000,
            tax_bps: 1_200,
            discount_bps: 1_000,
            subtotal_paise: 18_000,
        }
    }

    async fn seed_medicine(db: &Database, id: &str) {
        let now = Utc::now();
        db.medicines()
            .insert(&pharma_core::Medicine {
                id: id.to_string(),
                name: "Paracetamol 500mg".to_string(),
                price_paise: 10_000,
                tax_bps: 1_200,
                discount_bps: 1_000,
                stock: 10,
                expiry_date: chrono::NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
                prescription_required: false,
                vendor_id: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_fetch_invoice() {
        let db = test_db().await;
        let repo = db.invoices();

        let created = repo.insert_invoice(&new_invoice("INV-00000001")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.invoice_number, "INV-00000001");

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.customer_name, "Asha Rao");
        assert_eq!(fetched.payment_method, PaymentMethod::Cash);
        assert_eq!(fetched.total_paise, 20_160);
        assert_eq!(fetched.change_returned_paise, Some(4_840));

        let by_number = repo.get_by_number("INV-00000001").await.unwrap().unwrap();
        assert_eq!(by_number.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_invoice_number_rejected() {
        let db = test_db().await;
        let repo = db.invoices();

        repo.insert_invoice(&new_invoice("INV-00000042")).await.unwrap();
        let err = repo
            .insert_invoice(&new_invoice("INV-00000042"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_items_round_trip() {
        let db = test_db().await;
        let repo = db.invoices();
        seed_medicine(&db, "m-1").await;

        let invoice = repo.insert_invoice(&new_invoice("INV-00000007")).await.unwrap();
        repo.insert_item(&invoice.id, &new_item("m-1")).await.unwrap();

        let items = repo.get_items(&invoice.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].invoice_id, invoice.id);
        assert_eq!(items[0].medicine_id, "m-1");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal_paise, 18_000);
    }

    #[tokio::test]
    async fn test_item_requires_existing_invoice() {
        let db = test_db().await;
        let repo = db.invoices();
        seed_medicine(&db, "m-1").await;

        let err = repo
            .insert_item("no-such-invoice", &new_item("m-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let db = test_db().await;
        let repo = db.invoices();

        let mut older = new_invoice("INV-00000001");
        older.date = Utc::now() - chrono::Duration::hours(1);
        repo.insert_invoice(&older).await.unwrap();
        repo.insert_invoice(&new_invoice("INV-00000002")).await.unwrap();

        let recent = repo.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].invoice_number, "INV-00000002");
        assert_eq!(recent[1].invoice_number, "INV-00000001");
    }
}
