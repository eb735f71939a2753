//! # SettlementStore over SQLite
//!
//! Implements the settlement engine's persistence seam on top of the
//! repositories. Each trait call is one durable write; error structure
//! survives the crossing via `From<DbError> for StoreError`.

use async_trait::async_trait;

use pharma_billing::{SettlementStore, StoreResult};
use pharma_core::{Invoice, NewInvoice, NewInvoiceItem};

use crate::pool::Database;

#[async_trait]
impl SettlementStore for Database {
    async fn persist_invoice(&self, invoice: &NewInvoice) -> StoreResult<Invoice> {
        let stored = self.invoices().insert_invoice(invoice).await?;
        Ok(stored)
    }

    async fn persist_items(&self, invoice_id: &str, items: &[NewInvoiceItem]) -> StoreResult<()> {
        let repo = self.invoices();
        for item in items {
            repo.insert_item(invoice_id, item).await?;
        }
        Ok(())
    }

    async fn decrement_stock(&self, medicine_id: &str, quantity: i64) -> StoreResult<()> {
        self.medicines().decrement_stock(medicine_id, quantity).await?;
        Ok(())
    }
}
