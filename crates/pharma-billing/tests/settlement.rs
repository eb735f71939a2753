//! Settlement engine tests against an in-memory spy store.
//!
//! The spy records every storage call so tests can assert not just the
//! returned error but exactly which writes happened before it.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use pharma_billing::settlement::{Biller, CustomerDetails, Payment, SettlementEngine};
use pharma_billing::store::{SettlementStore, StoreError, StoreResult};
use pharma_billing::SettlementError;
use pharma_core::cart::{AddOutcome, Cart};
use pharma_core::types::{Invoice, Medicine, NewInvoice, NewInvoiceItem, PaymentMethod};
use pharma_core::Money;

// =============================================================================
// Spy store
// =============================================================================

#[derive(Debug, Default)]
struct SpyState {
    invoices: Vec<NewInvoice>,
    items: Vec<(String, Vec<NewInvoiceItem>)>,
    decrements: Vec<(String, i64)>,
    fail_items: bool,
    fail_stock: bool,
}

#[derive(Debug, Clone, Default)]
struct SpyStore {
    state: Arc<Mutex<SpyState>>,
}

impl SpyStore {
    fn new() -> Self {
        SpyStore::default()
    }

    fn failing_items() -> Self {
        let spy = SpyStore::new();
        spy.state.lock().unwrap().fail_items = true;
        spy
    }

    fn failing_stock() -> Self {
        let spy = SpyStore::new();
        spy.state.lock().unwrap().fail_stock = true;
        spy
    }

    fn write_count(&self) -> usize {
        let s = self.state.lock().unwrap();
        s.invoices.len() + s.items.len() + s.decrements.len()
    }

    fn decrements(&self) -> Vec<(String, i64)> {
        self.state.lock().unwrap().decrements.clone()
    }
}

#[async_trait]
impl SettlementStore for SpyStore {
    async fn persist_invoice(&self, invoice: &NewInvoice) -> StoreResult<Invoice> {
        let mut s = self.state.lock().unwrap();
        s.invoices.push(invoice.clone());
        Ok(Invoice {
            id: format!("inv-{}", s.invoices.len()),
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

    async fn persist_items(&self, invoice_id: &str, items: &[NewInvoiceItem]) -> StoreResult<()> {
        let mut s = self.state.lock().unwrap();
        if s.fail_items {
            return Err(StoreError::Backend("item insert rejected".to_string()));
        }
        s.items.push((invoice_id.to_string(), items.to_vec()));
        Ok(())
    }

    async fn decrement_stock(&self, medicine_id: &str, quantity: i64) -> StoreResult<()> {
        let mut s = self.state.lock().unwrap();
        if s.fail_stock {
            return Err(StoreError::InsufficientStock {
                medicine_id: medicine_id.to_string(),
                requested: quantity,
            });
        }
        s.decrements.push((medicine_id.to_string(), quantity));
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn medicine(id: &str, price_paise: i64, discount_bps: u32, tax_bps: u32, stock: i64) -> Medicine {
    Medicine {
        id: id.to_string(),
        name: format!("Medicine {}", id),
        price_paise,
        tax_bps,
        discount_bps,
        stock,
        expiry_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
        prescription_required: false,
        vendor_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn customer(name: &str, phone: Option<&str>) -> CustomerDetails {
    CustomerDetails {
        name: name.to_string(),
        phone: phone.map(str::to_string),
    }
}

fn biller() -> Biller {
    Biller {
        id: "biller-1".to_string(),
        display_name: "Priya".to_string(),
    }
}

/// Single-line cart: ₹100 unit, 10% discount, 12% tax, quantity 2
/// -> subtotal ₹180, tax ₹21.60, total ₹201.60.
fn example_cart() -> Cart {
    let mut cart = Cart::new();
    let m = medicine("m-1", 10_000, 1_000, 1_200, 20);
    cart.add_item(&m, 2).unwrap();
    cart
}

// =============================================================================
// Preconditions
// =============================================================================

#[tokio::test]
async fn empty_cart_fails_with_zero_writes() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = Cart::new();

    let err = engine
        .settle(
            &mut cart,
            &customer("Asha", None),
            &Payment::Cash { amount_received: Money::from_rupees(500) },
            &biller(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SettlementError::EmptyCart));
    assert_eq!(spy.write_count(), 0);
}

#[tokio::test]
async fn empty_cart_wins_over_other_precondition_failures() {
    // preconditions are checked in order; an empty cart with a bad phone
    // still reports EmptyCart
    let engine = SettlementEngine::new(SpyStore::new());
    let mut cart = Cart::new();

    let err = engine
        .settle(
            &mut cart,
            &customer("", Some("12345")),
            &Payment::Upi,
            &biller(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SettlementError::EmptyCart));
}

#[tokio::test]
async fn blank_customer_name_rejected() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = example_cart();

    let err = engine
        .settle(&mut cart, &customer("   ", None), &Payment::Upi, &biller())
        .await
        .unwrap_err();

    assert!(matches!(err, SettlementError::MissingCustomerName));
    assert_eq!(spy.write_count(), 0);
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn short_phone_rejected_valid_phone_accepted() {
    let engine = SettlementEngine::new(SpyStore::new());

    let mut cart = example_cart();
    let err = engine
        .settle(&mut cart, &customer("Asha", Some("12345")), &Payment::Upi, &biller())
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::InvalidPhone));

    let settled = engine
        .settle(
            &mut cart,
            &customer("Asha", Some("9876543210")),
            &Payment::Upi,
            &biller(),
        )
        .await
        .unwrap();
    assert_eq!(settled.invoice.customer_phone.as_deref(), Some("9876543210"));
}

#[tokio::test]
async fn cash_below_total_rejected() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = example_cart();

    let err = engine
        .settle(
            &mut cart,
            &customer("Asha", None),
            &Payment::Cash { amount_received: Money::from_paise(20_159) },
            &biller(),
        )
        .await
        .unwrap_err();

    match err {
        SettlementError::InsufficientAmount { received, required } => {
            assert_eq!(received.paise(), 20_159);
            assert_eq!(required.paise(), 20_160);
        }
        other => panic!("expected InsufficientAmount, got {:?}", other),
    }
    assert_eq!(spy.write_count(), 0);
}

// =============================================================================
// Successful settlement
// =============================================================================

#[tokio::test]
async fn exact_cash_settles_with_zero_change() {
    let engine = SettlementEngine::new(SpyStore::new());
    let mut cart = example_cart();

    let settled = engine
        .settle(
            &mut cart,
            &customer("Asha", None),
            &Payment::Cash { amount_received: Money::from_paise(20_160) },
            &biller(),
        )
        .await
        .unwrap();

    assert_eq!(settled.invoice.change_returned_paise, Some(0));
}

#[tokio::test]
async fn cash_sale_end_to_end() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = example_cart();

    let settled = engine
        .settle(
            &mut cart,
            &customer("Asha", Some("9876543210")),
            &Payment::Cash { amount_received: Money::from_rupees(250) },
            &biller(),
        )
        .await
        .unwrap();

    let invoice = &settled.invoice;
    assert_eq!(invoice.subtotal_paise, 18_000); // ₹180.00
    assert_eq!(invoice.tax_total_paise, 2_160); // ₹21.60
    assert_eq!(invoice.total_paise, 20_160); // ₹201.60
    assert_eq!(invoice.amount_received_paise, 25_000);
    assert_eq!(invoice.change_returned_paise, Some(4_840)); // ₹48.40
    assert_eq!(invoice.payment_method, PaymentMethod::Cash);
    assert!(invoice.invoice_number.starts_with("INV-"));

    // one item snapshot, frozen at settlement time
    assert_eq!(settled.items.len(), 1);
    let item = &settled.items[0];
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price_paise, 10_000);
    assert_eq!(item.discount_bps, 1_000);
    assert_eq!(item.tax_bps, 1_200);
    assert_eq!(item.subtotal_paise, 18_000);

    // stock decremented by the line quantity
    assert_eq!(spy.decrements(), vec![("m-1".to_string(), 2)]);

    // cart cleared and reusable
    assert!(cart.is_empty());
    assert_eq!(settled.biller_name, "Priya");
}

#[tokio::test]
async fn non_cash_receives_exactly_total_and_no_change() {
    let engine = SettlementEngine::new(SpyStore::new());

    for payment in [Payment::Upi, Payment::Card] {
        let mut cart = example_cart();
        let settled = engine
            .settle(&mut cart, &customer("Asha", None), &payment, &biller())
            .await
            .unwrap();

        assert_eq!(settled.invoice.amount_received_paise, settled.invoice.total_paise);
        assert_eq!(settled.invoice.change_returned_paise, None);
    }
}

#[tokio::test]
async fn multi_line_totals_sum_per_line_amounts() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = Cart::new();
    cart.add_item(&medicine("a", 10_000, 1_000, 1_200, 20), 2).unwrap(); // 18000 + 2160
    cart.add_item(&medicine("b", 4_950, 0, 500, 20), 3).unwrap(); // 14850 + 743

    let settled = engine
        .settle(&mut cart, &customer("Asha", None), &Payment::Card, &biller())
        .await
        .unwrap();

    assert_eq!(settled.invoice.subtotal_paise, 18_000 + 14_850);
    assert_eq!(settled.invoice.tax_total_paise, 2_160 + 743);
    assert_eq!(
        settled.invoice.total_paise,
        settled.invoice.subtotal_paise + settled.invoice.tax_total_paise
    );
    assert_eq!(
        spy.decrements(),
        vec![("a".to_string(), 2), ("b".to_string(), 3)]
    );
}

#[tokio::test]
async fn prescription_confirmed_line_settles_normally() {
    let spy = SpyStore::new();
    let engine = SettlementEngine::new(spy.clone());

    let mut cart = Cart::new();
    let rx = Medicine {
        prescription_required: true,
        ..medicine("rx-1", 8_000, 0, 1_200, 10)
    };
    let pending = match cart.add_item(&rx, 1).unwrap() {
        AddOutcome::PrescriptionPending(p) => p,
        AddOutcome::Added => panic!("gate bypassed"),
    };
    cart.confirm_prescription(pending).unwrap();

    let settled = engine
        .settle(&mut cart, &customer("Asha", None), &Payment::Upi, &biller())
        .await
        .unwrap();

    assert_eq!(settled.items[0].medicine_id, "rx-1");
    assert_eq!(spy.decrements(), vec![("rx-1".to_string(), 1)]);
}

// =============================================================================
// Partial failure
// =============================================================================

#[tokio::test]
async fn item_write_failure_is_partial_settlement() {
    let spy = SpyStore::failing_items();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = example_cart();

    let err = engine
        .settle(&mut cart, &customer("Asha", None), &Payment::Upi, &biller())
        .await
        .unwrap_err();

    match err {
        SettlementError::PartialSettlement { invoice_number, invoice_id, .. } => {
            assert!(invoice_number.starts_with("INV-"));
            assert_eq!(invoice_id, "inv-1");
        }
        other => panic!("expected PartialSettlement, got {:?}", other),
    }

    // the orphaned header was written, nothing else was
    assert_eq!(spy.state.lock().unwrap().invoices.len(), 1);
    assert!(spy.decrements().is_empty());
    // the cart is preserved for reconciliation
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn stock_decrement_failure_is_partial_settlement() {
    let spy = SpyStore::failing_stock();
    let engine = SettlementEngine::new(spy.clone());
    let mut cart = example_cart();

    let err = engine
        .settle(&mut cart, &customer("Asha", None), &Payment::Upi, &biller())
        .await
        .unwrap_err();

    match err {
        SettlementError::PartialSettlement { source, .. } => {
            assert!(matches!(source, StoreError::InsufficientStock { .. }));
        }
        other => panic!("expected PartialSettlement, got {:?}", other),
    }
    assert!(!cart.is_empty());
}
