//! # Seed Data Generator
//!
//! Populates the database with test vendors and medicines for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 medicines (default)
//! cargo run -p pharma-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p pharma-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p pharma-db --bin seed -- --db ./data/pharma.db
//! ```
//!
//! ## Generated Medicines
//! Creates realistic catalog data across therapeutic groups:
//! - Analgesics / antipyretics
//! - Antibiotics (marked prescription-required)
//! - Antacids and antihistamines
//! - Vitamins and supplements
//!
//! Each medicine has:
//! - Realistic name with strength (e.g. "Paracetamol 500mg")
//! - Price: ₹5 - ₹500 in paise
//! - GST rate: 0%, 5%, 12% or 18%
//! - Discount: 0%, 5% or 10%
//! - Stock spread across the alert bands (out, low, healthy)
//! - Expiry spread: some expired, some near-expiry, most long-dated

use chrono::{Duration, Utc};
use std::env;
use uuid::Uuid;

use pharma_core::{Medicine, Vendor};
use pharma_db::{Database, DbConfig};

/// Therapeutic groups: (group label, prescription required, names)
const GROUPS: &[(&str, bool, &[&str])] = &[
    (
        "Analgesic",
        false,
        &[
            "Paracetamol",
            "Ibuprofen",
            "Diclofenac",
            "Aspirin",
            "Naproxen",
            "Aceclofenac",
            "Mefenamic Acid",
            "Tramadol",
        ],
    ),
    (
        "Antibiotic",
        true,
        &[
            "Amoxicillin",
            "Azithromycin",
            "Ciprofloxacin",
            "Cefixime",
            "Doxycycline",
            "Metronidazole",
            "Levofloxacin",
            "Clarithromycin",
        ],
    ),
    (
        "Antacid",
        false,
        &[
            "Pantoprazole",
            "Omeprazole",
            "Ranitidine",
            "Esomeprazole",
            "Rabeprazole",
            "Famotidine",
        ],
    ),
    (
        "Antihistamine",
        false,
        &[
            "Cetirizine",
            "Loratadine",
            "Fexofenadine",
            "Levocetirizine",
            "Chlorpheniramine",
        ],
    ),
    (
        "Supplement",
        false,
        &[
            "Vitamin C",
            "Vitamin D3",
            "Calcium Carbonate",
            "Iron Folic Acid",
            "Zinc Sulphate",
            "Multivitamin",
            "Omega-3",
        ],
    ),
];

/// Strength variants
const STRENGTHS: &[&str] = &[
    "100mg", "125mg", "200mg", "250mg", "400mg", "500mg", "650mg", "10mg", "20mg", "40mg",
];

/// GST rates in basis points
const TAX_RATES: &[u32] = &[0, 500, 1200, 1800];

/// Discount rates in basis points
const DISCOUNTS: &[u32] = &[0, 0, 0, 500, 1000];

/// Seed vendors: (name, address, phone)
const VENDORS: &[(&str, &str, &str)] = &[
    ("MedSupply Distributors", "12 Wholesale Market, Pune", "9812345678"),
    ("Apex Pharma Traders", "48 Chemist Lane, Mumbai", "9823456789"),
    ("Lifeline Healthcare", "7 Hospital Road, Nagpur", "9834567890"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./pharma_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pharma POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of medicines to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./pharma_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pharma POS Seed Data Generator");
    println!("=================================");
    println!("Database:  {}", db_path);
    println!("Medicines: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.medicines().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} medicines", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Insert vendors
    let now = Utc::now();
    let mut vendor_ids = Vec::new();
    for (name, address, phone) in VENDORS {
        let vendor = Vendor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            shop_address: Some(address.to_string()),
            phone: Some(phone.to_string()),
            email: None,
            created_at: now,
        };
        db.vendors().insert(&vendor).await?;
        vendor_ids.push(vendor.id);
    }
    println!("✓ Inserted {} vendors", vendor_ids.len());

    // Generate medicines
    println!();
    println!("Generating medicines...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (group_idx, (_, rx_required, names)) in GROUPS.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (strength_idx, strength) in STRENGTHS.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = group_idx * 1000 + name_idx * 30 + strength_idx;
                let medicine = generate_medicine(
                    name,
                    strength,
                    *rx_required,
                    &vendor_ids[seed % vendor_ids.len()],
                    seed,
                );

                if let Err(e) = db.medicines().insert(&medicine).await {
                    eprintln!("Failed to insert {}: {}", medicine.name, e);
                    continue;
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} medicines...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} medicines in {:?}", generated, elapsed);

    // Verify alert queries against the generated spread
    println!();
    println!("Verifying alert queries...");
    let today = Utc::now().date_naive();
    println!("  Low stock:   {} medicines", db.medicines().low_stock().await?.len());
    println!("  Out of stock: {} medicines", db.medicines().out_of_stock().await?.len());
    println!(
        "  Near expiry: {} medicines",
        db.medicines()
            .expiring_within(today, pharma_core::NEAR_EXPIRY_WINDOW_DAYS)
            .await?
            .len()
    );
    println!("  Expired:     {} medicines", db.medicines().expired(today).await?.len());
    println!(
        "  Sellable:    {} medicines",
        db.medicines().list_available().await?.len()
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single medicine with realistic data.
fn generate_medicine(
    name: &str,
    strength: &str,
    prescription_required: bool,
    vendor_id: &str,
    seed: usize,
) -> Medicine {
    let now = Utc::now();

    // Price: ₹5.00 - ₹500.00 in paise
    let price_paise = 500 + ((seed * 37) % 49_500) as i64;

    let tax_bps = TAX_RATES[seed % TAX_RATES.len()];
    let discount_bps = DISCOUNTS[seed % DISCOUNTS.len()];

    // Stock spread: ~7% out of stock, ~20% low, rest healthy
    let stock = match seed % 15 {
        0 => 0,
        1 | 2 | 3 => (seed % 50 + 1) as i64,
        _ => (51 + seed % 450) as i64,
    };

    // Expiry spread: ~5% expired, ~10% within 30 days, rest 2-30 months out
    let expiry_date = match seed % 20 {
        0 => now.date_naive() - Duration::days((seed % 90 + 1) as i64),
        1 | 2 => now.date_naive() + Duration::days((seed % 30 + 1) as i64),
        _ => now.date_naive() + Duration::days((60 + (seed * 13) % 840) as i64),
    };

    Medicine {
        id: Uuid::new_v4().to_string(),
        name: format!("{} {}", name, strength),
        price_paise,
        tax_bps,
        discount_bps,
        stock,
        expiry_date,
        prescription_required,
        vendor_id: Some(vendor_id.to_string()),
        created_at: now,
        updated_at: now,
    }
}
