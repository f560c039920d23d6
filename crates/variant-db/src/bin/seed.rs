//! # Seed Data Generator
//!
//! Writes a small demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Default path (./variant_dev.db, or $VARIANT_DB_PATH)
//! cargo run -p variant-db --bin seed
//!
//! # Specify database path
//! cargo run -p variant-db --bin seed -- --db ./data/catalog.db
//!
//! # More log output
//! RUST_LOG=debug cargo run -p variant-db --bin seed
//! ```
//!
//! ## Generated Products
//! - `classic-tee`: color × size apparel with a sparse variant set
//!   (not every combination exists, some are out of stock)
//! - `canvas-tote`: a simple product with no options
//! - `gift-box`: configured for variants but shipped with none

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use variant_core::{
    DisplayStyle, InputKind, Money, OptionValue, ProductBase, ProductCatalog, ProductOption,
    SelectionState, Variant,
};
use variant_db::{Database, DbConfig, DEFAULT_DB_PATH};

/// Swatch colors: (value id, label, hex)
const COLORS: &[(&str, &str, &str)] = &[
    ("red", "Red", "#c0392b"),
    ("navy", "Navy", "#1f3a5f"),
    ("black", "Black", "#111111"),
];

/// Sizes in display order
const SIZES: &[&str] = &["xs", "s", "m", "l", "xl"];

/// Combinations that are not produced.
const MISSING: &[(&str, &str)] = &[("red", "xs"), ("navy", "xl"), ("black", "xs")];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,variant=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Variant Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $VARIANT_DB_PATH or {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env_or(DEFAULT_DB_PATH),
    };

    println!("🌱 Variant Catalog Seed Data Generator");
    println!("======================================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalogs().count_products().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for catalog in [classic_tee(), canvas_tote(), gift_box()] {
        db.catalogs().insert_catalog(&catalog).await?;
        println!(
            "✓ {} ({} options, {} variants)",
            catalog.product.id,
            catalog.options.len(),
            catalog.variants.len()
        );
    }

    // Resolve once against the stored data as a smoke check
    println!();
    println!("Verifying catalog...");
    if let Some(index) = db.catalogs().load_index("classic-tee").await? {
        let mut state = SelectionState::new(Arc::new(index));
        let seeded = state.initialize_first_in_stock();
        let view = state.view();
        info!(seeded = ?seeded, status = ?view.status, price = view.price.minor(), "Smoke check");
        println!(
            "  classic-tee first in stock: {} ({:?})",
            view.sku.as_deref().unwrap_or("-"),
            view.status
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

fn classic_tee() -> ProductCatalog {
    let options = vec![
        ProductOption::new("tee-color", "Color", 0).styled(DisplayStyle::Swatch, InputKind::Color),
        ProductOption::new("tee-size", "Size", 1),
    ];

    let mut values: Vec<OptionValue> = COLORS
        .iter()
        .enumerate()
        .map(|(order, (id, label, hex))| {
            OptionValue::new(format!("tee-{id}"), "tee-color", order as i32, *id)
                .with_label(*label)
                .with_color_code(*hex)
        })
        .collect();
    values.extend(SIZES.iter().enumerate().map(|(order, size)| {
        OptionValue::new(format!("tee-{size}"), "tee-size", order as i32, size.to_uppercase())
    }));

    let mut variants = Vec::new();
    for (color_idx, (color, _, _)) in COLORS.iter().enumerate() {
        for (size_idx, size) in SIZES.iter().enumerate() {
            if MISSING.contains(&(*color, *size)) {
                continue;
            }

            // Deterministic spread with a few zeros
            let stock = ((color_idx * 7 + size_idx * 3) % 9) as i64;
            let mut variant = Variant::new(
                Uuid::new_v4().to_string(),
                format!("TEE-{}-{}", color.to_uppercase(), size.to_uppercase()),
                stock,
            )
            .with_pair("tee-color", format!("tee-{color}"))
            .with_pair("tee-size", format!("tee-{size}"));

            // Larger sizes cost more; black is on sale
            if *size == "xl" {
                variant = variant.with_price(Money::from_minor(2900));
            }
            if *color == "black" {
                variant = variant.with_sale_price(Money::from_minor(1900));
            }
            variant.image = Some(format!("/images/tee/{color}.jpg"));
            variants.push(variant);
        }
    }

    ProductCatalog {
        product: ProductBase {
            id: "classic-tee".to_string(),
            name: "Classic Tee".to_string(),
            price: Money::from_minor(2500),
            sale_price: None,
            stock: 0,
            has_variants: true,
        },
        options,
        values,
        variants,
    }
}

fn canvas_tote() -> ProductCatalog {
    ProductCatalog::simple(ProductBase {
        id: "canvas-tote".to_string(),
        name: "Canvas Tote".to_string(),
        price: Money::from_minor(1800),
        sale_price: Some(Money::from_minor(1500)),
        stock: 40,
        has_variants: false,
    })
}

fn gift_box() -> ProductCatalog {
    ProductCatalog::simple(ProductBase {
        id: "gift-box".to_string(),
        name: "Gift Box".to_string(),
        price: Money::from_minor(4500),
        sale_price: None,
        stock: 3,
        has_variants: true,
    })
}
