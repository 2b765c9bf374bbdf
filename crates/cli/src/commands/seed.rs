//! Seed the catalog from a JSON file.
//!
//! The file is an array of product records:
//!
//! ```json
//! [
//!   {"id": "p-1", "name": "Shoe", "price": 49.99, "img": "shoe.png", "category": "footwear"},
//!   {"name": "Kurta", "price": 799.0}
//! ]
//! ```
//!
//! Records without an `id` get a generated one.

use std::path::Path;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;

use kharido_core::ProductId;
use kharido_storefront::db::{self, ProductRepository};
use kharido_storefront::models::product::NewProduct;

/// One record of the seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default)]
    img: String,
    #[serde(default)]
    category: Option<String>,
}

/// Insert catalog products from `file_path`.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot be
/// read or parsed, or database operations fail.
pub async fn products(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("KHARIDO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "KHARIDO_DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<SeedProduct> = serde_json::from_str(&raw)?;

    let pool = db::create_pool(&database_url).await?;
    let repo = ProductRepository::new(&pool);

    if clear_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Cleared existing catalog");
    }

    let mut inserted = 0_usize;
    for entry in entries {
        let product = NewProduct {
            id: entry.id.map_or_else(ProductId::generate, |id| ProductId::new(id)),
            name: entry.name,
            price: entry.price,
            img: entry.img,
            category: entry.category,
        };
        repo.insert(&product).await?;
        inserted += 1;
    }

    info!(inserted, "Catalog seeded");
    Ok(())
}
