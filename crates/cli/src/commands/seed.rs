//! Database seeding command.
//!
//! Inserts a small demo catalog. Idempotent: rows are keyed by slug and
//! skipped when they already exist.
//!
//! ```bash
//! jg-cli seed
//! ```

use rust_decimal::Decimal;

use super::{CommandError, connect};

/// Demo categories: (name, slug).
const CATEGORIES: &[(&str, &str)] = &[
    ("Kitchen", "kitchen"),
    ("Garden", "garden"),
    ("Stationery", "stationery"),
];

/// Demo products: (category slug, name, slug, price in cents, inventory).
const PRODUCTS: &[(&str, &str, &str, i64, i32)] = &[
    ("kitchen", "Enamel Kettle", "enamel-kettle", 5499, 25),
    ("kitchen", "Walnut Serving Board", "walnut-serving-board", 3900, 40),
    ("garden", "Copper Watering Can", "copper-watering-can", 6250, 12),
    ("garden", "Seed Starter Kit", "seed-starter-kit", 1899, 80),
    ("stationery", "Linen Notebook", "linen-notebook", 1450, 120),
    ("stationery", "Brass Pen", "brass-pen", 2800, 60),
];

/// Seed the database with the demo catalog.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    for (name, slug) in CATEGORIES {
        sqlx::query(
            "INSERT INTO category (name, slug)
             VALUES ($1, $2)
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .execute(&pool)
        .await?;
    }
    tracing::info!(count = CATEGORIES.len(), "Categories seeded");

    for (category_slug, name, slug, price_cents, inventory) in PRODUCTS {
        sqlx::query(
            "INSERT INTO product (category_id, name, slug, description, price, inventory)
             SELECT c.id, $2, $3, '', $4, $5
             FROM category c
             WHERE c.slug = $1
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(category_slug)
        .bind(name)
        .bind(slug)
        .bind(Decimal::new(*price_cents, 2))
        .bind(inventory)
        .execute(&pool)
        .await?;
    }
    tracing::info!(count = PRODUCTS.len(), "Products seeded");

    Ok(())
}
