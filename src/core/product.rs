//! Product lookups used by the review service, plus catalog seeding.
//!
//! Products belong to the catalog. Reviews only ever see active products, and the
//! only column this crate writes after creation is `rating` (see
//! [`crate::core::rating`]).

use crate::{
    config::ProductConfig,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QuerySelect, Set, prelude::*};
use tracing::{debug, info};

/// Finds an active product by slug, returning None if not found or inactive.
pub async fn get_active_product_by_slug<C>(db: &C, slug: &str) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Slug.eq(slug))
        .filter(product::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active product by id and locks its row until the surrounding
/// transaction ends.
///
/// On SQLite the lock clause is omitted; the database-wide write lock taken by
/// the transaction serializes writers instead.
pub async fn lock_active_product_by_id<C>(
    db: &C,
    product_id: i64,
) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .filter(product::Column::IsActive.eq(true))
        .lock_exclusive()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new active, unrated product.
///
/// # Errors
/// Returns an error if:
/// - The name or slug is empty or whitespace-only
/// - The database insert fails (including a duplicate slug)
pub async fn create_product<C>(db: &C, name: &str, slug: &str) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if slug.trim().is_empty() {
        return Err(Error::Config {
            message: "Product slug cannot be empty".to_string(),
        });
    }

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        slug: Set(slug.trim().to_string()),
        is_active: Set(true),
        rating: Set(None),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Inserts every catalog product whose slug is not in the database yet.
///
/// Existing products are left alone, whether active or not, so running this on
/// every startup is safe. Returns the number of products inserted.
pub async fn seed_products(db: &DatabaseConnection, catalog: &[ProductConfig]) -> Result<usize> {
    let mut inserted = 0;
    for entry in catalog {
        let existing = Product::find()
            .filter(product::Column::Slug.eq(entry.slug.trim()))
            .one(db)
            .await?;
        if existing.is_some() {
            debug!("Product '{}' already present, skipping", entry.slug);
            continue;
        }
        create_product(db, &entry.name, &entry.slug).await?;
        inserted += 1;
    }
    info!("Seeded {} new product(s) from catalog", inserted);
    Ok(inserted)
}
