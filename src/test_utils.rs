//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases,
//! callers and entities with sensible defaults.

use crate::{
    core::product,
    entities::{self, Product, review},
    errors::Result,
    identity::{Caller, Role},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// User id carried by [`customer`]
pub const CUSTOMER_ID: i64 = 10;
/// User id carried by [`admin`]
pub const ADMIN_ID: i64 = 1;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A caller holding only the customer role.
#[must_use]
pub fn customer() -> Caller {
    Caller::new(CUSTOMER_ID, [Role::Customer])
}

/// A caller holding only the admin role.
#[must_use]
pub fn admin() -> Caller {
    Caller::new(ADMIN_ID, [Role::Admin])
}

/// An authenticated caller without any role.
#[must_use]
pub fn anonymous() -> Caller {
    Caller::new(99, [])
}

/// Creates an active, unrated product named after its slug.
pub async fn create_test_product(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, &format!("Test {slug}"), slug).await
}

/// Sets up a database holding a single product.
/// Returns (db, product) for review-related tests.
pub async fn setup_with_product(
    slug: &str,
) -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, slug).await?;
    Ok((db, product))
}

/// Marks a product inactive.
pub async fn deactivate_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    if let Some(found) = Product::find_by_id(product_id).one(db).await? {
        let mut active: entities::product::ActiveModel = found.into();
        active.is_active = Set(false);
        active.update(db).await?;
    }
    Ok(())
}

/// Inserts a review row directly, bypassing role checks and rating updates.
pub async fn insert_test_review(
    db: &DatabaseConnection,
    product_id: i64,
    grade: i32,
    is_active: bool,
) -> Result<review::Model> {
    let model = review::ActiveModel {
        user_id: Set(CUSTOMER_ID),
        product_id: Set(product_id),
        comment: Set(None),
        comment_date: Set(chrono::Utc::now()),
        grade: Set(grade),
        is_active: Set(is_active),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}
