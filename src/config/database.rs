//! Database configuration module.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Product, Review};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Default location of the review database when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/reviews.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the parent directory of a file-backed `SQLite` URL so the driver can
/// create the database file. Other URLs are left alone.
pub fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Creates the `products` and `reviews` tables if they do not exist yet.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();
    let mut review_table = schema.create_table_from_entity(Review);
    review_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&review_table)).await?;

    debug!("Ensured products and reviews tables exist");
    Ok(())
}
