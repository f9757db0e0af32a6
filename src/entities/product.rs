//! Product entity - Represents a catalog product that can be reviewed.
//!
//! Products are owned by the catalog; this service only reads them and maintains
//! the derived `rating` column. Products are never physically deleted, an
//! inactive product is simply hidden from lookups.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Widget")
    pub name: String,
    /// URL-friendly unique key used by product lookups
    #[sea_orm(unique)]
    pub slug: String,
    /// Soft delete flag - inactive products cannot be reviewed or listed
    pub is_active: bool,
    /// Mean grade over active reviews, `None` until the first review
    pub rating: Option<f64>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
