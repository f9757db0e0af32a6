//! Review entity - A customer's graded comment on a product.
//!
//! Reviews are append-only: after creation only `is_active` ever changes, and
//! retired reviews stay in the table.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who wrote the review
    pub user_id: i64,
    /// ID of the reviewed product
    pub product_id: i64,
    /// Optional free-text comment
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    /// When the review was submitted (UTC)
    pub comment_date: DateTimeUtc,
    /// Score given to the product
    pub grade: i32,
    /// Soft delete flag - false once an admin retires the review
    pub is_active: bool,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
