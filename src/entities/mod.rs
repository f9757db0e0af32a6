//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod product;
pub mod review;

// Re-export specific types to avoid conflicts
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
