//! Unified error type for the review service.
//!
//! Every fallible operation in the crate returns [`Result`]. Store failures are
//! carried as [`Error::Database`] and never recovered locally; the surrounding
//! transaction is dropped and rolled back.

use crate::identity::Role;
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Any failure reported by the persistence store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (reading config, binding the listener)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No active product matches the given slug or id
    #[error("Product not found: {product}")]
    ProductNotFound {
        /// The slug or id that was looked up
        product: String,
    },

    /// No review exists with the given id
    #[error("There is no review found with id {review_id}")]
    ReviewNotFound {
        /// The id that was looked up
        review_id: i64,
    },

    /// The caller lacks the role the operation requires
    #[error("You must be a {required} user for this action")]
    Forbidden {
        /// Role the operation requires
        required: Role,
    },

    /// The caller could not be identified
    #[error("Authentication required: {reason}")]
    Unauthorized {
        /// Why identification failed
        reason: String,
    },

    /// Request body or path could not be parsed
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Why the request was rejected
        message: String,
    },

    /// Grade outside the accepted range
    #[error("Grade {grade} is outside the accepted range {min}..={max}")]
    InvalidGrade {
        /// The submitted grade
        grade: i32,
        /// Lowest accepted grade
        min: i32,
        /// Highest accepted grade
        max: i32,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
