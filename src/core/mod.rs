//! Core business logic - framework-agnostic review, rating and product operations.

/// Product lookups and catalog seeding
pub mod product;
/// Product rating recalculation
pub mod rating;
/// Review listing, submission and retirement
pub mod review;
