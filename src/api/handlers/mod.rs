//! HTTP handlers organized by resource.

/// `/reviews` handlers
pub mod reviews;
