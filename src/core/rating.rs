//! Product rating recalculation.
//!
//! A product's `rating` is the arithmetic mean of `grade` over its active
//! reviews. It is stored rather than computed on read, so it must be rewritten
//! inside the same transaction that changes the review set.

use crate::{
    entities::{Product, Review, product, review},
    errors::Result,
};
use sea_orm::{ConnectionTrait, QuerySelect, prelude::*, sea_query::Expr};
use tracing::debug;

/// Arithmetic mean of `grades`, or `None` for an empty set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_grade(grades: &[i32]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    let sum: i64 = grades.iter().map(|&g| i64::from(g)).sum();
    Some(sum as f64 / grades.len() as f64)
}

/// Grades of all active reviews for `product_id`.
pub async fn active_grades<C>(db: &C, product_id: i64) -> Result<Vec<i32>>
where
    C: ConnectionTrait,
{
    Review::find()
        .select_only()
        .column(review::Column::Grade)
        .filter(review::Column::ProductId.eq(product_id))
        .filter(review::Column::IsActive.eq(true))
        .into_tuple::<i32>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Re-reads the active reviews of `product_id` and stores their mean as the
/// product rating. With no active reviews left the rating becomes NULL.
///
/// Pass the open transaction as `db` so the read and the write commit together.
pub async fn recalculate_product_rating<C>(db: &C, product_id: i64) -> Result<Option<f64>>
where
    C: ConnectionTrait,
{
    let grades = active_grades(db, product_id).await?;
    let rating = mean_grade(&grades);

    Product::update_many()
        .col_expr(product::Column::Rating, Expr::value(rating))
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    debug!(
        product_id,
        reviews = grades.len(),
        ?rating,
        "Recalculated product rating"
    );
    Ok(rating)
}
