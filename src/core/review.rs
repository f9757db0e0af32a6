//! Review business logic - Listing, submitting and retiring reviews.
//!
//! Submitting a review and recomputing the product rating happen in one store
//! transaction. The product row is read with an exclusive lock and, on backends
//! that support it, the transaction runs with serializable isolation, so two
//! concurrent submissions for the same product cannot lose each other's grade.
//! `SQLite` serializes writers on its own.
//!
//! Retiring a review only flips its `is_active` flag. Unless
//! [`ReviewRules::recalculate_on_retire`] is set, the product rating keeps the
//! value computed at the last submission.

use crate::{
    config::ReviewRules,
    core::{product, rating},
    entities::{Review, review},
    errors::{Error, Result},
    identity::{Caller, Role},
};
use sea_orm::{
    DatabaseBackend, DatabaseTransaction, IsolationLevel, QueryOrder, Set,
    TransactionTrait, prelude::*,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// A review as submitted by a customer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewReview {
    /// Product being reviewed
    #[serde(rename = "product")]
    pub product_id: i64,
    /// Optional free-text comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Score given to the product
    pub grade: i32,
}

/// Retrieves all active reviews, oldest first.
pub async fn list_all_reviews(db: &DatabaseConnection) -> Result<Vec<review::Model>> {
    Review::find()
        .filter(review::Column::IsActive.eq(true))
        .order_by_asc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active reviews of the active product with the given slug.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if no active product has this slug.
pub async fn list_reviews_for_product(
    db: &DatabaseConnection,
    product_slug: &str,
) -> Result<Vec<review::Model>> {
    let product = product::get_active_product_by_slug(db, product_slug)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            product: product_slug.to_string(),
        })?;

    Review::find()
        .filter(review::Column::IsActive.eq(true))
        .filter(review::Column::ProductId.eq(product.id))
        .order_by_asc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a review by id, whether active or retired.
pub async fn get_review_by_id<C>(db: &C, review_id: i64) -> Result<Option<review::Model>>
where
    C: ConnectionTrait,
{
    Review::find_by_id(review_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Starts a transaction strong enough for the rating read-modify-write.
async fn begin_serializable(db: &DatabaseConnection) -> Result<DatabaseTransaction> {
    let isolation = match db.get_database_backend() {
        DatabaseBackend::Sqlite => None,
        _ => Some(IsolationLevel::Serializable),
    };
    db.begin_with_config(isolation, None)
        .await
        .map_err(Into::into)
}

/// Records a customer's review and recomputes the product rating.
///
/// The insert and the rating update commit together: if any step fails the
/// transaction is rolled back and neither the review nor a new rating is visible.
///
/// # Errors
/// Returns an error if:
/// - The caller is not a customer ([`Error::Forbidden`])
/// - The grade is outside `rules` ([`Error::InvalidGrade`])
/// - No active product has `product_id` ([`Error::ProductNotFound`])
/// - The store fails
#[instrument(skip(db, rules, new_review), fields(product_id = new_review.product_id, user_id = caller.id))]
pub async fn add_review(
    db: &DatabaseConnection,
    rules: &ReviewRules,
    caller: &Caller,
    new_review: NewReview,
) -> Result<review::Model> {
    caller.require(Role::Customer)?;
    rules.check_grade(new_review.grade)?;

    let txn = begin_serializable(db).await?;

    let product = product::lock_active_product_by_id(&txn, new_review.product_id)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            product: new_review.product_id.to_string(),
        })?;

    let review_model = review::ActiveModel {
        user_id: Set(caller.id),
        product_id: Set(product.id),
        comment: Set(new_review.comment),
        comment_date: Set(chrono::Utc::now()),
        grade: Set(new_review.grade),
        is_active: Set(true),
        ..Default::default()
    };
    let created = review_model.insert(&txn).await?;

    let rating = rating::recalculate_product_rating(&txn, product.id).await?;

    txn.commit().await?;

    info!(
        review_id = created.id,
        ?rating,
        "Review added for product '{}'",
        product.slug
    );
    Ok(created)
}

/// Retires (soft-deletes) a review.
///
/// The lookup is by id alone, so an already retired review can be retired
/// again. The review's existence is checked before the caller's role.
///
/// # Errors
/// Returns an error if:
/// - No review has `review_id` ([`Error::ReviewNotFound`])
/// - The caller is not an admin ([`Error::Forbidden`])
/// - The store fails
#[instrument(skip(db, rules), fields(user_id = caller.id))]
pub async fn retire_review(
    db: &DatabaseConnection,
    rules: &ReviewRules,
    caller: &Caller,
    review_id: i64,
) -> Result<review::Model> {
    let txn = begin_serializable(db).await?;

    let existing = get_review_by_id(&txn, review_id)
        .await?
        .ok_or(Error::ReviewNotFound { review_id })?;

    caller.require(Role::Admin)?;

    let product_id = existing.product_id;
    let mut review: review::ActiveModel = existing.into();
    review.is_active = Set(false);
    let retired = review.update(&txn).await?;

    if rules.recalculate_on_retire {
        rating::recalculate_product_rating(&txn, product_id).await?;
    } else {
        debug!(product_id, "Leaving product rating unchanged after retirement");
    }

    txn.commit().await?;

    info!(review_id, product_id, "Review retired");
    Ok(retired)
}
