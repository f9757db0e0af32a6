//! Review endpoints.
//!
//! Thin wrappers that extract the request, call into [`crate::core::review`] and
//! shape the response. Authorization lives in the core, not here.

use crate::{
    api::{
        ApiState,
        extract::{ApiJson, ApiPath},
    },
    core::review::{self, NewReview},
    entities::ReviewModel,
    errors::Result,
    identity::Caller,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Body returned by write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// HTTP status of the operation
    pub status_code: u16,
    /// Outcome description
    pub transaction: String,
}

impl Acknowledgement {
    fn new(status: StatusCode, transaction: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            transaction: transaction.to_string(),
        }
    }
}

/// `GET /reviews/`
pub async fn all_reviews(State(state): State<ApiState>) -> Result<Json<Vec<ReviewModel>>> {
    let reviews = review::list_all_reviews(&state.database).await?;
    Ok(Json(reviews))
}

/// `GET /reviews/{product_slug}`
pub async fn products_reviews(
    State(state): State<ApiState>,
    ApiPath(product_slug): ApiPath<String>,
) -> Result<Json<Vec<ReviewModel>>> {
    let reviews = review::list_reviews_for_product(&state.database, &product_slug).await?;
    Ok(Json(reviews))
}

/// `POST /reviews/`
pub async fn add_review(
    State(state): State<ApiState>,
    caller: Caller,
    ApiJson(new_review): ApiJson<NewReview>,
) -> Result<(StatusCode, Json<Acknowledgement>)> {
    review::add_review(&state.database, &state.rules, &caller, new_review).await?;
    Ok((
        StatusCode::CREATED,
        Json(Acknowledgement::new(StatusCode::CREATED, "Successful")),
    ))
}

/// `DELETE /reviews/{review_id}`
pub async fn delete_review(
    State(state): State<ApiState>,
    caller: Caller,
    ApiPath(review_id): ApiPath<i64>,
) -> Result<Json<Acknowledgement>> {
    review::retire_review(&state.database, &state.rules, &caller, review_id).await?;
    Ok(Json(Acknowledgement::new(
        StatusCode::OK,
        "Review delete is successful",
    )))
}
