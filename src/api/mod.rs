//! HTTP layer - axum router, shared state and request handlers
//!
//! This module exposes the review service over HTTP. Handlers stay thin: every
//! rule (roles, grade bounds, rating maintenance) is enforced in
//! [`crate::core::review`].

/// Error to HTTP response mapping
pub mod error;
/// Caller, body and path extractors
pub mod extract;
/// Endpoint handlers
pub mod handlers;

use crate::{
    config::ReviewRules,
    identity::{HeaderIdentityProvider, IdentityProvider},
};
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared data available to all handlers.
/// Holds the database connection, the review rules and the identity provider.
#[derive(Clone)]
pub struct ApiState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Rules applied when submitting and retiring reviews
    pub rules: ReviewRules,
    /// Resolves the caller of each authenticated request
    pub identity: Arc<dyn IdentityProvider>,
}

impl ApiState {
    /// Creates state that trusts gateway identity headers.
    #[must_use]
    pub fn new(database: DatabaseConnection, rules: ReviewRules) -> Self {
        Self::with_identity(database, rules, Arc::new(HeaderIdentityProvider))
    }

    /// Creates state with a custom identity provider.
    #[must_use]
    pub fn with_identity(
        database: DatabaseConnection,
        rules: ReviewRules,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            database,
            rules,
            identity,
        }
    }
}

/// Builds the review API router.
///
/// `GET` and `DELETE` share the `/reviews/{key}` route: `GET` reads the key as a
/// product slug, `DELETE` as a numeric review id.
pub fn router(state: ApiState) -> Router {
    use handlers::reviews;

    Router::new()
        .route(
            "/reviews",
            get(reviews::all_reviews).post(reviews::add_review),
        )
        .route(
            "/reviews/",
            post(reviews::add_review).get(reviews::all_reviews),
        )
        .route(
            "/reviews/:key",
            get(reviews::products_reviews).delete(reviews::delete_review),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        entities::{Product, Review, ReviewModel},
        errors::Result,
        identity::{USER_ID_HEADER, USER_ROLES_HEADER},
        test_utils::*,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use sea_orm::EntityTrait;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, roles: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(roles) = roles {
            builder = builder
                .header(USER_ID_HEADER, "10")
                .header(USER_ROLES_HEADER, roles);
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_review_lifecycle_over_http() -> Result<()> {
        let (db, widget) = setup_with_product("widget").await?;
        let app = router(ApiState::new(db.clone(), ReviewRules::default()));

        let body = json!({ "product": widget.id, "comment": "Great", "grade": 4 });
        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("customer"), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({ "status_code": 201, "transaction": "Successful" })
        );

        let body = json!({ "product": widget.id, "grade": 2 });
        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("customer"), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let rating = Product::find_by_id(widget.id).one(&db).await?.unwrap().rating;
        assert_eq!(rating, Some(3.0));

        let response = app
            .clone()
            .oneshot(request("GET", "/reviews/widget", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let reviews: Vec<ReviewModel> = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].comment, None);

        let uri = format!("/reviews/{}", reviews[0].id);
        let response = app
            .clone()
            .oneshot(request("DELETE", &uri, Some("admin"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "status_code": 200, "transaction": "Review delete is successful" })
        );

        let response = app
            .oneshot(request("GET", "/reviews/", None, None))
            .await
            .unwrap();
        let reviews: Vec<ReviewModel> = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].grade, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_error_responses() -> Result<()> {
        let (db, widget) = setup_with_product("widget").await?;
        let app = router(ApiState::new(db.clone(), ReviewRules::default()));
        let body = json!({ "product": widget.id, "grade": 4 });

        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", None, Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("admin"), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(response).await,
            json!({ "detail": "You must be a customer user for this action" })
        );

        let missing = json!({ "product": widget.id + 1, "grade": 4 });
        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("customer"), Some(missing)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let out_of_range = json!({ "product": widget.id, "grade": 9 });
        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("customer"), Some(out_of_range)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .clone()
            .oneshot(request("GET", "/reviews/gizmo", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/reviews/404", Some("admin"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let review = insert_test_review(&db, widget.id, 3, true).await?;
        let uri = format!("/reviews/{}", review.id);
        let response = app
            .oneshot(request("DELETE", &uri, Some("customer"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(Review::find().all(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_requests_return_detail() -> Result<()> {
        let (db, widget) = setup_with_product("widget").await?;
        let app = router(ApiState::new(db.clone(), ReviewRules::default()));

        let no_grade = json!({ "product": widget.id });
        let response = app
            .clone()
            .oneshot(request("POST", "/reviews/", Some("customer"), Some(no_grade)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Invalid request: "));
        assert!(detail.contains("missing field `grade`"));

        let response = app
            .oneshot(request("DELETE", "/reviews/abc", Some("admin"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("Invalid request: "));
        assert!(detail.contains("abc"));

        assert!(Review::find().all(&db).await?.is_empty());

        Ok(())
    }
}
