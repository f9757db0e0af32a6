//! HTTP mapping for [`Error`].
//!
//! Every error becomes a JSON body of the form `{"detail": "..."}`. Store and
//! startup errors are logged in full but answered with a generic message.

use crate::errors::Error;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

impl Error {
    /// Returns the HTTP status code for this error.
    ///
    /// - Missing product or review: 404 Not Found
    /// - Missing role: 403 Forbidden
    /// - No caller identity: 401 Unauthorized
    /// - Grade out of range or malformed body/path: 422 Unprocessable Entity
    /// - Everything else: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ProductNotFound { .. } | Self::ReviewNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidGrade { .. } | Self::InvalidRequest { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}
