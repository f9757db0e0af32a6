//! Request extractors.
//!
//! [`ApiJson`] and [`ApiPath`] wrap axum's extractors so that malformed bodies
//! and path segments are answered with [`Error::InvalidRequest`] and the usual
//! `{"detail"}` body instead of axum's plain-text rejections.

use crate::{api::ApiState, errors::Error, identity::Caller};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

/// JSON body extractor rejecting with [`Error`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor rejecting with [`Error`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl FromRequestParts<ApiState> for Caller {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        state.identity.resolve_caller(&parts.headers)
    }
}
