//! Error types for the gateway crate.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stack_core::WidgetId;
use stack_store::StoreError;

use crate::rate::RateLimitExceeded;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the widget store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The rate limiter refused the request.
    #[error(transparent)]
    RateLimited(#[from] RateLimitExceeded),

    /// A lookup by id found nothing.
    #[error("widget not found: {0}")]
    WidgetNotFound(WidgetId),

    /// The request is malformed or contains invalid values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Store(StoreError::NotFound(_)) | GatewayError::WidgetNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            GatewayError::Store(
                StoreError::NullAttribute { .. } | StoreError::TooManyRequested { .. },
            )
            | GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
