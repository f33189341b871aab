//! HTTP error responses.
//!
//! Every failure renders the fixed envelope `{"success": false, "error":
//! <status>, "message": <text>}` with a stable message per status code.
//! Token failures add their taxonomy `code` as a sibling field so clients
//! can react without parsing prose.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use barista_auth::AuthError;

use crate::store::StoreError;

/// Errors surfaced by the drinks API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected by the token pipeline.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage lookup or mutation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed path input, such as a non-numeric drink id.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body missing or undeserializable.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
}

/// Fixed response body for a plain HTTP status.
pub fn status_body(status: StatusCode) -> Json<serde_json::Value> {
    let message = match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        StatusCode::FORBIDDEN => "Access Denied/Forbidden",
        StatusCode::NOT_FOUND => "Resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not Allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "Internal Server Error",
    };
    Json(json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
    }))
}

/// Fallback for unmatched paths.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, status_body(StatusCode::NOT_FOUND)).into_response()
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        status_body(StatusCode::METHOD_NOT_ALLOWED),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Key endpoint trouble is an operator problem, not a client one;
            // it gets the plain 500 body rather than a taxonomy code.
            ApiError::Auth(AuthError::KeyFetch(err)) => {
                tracing::error!(error = %err, "token verification unavailable");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, status_body(status)).into_response()
            }
            ApiError::Auth(err) => {
                tracing::debug!(code = err.code(), error = %err, "request rejected");
                let status = StatusCode::from_u16(err.status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = Json(json!({
                    "success": false,
                    "error": status.as_u16(),
                    "code": err.code(),
                    "message": err.description(),
                }));
                (status, body).into_response()
            }
            ApiError::Store(StoreError::NotFound { .. }) => {
                let status = StatusCode::NOT_FOUND;
                (status, status_body(status)).into_response()
            }
            ApiError::Store(err) => {
                tracing::warn!(error = %err, "storage fault");
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                (status, status_body(status)).into_response()
            }
            ApiError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "bad request");
                let status = StatusCode::BAD_REQUEST;
                (status, status_body(status)).into_response()
            }
            ApiError::Unprocessable(detail) => {
                tracing::debug!(detail = %detail, "unprocessable request");
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                (status, status_body(status)).into_response()
            }
        }
    }
}
