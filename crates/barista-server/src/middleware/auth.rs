//! Bearer-token permission gate.
//!
//! Guarded routes are wrapped with [`authorize`] via
//! `middleware::from_fn_with_state`, carrying the application state together
//! with the single permission that route requires.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use barista_auth::{AuthError, bearer_token};

use crate::error::ApiError;
use crate::state::AppState;

/// Permission required by one guarded route.
#[derive(Clone)]
pub struct Permission(Arc<str>);

impl Permission {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Gate a request behind a verified token carrying the required permission.
///
/// The pipeline runs in order: pull the bearer token from the Authorization
/// header, verify signature, expiry, audience, and issuer against the tenant
/// key set, then check the permissions claim for exact membership. Verified
/// claims are attached to request extensions for downstream handlers.
pub async fn authorize(
    State((state, required)): State<(AppState, Permission)>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not visible ASCII cannot hold a bearer token; only a
    // truly absent header counts as missing.
    let header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedToken)?),
        None => None,
    };
    let token = bearer_token(header)?;

    let claims = state.verifier().verify(token).await?;
    claims.require_permission(required.as_str())?;

    tracing::debug!(sub = %claims.sub, permission = required.as_str(), "request authorized");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
