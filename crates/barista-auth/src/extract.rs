//! Bearer token extraction from the `Authorization` header.

use crate::error::AuthError;

/// Pull the bearer token out of an `Authorization` header value.
///
/// `header` is the raw header value, or `None` when the request carried no
/// `Authorization` header at all. The value is split on whitespace and must
/// be exactly a case-insensitive `Bearer` scheme followed by one token; each
/// way that can fail has its own error so clients get a precise reason.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::HeaderMissing)?;
    if header.is_empty() {
        return Err(AuthError::HeaderMissing);
    }

    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(AuthError::SchemeNotBearer),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::SchemeNotBearer),
        [_] => Err(AuthError::TokenMissing),
        [_, token] => Ok(token),
        _ => Err(AuthError::TooManyParts),
    }
}
