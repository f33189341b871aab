//! Error types for token verification.

use thiserror::Error;

/// Errors that can occur while authorizing a bearer token.
///
/// Every variant maps onto a fixed wire taxonomy: an HTTP status, a stable
/// machine-readable code, and a fixed human-readable description. The
/// `Display` text carries diagnostic detail for logs; API responses are built
/// from [`status`](AuthError::status), [`code`](AuthError::code), and
/// [`description`](AuthError::description) only.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header on the request.
    #[error("authorization header missing")]
    HeaderMissing,

    /// The `Authorization` header does not use the bearer scheme.
    #[error("authorization header scheme is not bearer")]
    SchemeNotBearer,

    /// The bearer scheme is present but no token follows it.
    #[error("no token after bearer scheme")]
    TokenMissing,

    /// The header splits into more than a scheme and a token.
    #[error("authorization header has trailing parts")]
    TooManyParts,

    /// The candidate token is not a decodable JWT.
    #[error("token header cannot be decoded")]
    MalformedToken,

    /// The JOSE header carries no key id.
    #[error("token header has no key id")]
    MissingKeyId,

    /// No key in the signing authority's set matches the token's key id.
    #[error("no key in the set matches kid {kid}")]
    UnknownKeyId { kid: String },

    /// The token's expiry has passed.
    #[error("token has expired")]
    TokenExpired,

    /// The token's audience or issuer does not match this API.
    #[error("audience or issuer mismatch")]
    ClaimsMismatch,

    /// Signature or structural verification failed.
    #[error("token verification failed")]
    VerificationFailed,

    /// The verified claims carry no `permissions` field.
    #[error("claims carry no permissions field")]
    PermissionsMissing,

    /// The `permissions` field lacks the required permission.
    #[error("permission {permission} not granted")]
    PermissionDenied { permission: String },

    /// The key set could not be refreshed from the authority.
    #[error(transparent)]
    KeyFetch(#[from] KeyFetchError),
}

/// Errors raised while fetching the remote key set.
#[derive(Debug, Error)]
pub enum KeyFetchError {
    /// The key set endpoint could not be reached.
    #[error("key set endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The key set endpoint answered with a non-success status.
    #[error("key set endpoint returned HTTP {status}")]
    BadStatus { status: u16 },

    /// The response body did not parse as a JWK set.
    #[error("key set response is not a valid JWKS: {0}")]
    Malformed(String),
}

impl AuthError {
    /// HTTP status this error answers with.
    pub fn status(&self) -> u16 {
        match self {
            Self::HeaderMissing
            | Self::SchemeNotBearer
            | Self::TokenMissing
            | Self::TooManyParts
            | Self::MalformedToken
            | Self::MissingKeyId
            | Self::TokenExpired
            | Self::ClaimsMismatch => 401,
            Self::UnknownKeyId { .. } | Self::VerificationFailed | Self::PermissionsMissing => 400,
            Self::PermissionDenied { .. } => 403,
            Self::KeyFetch(_) => 500,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "authorization_header_missing",
            Self::SchemeNotBearer
            | Self::TokenMissing
            | Self::TooManyParts
            | Self::MalformedToken
            | Self::MissingKeyId
            | Self::UnknownKeyId { .. }
            | Self::VerificationFailed => "invalid_header",
            Self::TokenExpired => "token_expired",
            Self::ClaimsMismatch | Self::PermissionsMissing => "invalid_claims",
            Self::PermissionDenied { .. } => "unauthorized",
            Self::KeyFetch(_) => "internal_error",
        }
    }

    /// Fixed human-readable description for API clients.
    pub fn description(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "Authorization header is expected.",
            Self::SchemeNotBearer => "Authorization header must start with \"Bearer\".",
            Self::TokenMissing => "Token not found.",
            Self::TooManyParts => "Authorization header must be bearer token.",
            Self::MalformedToken | Self::VerificationFailed => {
                "Unable to parse authentication token."
            }
            Self::MissingKeyId => "Authorization malformed.",
            Self::UnknownKeyId { .. } => "Unable to find the appropriate key.",
            Self::TokenExpired => "Token expired.",
            Self::ClaimsMismatch => "Incorrect claims. Please, check the audience and issuer.",
            Self::PermissionsMissing => "Permissions not included in JWT.",
            Self::PermissionDenied { .. } => "Permission not found.",
            Self::KeyFetch(_) => "Internal Server Error",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::ClaimsMismatch,
            _ => AuthError::VerificationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failures_answer_401() {
        for err in [
            AuthError::HeaderMissing,
            AuthError::SchemeNotBearer,
            AuthError::TokenMissing,
            AuthError::TooManyParts,
        ] {
            assert_eq!(err.status(), 401);
        }
        assert_eq!(AuthError::HeaderMissing.code(), "authorization_header_missing");
        assert_eq!(AuthError::TokenMissing.code(), "invalid_header");
    }

    #[test]
    fn unknown_kid_is_a_400_invalid_header() {
        let err = AuthError::UnknownKeyId { kid: "k9".into() };
        assert_eq!(err.status(), 400);
        assert_eq!(err.code(), "invalid_header");
        assert_eq!(err.description(), "Unable to find the appropriate key.");
    }

    #[test]
    fn permission_outcomes_are_distinct() {
        let missing = AuthError::PermissionsMissing;
        assert_eq!(missing.status(), 400);
        assert_eq!(missing.code(), "invalid_claims");

        let denied = AuthError::PermissionDenied { permission: "post:drinks".into() };
        assert_eq!(denied.status(), 403);
        assert_eq!(denied.code(), "unauthorized");
        assert_eq!(denied.description(), "Permission not found.");
    }

    #[test]
    fn expired_signature_maps_to_token_expired() {
        let jwt_err =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        let err: AuthError = jwt_err.into();
        assert!(matches!(err, AuthError::TokenExpired));
        assert_eq!(err.status(), 401);
        assert_eq!(err.code(), "token_expired");
    }

    #[test]
    fn audience_and_issuer_failures_map_to_claims_mismatch() {
        for kind in [
            jsonwebtoken::errors::ErrorKind::InvalidAudience,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer,
        ] {
            let err: AuthError = jsonwebtoken::errors::Error::from(kind).into();
            assert!(matches!(err, AuthError::ClaimsMismatch));
            assert_eq!(err.status(), 401);
        }
    }

    #[test]
    fn other_verification_failures_answer_400() {
        let jwt_err =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSignature);
        let err: AuthError = jwt_err.into();
        assert!(matches!(err, AuthError::VerificationFailed));
        assert_eq!(err.status(), 400);
        assert_eq!(err.description(), "Unable to parse authentication token.");
    }
}
