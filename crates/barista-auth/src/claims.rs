//! Verified token claims and the permission check.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried by a verified access token.
///
/// Tokens are issued by the auth tenant; the API only ever sees them after
/// signature, expiry, audience, and issuer checks have passed. `permissions`
/// is optional on the wire: a token from a tenant without RBAC enabled has no
/// such field at all, which the permission check treats differently from an
/// empty or insufficient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, `https://{domain}/`.
    pub iss: String,

    /// Subject, the tenant's user identifier.
    pub sub: String,

    /// Audience(s) the token was issued for.
    pub aud: Audience,

    /// Expiration time (seconds since epoch).
    pub exp: u64,

    /// Permissions granted to the bearer, e.g. `post:drinks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// The `aud` claim, a single audience or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    /// Check whether `value` is among the audiences.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Audience::One(aud) => aud == value,
            Audience::Many(auds) => auds.iter().any(|aud| aud == value),
        }
    }
}

impl Claims {
    /// Check that the token grants `permission`.
    ///
    /// Membership is strict string equality. A token without any
    /// `permissions` field is rejected as malformed claims; a token whose
    /// list lacks the permission is rejected as unauthorized.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let granted = self.permissions.as_ref().ok_or(AuthError::PermissionsMissing)?;
        if granted.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied { permission: permission.to_string() })
        }
    }
}
