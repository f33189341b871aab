//! Bearer token verification pipeline.

use jsonwebtoken::{Algorithm, Validation, decode, decode_header};

use crate::claims::Claims;
use crate::error::AuthError;
use crate::keys::JwksCache;

/// Verifies bearer tokens issued by the auth tenant.
///
/// The accepted algorithm is parsed from configuration once at startup and
/// pinned here; the token's own `alg` header is never consulted beyond the
/// check that it matches.
pub struct TokenVerifier {
    keys: JwksCache,
    algorithm: Algorithm,
    audience: String,
    issuer: String,
}

impl TokenVerifier {
    /// Create a verifier for tokens addressed to `audience` by `issuer`.
    pub fn new(
        keys: JwksCache,
        algorithm: Algorithm,
        audience: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self { keys, algorithm, audience: audience.into(), issuer: issuer.into() }
    }

    /// Run the verification pipeline over a candidate token.
    ///
    /// Decodes the unverified JOSE header for the key id, resolves the key
    /// through the cache, then verifies signature, expiry, audience, and
    /// issuer in one pass.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self.keys.decoding_key(&kid).await?;

        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        // Expiry is enforced at verification time with no grace window.
        validation.leeway = 0;

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}
