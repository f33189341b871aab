//! Remote key set resolution with a time-boxed cache.

use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;

use crate::error::{AuthError, KeyFetchError};

/// A fetched key set. Replaced wholesale on refresh, never mutated in place.
struct CachedKeys {
    set: JwkSet,
    fetched_at: Instant,
}

/// The signing authority's key set, fetched over HTTPS and cached.
///
/// Lookups hit the cache while it is younger than the TTL. A stale cache, an
/// empty cache, or a fresh cache that does not contain the requested key id
/// all trigger a refresh of the whole set before the lookup is retried, so a
/// key rotation at the authority is picked up on the first token signed with
/// the new key. Concurrent refreshes coalesce: a task that waited on the
/// write lock while another task refreshed reuses that result instead of
/// fetching again.
pub struct JwksCache {
    http: reqwest::Client,
    url: String,
    ttl: Duration,
    cached: RwLock<Option<CachedKeys>>,
}

impl JwksCache {
    /// Create a cache over the key set served at `url`.
    ///
    /// The `http` client should carry a request timeout so a hung authority
    /// endpoint cannot stall request handling.
    pub fn new(http: reqwest::Client, url: impl Into<String>, ttl: Duration) -> Self {
        Self { http, url: url.into(), ttl, cached: RwLock::new(None) }
    }

    /// Resolve the decoding key for `kid`.
    ///
    /// A `kid` still absent after a refresh is an authorization failure, not
    /// a retry loop; a refresh that itself fails surfaces as
    /// [`AuthError::KeyFetch`].
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let observed = {
            let cached = self.cached.read().await;
            match cached.as_ref() {
                Some(entry) => {
                    if entry.fetched_at.elapsed() < self.ttl
                        && let Some(jwk) = entry.set.find(kid)
                    {
                        return DecodingKey::from_jwk(jwk)
                            .map_err(|_| AuthError::VerificationFailed);
                    }
                    Some(entry.fetched_at)
                }
                None => None,
            }
        };

        let mut cached = self.cached.write().await;

        // Another task may have refreshed while this one waited on the write
        // lock. Its result counts; only fetch when the entry is still the one
        // observed above.
        let refreshed_by_peer = match (cached.as_ref(), observed) {
            (Some(entry), Some(seen)) => entry.fetched_at > seen,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if !refreshed_by_peer {
            let set = self.fetch().await.map_err(|err| {
                tracing::error!(url = %self.url, error = %err, "key set refresh failed");
                err
            })?;
            tracing::debug!(url = %self.url, keys = set.keys.len(), "refreshed signing key set");
            *cached = Some(CachedKeys { set, fetched_at: Instant::now() });
        }

        match cached.as_ref().and_then(|entry| entry.set.find(kid)) {
            Some(jwk) => DecodingKey::from_jwk(jwk).map_err(|_| AuthError::VerificationFailed),
            None => Err(AuthError::UnknownKeyId { kid: kid.to_string() }),
        }
    }

    async fn fetch(&self) -> Result<JwkSet, KeyFetchError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KeyFetchError::BadStatus { status: status.as_u16() });
        }
        response.json::<JwkSet>().await.map_err(|err| KeyFetchError::Malformed(err.to_string()))
    }
}
