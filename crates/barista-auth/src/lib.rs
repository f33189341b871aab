//! # barista-auth
//!
//! Bearer token verification for the Barista drinks API.
//!
//! This crate provides functionality for:
//! - Extracting bearer tokens from `Authorization` headers
//! - Resolving signing keys from a remote JWKS with a time-boxed cache
//! - Verifying token signature, expiry, audience, and issuer
//! - Enforcing `permissions` claims for individual actions
//!
//! ## Verification Pipeline
//!
//! | Step | Failure | Status |
//! |------|---------|--------|
//! | Extract bearer token | missing/malformed header | 401 |
//! | Decode JOSE header | undecodable token, no `kid` | 401 |
//! | Resolve `kid` in key set | unknown key id | 400 |
//! | Verify signature + claims | expired / wrong audience or issuer | 401 |
//! | Check `permissions` claim | claim missing / permission absent | 400 / 403 |
//!
//! The accepted signature algorithm is fixed by configuration and never read
//! from the token's own header, so `alg=none` and downgraded tokens fail
//! verification outright.

pub mod claims;
pub mod error;
pub mod extract;
pub mod keys;
pub mod verifier;

pub use claims::{Audience, Claims};
pub use error::{AuthError, KeyFetchError};
pub use extract::bearer_token;
pub use keys::JwksCache;
pub use verifier::TokenVerifier;
