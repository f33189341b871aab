//! Configuration types for the Barista drinks API.
//!
//! All settings load from a single YAML file (barista.yaml by default).
//! Server and database sections fall back to working defaults so a bare
//! `barista-server` starts against a local SQLite file. The auth section has
//! no usable default tenant, so `validate()` rejects configurations that
//! leave the token verifier unable to resolve an issuer or key endpoint.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete Barista configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaristaConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the API server to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// SQLite storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Created on first start.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Token verification settings.
///
/// `domain` is the auth tenant that issued the tokens, e.g.
/// "dev-abc123.us.auth0.com". Issuer and JWKS endpoint are derived from it
/// unless overridden explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Auth tenant domain.
    #[serde(default)]
    pub domain: String,

    /// Audience (API identifier) required in tokens.
    #[serde(default)]
    pub audience: String,

    /// Signature algorithm tokens must use, e.g. "RS256".
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Expected `iss` claim. Defaults to `https://{domain}/`.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Key set endpoint. Defaults to `https://{domain}/.well-known/jwks.json`.
    #[serde(default)]
    pub jwks_url: Option<String>,

    /// How long a fetched key set stays fresh, in seconds.
    #[serde(default = "default_jwks_ttl_secs")]
    pub jwks_ttl_secs: u64,

    /// Timeout for key set requests, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Permission required to delete a drink.
    #[serde(default = "default_delete_permission")]
    pub delete_permission: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            audience: String::new(),
            algorithm: default_algorithm(),
            issuer: None,
            jwks_url: None,
            jwks_ttl_secs: default_jwks_ttl_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            delete_permission: default_delete_permission(),
        }
    }
}

impl AuthConfig {
    /// Get the expected issuer, deriving it from the tenant domain when not
    /// overridden.
    pub fn get_issuer(&self) -> String {
        match &self.issuer {
            Some(issuer) => issuer.clone(),
            None => format!("https://{}/", self.domain),
        }
    }

    /// Get the key set endpoint, deriving it from the tenant domain when not
    /// overridden.
    pub fn get_jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!("https://{}/.well-known/jwks.json", self.domain),
        }
    }
}

// Default value functions
fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_db_path() -> String {
    "data/barista.sqlite".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "RS256".to_string()
}

fn default_jwks_ttl_secs() -> u64 {
    300
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_delete_permission() -> String {
    "post:drinks".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BaristaConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Check that the auth section can actually verify a token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.domain.is_empty()
            && (self.auth.issuer.is_none() || self.auth.jwks_url.is_none())
        {
            return Err(ConfigError::Config(
                "auth.domain is required unless auth.issuer and auth.jwks_url are both set"
                    .to_string(),
            ));
        }
        if self.auth.audience.is_empty() {
            return Err(ConfigError::Config("auth.audience is required".to_string()));
        }
        Ok(())
    }
}
