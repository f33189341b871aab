//! Shared application state.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use jsonwebtoken::Algorithm;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use barista_auth::{JwksCache, TokenVerifier};
use barista_core::BaristaConfig;

use crate::store::DrinkStore;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BaristaConfig,
    store: DrinkStore,
    verifier: TokenVerifier,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Initialize state from configuration: open the database pool, run
    /// migrations, and build the token verifier for the configured tenant.
    pub async fn init(config: BaristaConfig) -> anyhow::Result<Self> {
        let pool = open_pool(&config).await?;
        crate::store::MIGRATOR
            .run(&pool)
            .await
            .context("running database migrations")?;

        let algorithm = Algorithm::from_str(&config.auth.algorithm)
            .with_context(|| format!("unsupported auth.algorithm {:?}", config.auth.algorithm))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.auth.http_timeout_secs))
            .build()
            .context("building key endpoint client")?;
        let keys = JwksCache::new(
            http,
            config.auth.get_jwks_url(),
            Duration::from_secs(config.auth.jwks_ttl_secs),
        );
        let verifier = TokenVerifier::new(
            keys,
            algorithm,
            config.auth.audience.clone(),
            config.auth.get_issuer(),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store: DrinkStore::new(pool),
                verifier,
                config,
            }),
        })
    }

    /// Drink storage handle.
    pub fn store(&self) -> &DrinkStore {
        &self.inner.store
    }

    /// Token verifier handle.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }

    /// Permission required to delete a drink.
    pub fn delete_permission(&self) -> &str {
        &self.inner.config.auth.delete_permission
    }

    /// Address the server should bind to.
    pub fn bind_addr(&self) -> &str {
        &self.inner.config.server.bind
    }
}

async fn open_pool(config: &BaristaConfig) -> anyhow::Result<SqlitePool> {
    if config.database.path == ":memory:" {
        // A single connection keeps the in-memory database alive and visible
        // to every query.
        return SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("opening in-memory database");
    }
    ensure_parent_dir(&config.database.path)?;
    let options = SqliteConnectOptions::from_str(&sqlite_url(&config.database.path))
        .context("parsing database path")?
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("opening database at {}", config.database.path))
}

fn sqlite_url(path: &str) -> String {
    // sqlx URL format: sqlite://relative/path.db, sqlite:/absolute/path.db
    if Path::new(path).is_absolute() {
        format!("sqlite:{path}")
    } else {
        format!("sqlite://{path}")
    }
}

fn ensure_parent_dir(file_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(file_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    Ok(())
}
