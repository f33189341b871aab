//! SQLite-backed drink storage.

use barista_core::{Drink, Ingredient};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use thiserror::Error;

/// Embedded schema migrations, applied at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors from drink storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No drink with the requested id.
    #[error("drink {id} not found")]
    NotFound { id: i64 },

    /// Constraint violation or connection fault.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A recipe could not be (de)serialized at the storage boundary.
    #[error("recipe serialization failed: {0}")]
    Recipe(#[from] serde_json::Error),
}

#[derive(sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl DrinkRow {
    fn into_drink(self) -> Result<Drink, StoreError> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&self.recipe)?;
        Ok(Drink {
            id: self.id,
            title: self.title,
            recipe,
        })
    }
}

/// Drink persistence over a SQLite pool.
#[derive(Clone)]
pub struct DrinkStore {
    pool: SqlitePool,
}

impl DrinkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All drinks, ordered by id.
    pub async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(DrinkRow::into_drink).collect()
    }

    /// One drink by id.
    pub async fn fetch(&self, id: i64) -> Result<Drink, StoreError> {
        sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })?
            .into_drink()
    }

    /// Insert a drink and return the stored row with its generated id.
    pub async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        let recipe_json = serde_json::to_string(recipe)?;
        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?, ?)")
            .bind(title)
            .bind(&recipe_json)
            .execute(&self.pool)
            .await?;
        self.fetch(result.last_insert_rowid()).await
    }

    /// Merge the supplied fields into an existing drink.
    ///
    /// Existence is checked first, so an unknown id never touches the table.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Drink, StoreError> {
        let current = self.fetch(id).await?;
        let title = title.unwrap_or(&current.title);
        let recipe_json = serde_json::to_string(recipe.unwrap_or(&current.recipe))?;
        sqlx::query("UPDATE drinks SET title = ?, recipe = ? WHERE id = ?")
            .bind(title)
            .bind(&recipe_json)
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.fetch(id).await
    }

    /// Delete a drink, returning its id.
    pub async fn delete(&self, id: i64) -> Result<i64, StoreError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(id)
    }
}
