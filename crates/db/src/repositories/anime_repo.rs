//! Repository for the `animes` table.

use animart_core::types::DbId;
use sqlx::PgPool;

use crate::models::anime::{Anime, CreateAnime};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, summary, created_at, updated_at";

/// Provides CRUD operations for animes.
pub struct AnimeRepo;

impl AnimeRepo {
    /// Insert a new anime, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnime) -> Result<Anime, sqlx::Error> {
        let query = format!(
            "INSERT INTO animes (name, summary)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Anime>(&query)
            .bind(&input.name)
            .bind(&input.summary)
            .fetch_one(pool)
            .await
    }

    /// Find an anime by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE id = $1");
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all animes, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes ORDER BY name ASC");
        sqlx::query_as::<_, Anime>(&query).fetch_all(pool).await
    }

    /// Replace an anime's fields wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateAnime,
    ) -> Result<Option<Anime>, sqlx::Error> {
        let query = format!(
            "UPDATE animes SET name = $2, summary = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.summary)
            .fetch_optional(pool)
            .await
    }

    /// Delete an anime by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of animes, for the home page counts.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM animes")
            .fetch_one(pool)
            .await
    }
}
