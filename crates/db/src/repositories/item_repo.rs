//! Repository for the `items` table and its `item_categories` join rows.

use animart_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, ItemSummary};

/// Grouped select shared by the read queries: the category references are
/// aggregated into a `bigint[]` column so one row maps onto [`Item`].
const SELECT_ITEM: &str = "SELECT i.id, i.name, i.description, i.price, i.inventory, i.anime_id,
     COALESCE(array_agg(ic.category_id) FILTER (WHERE ic.category_id IS NOT NULL), '{}'::bigint[]) AS category_ids,
     i.created_at, i.updated_at
     FROM items i
     LEFT JOIN item_categories ic ON ic.item_id = i.id";

/// Provides CRUD operations for items plus the reference lookups backing
/// the delete guards on animes and categories.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item and its category join rows in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id, created_at, updated_at): (DbId, Timestamp, Timestamp) = sqlx::query_as(
            "INSERT INTO items (name, description, price, inventory, anime_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, created_at, updated_at",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.inventory)
        .bind(input.anime_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO item_categories (item_id, category_id)
             SELECT $1, unnest($2::bigint[])",
        )
        .bind(id)
        .bind(&input.category_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Item {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            inventory: input.inventory,
            anime_id: input.anime_id,
            category_ids: input.category_ids.clone(),
            created_at,
            updated_at,
        })
    }

    /// Find an item by its internal ID, with its category references.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("{SELECT_ITEM} WHERE i.id = $1 GROUP BY i.id");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("{SELECT_ITEM} GROUP BY i.id ORDER BY i.name ASC");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Replace an item's fields and rewrite its category join rows in one
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: Option<(Timestamp, Timestamp)> = sqlx::query_as(
            "UPDATE items
             SET name = $2, description = $3, price = $4, inventory = $5,
                 anime_id = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING created_at, updated_at",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.inventory)
        .bind(input.anime_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((created_at, updated_at)) = row else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM item_categories WHERE item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO item_categories (item_id, category_id)
             SELECT $1, unnest($2::bigint[])",
        )
        .bind(id)
        .bind(&input.category_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Item {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            inventory: input.inventory,
            anime_id: input.anime_id,
            category_ids: input.category_ids.clone(),
            created_at,
            updated_at,
        }))
    }

    /// Delete an item by ID. Join rows go with it via `ON DELETE CASCADE`.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the items referencing one anime, ordered by name.
    pub async fn list_by_anime(
        pool: &PgPool,
        anime_id: DbId,
    ) -> Result<Vec<ItemSummary>, sqlx::Error> {
        sqlx::query_as::<_, ItemSummary>(
            "SELECT id, name, description FROM items
             WHERE anime_id = $1
             ORDER BY name ASC",
        )
        .bind(anime_id)
        .fetch_all(pool)
        .await
    }

    /// List the items referencing one category, ordered by name.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<ItemSummary>, sqlx::Error> {
        sqlx::query_as::<_, ItemSummary>(
            "SELECT i.id, i.name, i.description FROM items i
             JOIN item_categories ic ON ic.item_id = i.id
             WHERE ic.category_id = $1
             ORDER BY i.name ASC",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    /// Total number of items, for the home page counts.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await
    }
}
