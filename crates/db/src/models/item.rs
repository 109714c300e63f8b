//! Item entity model and DTOs.
//!
//! An item references exactly one anime and one or more categories; the
//! category references live in the `item_categories` join table and are
//! aggregated into `category_ids` on read.

use animart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::anime::Anime;
use crate::models::category::Category;

/// An item row from the `items` table, with its category references.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory: i64,
    pub anime_id: DbId,
    pub category_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an item; also used for full-record replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory: i64,
    pub anime_id: DbId,
    pub category_ids: Vec<DbId>,
}

/// Lightweight projection used for dependency listings (delete guards,
/// detail pages of referenced records).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemSummary {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

/// An item with its referenced records resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub anime: Anime,
    pub categories: Vec<Category>,
}
