//! Anime entity model and DTOs.

use animart_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An anime row from the `animes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Anime {
    pub id: DbId,
    pub name: String,
    pub summary: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an anime. Updates reuse this shape because the update
/// handlers replace the full record rather than patching fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnime {
    pub name: String,
    pub summary: String,
}
