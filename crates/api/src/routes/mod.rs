//! Route assembly.

pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::anime::AnimeResource;
use crate::handlers::category::CategoryResource;
use crate::handlers::item::ItemResource;
use crate::handlers::{home, resource};
use crate::state::AppState;

/// Build the catalog route tree.
///
/// ```text
/// /                         home page
///
/// /animes                   list
/// /anime/create             create form, create
/// /anime/{id}               detail
/// /anime/{id}/update        update form, update
/// /anime/{id}/delete        delete confirmation, delete
///
/// /categories, /category/...    same set
/// /items, /item/...             same set
/// ```
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .merge(resource::router::<AnimeResource>())
        .merge(resource::router::<CategoryResource>())
        .merge(resource::router::<ItemResource>())
}
