//! The store home page.

use axum::extract::State;
use axum::response::Html;

use animart_db::repositories::{AnimeRepo, CategoryRepo, ItemRepo};

use crate::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET / -- record counts for the three collections, fetched concurrently.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let (animes, categories, items) = tokio::try_join!(
        AnimeRepo::count(&state.pool),
        CategoryRepo::count(&state.pool),
        ItemRepo::count(&state.pool),
    )?;

    let body = format!(
        "<h1>AniMart</h1>\n\
         <p>Anime merchandise catalog.</p>\n\
         <ul>\n\
         <li><a href=\"/animes\">Animes</a>: {animes}</li>\n\
         <li><a href=\"/categories\">Categories</a>: {categories}</li>\n\
         <li><a href=\"/items\">Items</a>: {items}</li>\n\
         </ul>"
    );
    Ok(Html(views::layout("AniMart", &body)))
}
