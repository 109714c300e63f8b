//! Integration tests for the catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - CRUD and ordering for all three entities
//! - The case-insensitive unique index on category names
//! - Join-table rewrite on item replacement
//! - The reference lookups backing the delete guards

use assert_matches::assert_matches;
use sqlx::PgPool;

use animart_db::models::anime::CreateAnime;
use animart_db::models::category::CreateCategory;
use animart_db::models::item::CreateItem;
use animart_db::repositories::{AnimeRepo, CategoryRepo, ItemRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_anime(name: &str) -> CreateAnime {
    CreateAnime {
        name: name.to_string(),
        summary: format!("{name} summary"),
    }
}

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
    }
}

fn new_item(name: &str, anime_id: i64, category_ids: Vec<i64>) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: format!("{name} description"),
        price: 9.99,
        inventory: 5,
        anime_id,
        category_ids,
    }
}

// ---------------------------------------------------------------------------
// Anime
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anime_crud_roundtrip(pool: PgPool) {
    let anime = AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();
    assert_eq!(anime.name, "One Piece");

    let found = AnimeRepo::find_by_id(&pool, anime.id).await.unwrap().unwrap();
    assert_eq!(found.summary, "One Piece summary");

    let replaced = AnimeRepo::replace(
        &pool,
        anime.id,
        &CreateAnime {
            name: "One Piece".to_string(),
            summary: "updated summary".to_string(),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(replaced.summary, "updated summary");

    assert!(AnimeRepo::delete(&pool, anime.id).await.unwrap());
    assert!(AnimeRepo::find_by_id(&pool, anime.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anime_list_orders_by_name(pool: PgPool) {
    AnimeRepo::create(&pool, &new_anime("Spy x Family")).await.unwrap();
    AnimeRepo::create(&pool, &new_anime("Jujutsu Kaisen")).await.unwrap();
    AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();

    let names: Vec<String> = AnimeRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["Jujutsu Kaisen", "One Piece", "Spy x Family"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_nonexistent_anime_returns_none(pool: PgPool) {
    let result = AnimeRepo::replace(&pool, 999_999, &new_anime("Ghost")).await.unwrap();
    assert!(result.is_none());
    assert!(!AnimeRepo::delete(&pool, 999_999).await.unwrap());
}

// ---------------------------------------------------------------------------
// Category uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_category_name_rejected_case_insensitively(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();

    let err = CategoryRepo::create(&pool, &new_category("CASES")).await.unwrap_err();
    assert!(animart_db::is_unique_violation(&err));
    assert_matches!(err, sqlx::Error::Database(_));

    assert_eq!(CategoryRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_name_ci_matches_any_case(pool: PgPool) {
    let created = CategoryRepo::create(&pool, &new_category("Figurines")).await.unwrap();

    let found = CategoryRepo::find_by_name_ci(&pool, "fIGURINES").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    assert!(CategoryRepo::find_by_name_ci(&pool, "Clothes").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Items and the join table
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_create_resolves_references(pool: PgPool) {
    let anime = AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();
    let cases = CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();
    let clothes = CategoryRepo::create(&pool, &new_category("Clothes")).await.unwrap();

    let item = ItemRepo::create(
        &pool,
        &new_item("One Piece Socks", anime.id, vec![cases.id, clothes.id]),
    )
    .await
    .unwrap();

    let found = ItemRepo::find_by_id(&pool, item.id).await.unwrap().unwrap();
    assert_eq!(found.anime_id, anime.id);
    let mut category_ids = found.category_ids.clone();
    category_ids.sort_unstable();
    assert_eq!(category_ids, {
        let mut expected = vec![cases.id, clothes.id];
        expected.sort_unstable();
        expected
    });

    let categories = CategoryRepo::list_for_item(&pool, item.id).await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Cases", "Clothes"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_replace_rewrites_join_rows(pool: PgPool) {
    let anime = AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();
    let cases = CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();
    let clothes = CategoryRepo::create(&pool, &new_category("Clothes")).await.unwrap();

    let item = ItemRepo::create(&pool, &new_item("Socks", anime.id, vec![cases.id]))
        .await
        .unwrap();

    let replaced = ItemRepo::replace(
        &pool,
        item.id,
        &new_item("Socks", anime.id, vec![clothes.id]),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(replaced.category_ids, vec![clothes.id]);

    assert!(ItemRepo::list_by_category(&pool, cases.id).await.unwrap().is_empty());
    let blockers = ItemRepo::list_by_category(&pool, clothes.id).await.unwrap();
    assert_eq!(blockers.len(), 1);
    assert_eq!(blockers[0].name, "Socks");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_delete_cascades_join_rows(pool: PgPool) {
    let anime = AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();
    let cases = CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();
    let item = ItemRepo::create(&pool, &new_item("Case", anime.id, vec![cases.id]))
        .await
        .unwrap();

    assert!(ItemRepo::delete(&pool, item.id).await.unwrap());
    assert!(ItemRepo::list_by_category(&pool, cases.id).await.unwrap().is_empty());

    // With no referencing items left, the category delete goes through.
    assert!(CategoryRepo::delete(&pool, cases.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_with_unknown_anime_rejected(pool: PgPool) {
    let cases = CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();
    let err = ItemRepo::create(&pool, &new_item("Orphan", 999_999, vec![cases.id]))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Delete-guard lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reference_lookups_back_the_delete_guards(pool: PgPool) {
    let anime = AnimeRepo::create(&pool, &new_anime("One Piece")).await.unwrap();
    let cases = CategoryRepo::create(&pool, &new_category("Cases")).await.unwrap();
    ItemRepo::create(&pool, &new_item("Chopper Case", anime.id, vec![cases.id]))
        .await
        .unwrap();
    ItemRepo::create(&pool, &new_item("Luffy Case", anime.id, vec![cases.id]))
        .await
        .unwrap();

    let by_anime = ItemRepo::list_by_anime(&pool, anime.id).await.unwrap();
    let names: Vec<&str> = by_anime.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Chopper Case", "Luffy Case"]);

    let by_category = ItemRepo::list_by_category(&pool, cases.id).await.unwrap();
    assert_eq!(by_category.len(), 2);

    // The FK backs the application-level guard at the store level too.
    let err = CategoryRepo::delete(&pool, cases.id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}
