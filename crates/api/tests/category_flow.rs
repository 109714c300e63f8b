//! HTTP-level tests for the category lifecycle: idempotent creation under
//! case-insensitive name collisions, validation re-renders, and the
//! cascading-delete guard.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use animart_db::models::anime::CreateAnime;
use animart_db::models::item::CreateItem;
use animart_db::repositories::{AnimeRepo, CategoryRepo, ItemRepo};

use common::{body_text, build_test_app, get, location, post_form};

async fn seed_referencing_item(pool: &PgPool, category_id: i64) -> i64 {
    let anime = AnimeRepo::create(
        pool,
        &CreateAnime {
            name: "One Piece".to_string(),
            summary: "Pirates chase a treasure.".to_string(),
        },
    )
    .await
    .unwrap();
    ItemRepo::create(
        pool,
        &CreateItem {
            name: "Chopper AirPod Pro Case".to_string(),
            description: "Smiling Chopper official merch".to_string(),
            price: 35.99,
            inventory: 5,
            anime_id: anime.id,
            category_ids: vec![category_id],
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_category_redirects_to_detail(pool: PgPool) {
    let response = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let url = location(&response);
    assert!(url.starts_with("/category/"));

    let response = get(build_test_app(pool), &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Cases"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_create_collapses_to_one_record(pool: PgPool) {
    let first = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    let first_url = location(&first);

    let second = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&second), first_url);

    assert_eq!(CategoryRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_create_is_case_insensitive(pool: PgPool) {
    let first = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    let first_url = location(&first);

    let second = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "CASES")],
    )
    .await;
    assert_eq!(location(&second), first_url);

    assert_eq!(CategoryRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_name_rerenders_with_error_and_persists_nothing(pool: PgPool) {
    let response = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "   ")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Name is required."));

    assert_eq!(CategoryRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_colliding_name_redirects_to_existing(pool: PgPool) {
    let cases = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    let cases_url = location(&cases);

    let figurines = CategoryRepo::create(
        &pool,
        &animart_db::models::category::CreateCategory {
            name: "Figurines".to_string(),
        },
    )
    .await
    .unwrap();

    let response = post_form(
        build_test_app(pool.clone()),
        &format!("/category/{}/update", figurines.id),
        &[("name", "CASES")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), cases_url);

    // The colliding update must not have touched the record.
    let unchanged = CategoryRepo::find_by_id(&pool, figurines.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Figurines");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unreferenced_category_removes_it(pool: PgPool) {
    let created = post_form(
        build_test_app(pool.clone()),
        "/category/create",
        &[("name", "Cases")],
    )
    .await;
    let id: i64 = location(&created)
        .rsplit('/')
        .next()
        .unwrap()
        .parse()
        .unwrap();

    let response = post_form(
        build_test_app(pool.clone()),
        &format!("/category/{id}/delete"),
        &[("categoryid", &id.to_string())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/categories");

    assert!(CategoryRepo::find_by_id(&pool, id).await.unwrap().is_none());

    let list = get(build_test_app(pool), "/categories").await;
    assert!(!body_text(list).await.contains("Cases"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_referenced_category_is_blocked(pool: PgPool) {
    let category = CategoryRepo::create(
        &pool,
        &animart_db::models::category::CreateCategory {
            name: "Cases".to_string(),
        },
    )
    .await
    .unwrap();
    seed_referencing_item(&pool, category.id).await;

    let response = post_form(
        build_test_app(pool.clone()),
        &format!("/category/{}/delete", category.id),
        &[("categoryid", &category.id.to_string())],
    )
    .await;

    // No deletion, no error: the confirmation re-renders with the blockers.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Chopper AirPod Pro Case"));

    assert!(CategoryRepo::find_by_id(&pool, category.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_form_for_absent_record_redirects_to_list(pool: PgPool) {
    let response = get(build_test_app(pool), "/category/999999/delete").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/categories");
}
