//! Integration tests for FavoriteService against real storage.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use entity::favorite;
use server::modules::favorites::{FavoriteService, ServiceError};
use server::modules::ranking::PageRequest;

use crate::bootstrap::init::setup_test_db;
use crate::util::seed::*;

fn first_page() -> PageRequest {
    PageRequest {
        page: 1,
        page_size: 6,
    }
}

#[tokio::test]
async fn test_add_is_idempotent() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_cafe(&db, "c1", "Corner Pour", "LA").await;
    let service = FavoriteService::new(&db);

    service.add("u1", "c1").await.unwrap();
    service.add("u1", "c1").await.unwrap();

    let all = favorite::Entity::find().all(&db).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_add_requires_a_visible_cafe() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_hidden_cafe(&db, "c-h", "Backroom Brew", "LA").await;
    let service = FavoriteService::new(&db);

    let err = service.add("u1", "c-h").await.unwrap_err();
    assert_eq!(err.to_string(), "Cafe not found: c-h");

    let err = service.add("u1", "nope").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_tolerates_missing_favorite() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_cafe(&db, "c1", "Corner Pour", "LA").await;
    let service = FavoriteService::new(&db);

    service.remove("u1", "c1").await.unwrap();

    service.add("u1", "c1").await.unwrap();
    service.remove("u1", "c1").await.unwrap();
    assert!(favorite::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_orders_most_recent_first() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_cafe(&db, "c-early", "First Crush", "LA").await;
    seed_cafe(&db, "c-late", "Latest Love", "LA").await;

    for (cafe_id, age_hours) in [("c-early", 2i64), ("c-late", 1i64)] {
        let saved = Utc::now() - Duration::hours(age_hours);
        let record = favorite::ActiveModel {
            id: Set(format!("fav-{cafe_id}")),
            user_id: Set("u1".to_string()),
            cafe_id: Set(cafe_id.to_string()),
            created_at: Set(saved.into()),
        };
        record.insert(&db).await.unwrap();
    }

    let service = FavoriteService::new(&db);
    let page = service.list_for_user("u1", first_page()).await.unwrap();

    assert_eq!(page.meta.total, 2);
    assert_eq!(page.cafes[0].cafe.id, "c-late");
    assert_eq!(page.cafes[1].cafe.id, "c-early");
    assert!(page.cafes[0].favorited_at > page.cafes[1].favorited_at);
}

#[tokio::test]
async fn test_list_skips_hidden_cafes_but_keeps_the_rows() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_user(&db, "u2").await;
    seed_cafe(&db, "c-open", "Corner Pour", "LA").await;
    seed_hidden_cafe(&db, "c-gone", "Backroom Brew", "LA").await;
    seed_favorite(&db, "u1", "c-open").await;
    seed_favorite(&db, "u1", "c-gone").await;
    seed_review_rated(&db, "u2", "c-open", 5).await;

    let service = FavoriteService::new(&db);
    let page = service.list_for_user("u1", first_page()).await.unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.cafes[0].cafe.id, "c-open");
    assert_eq!(page.cafes[0].summary.review_count, 1);
    assert_eq!(page.cafes[0].summary.weighted_rating, Some(3.33));

    // The hidden cafe's favorite row survives for when it returns.
    let rows = favorite::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_list_scopes_to_the_requesting_user() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_user(&db, "u2").await;
    seed_cafe(&db, "c1", "Corner Pour", "LA").await;
    seed_cafe(&db, "c2", "Quiet Corner", "LA").await;
    seed_favorite(&db, "u1", "c1").await;
    seed_favorite(&db, "u2", "c2").await;

    let service = FavoriteService::new(&db);
    let page = service.list_for_user("u1", first_page()).await.unwrap();

    assert_eq!(page.meta.total, 1);
    assert_eq!(page.cafes[0].cafe.id, "c1");
}
