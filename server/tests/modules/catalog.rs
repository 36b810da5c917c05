//! Integration tests for CafeService against real storage.

use sea_orm::EntityTrait;

use entity::cafe;
use server::modules::catalog::{BulkAction, CafeService, NewCafe, ServiceError};
use server::modules::ranking::{PageRequest, SortMode};

use crate::bootstrap::init::setup_test_db;
use crate::util::seed::*;

fn first_page() -> PageRequest {
    PageRequest {
        page: 1,
        page_size: 6,
    }
}

fn import(name: &str, city: &str, place_ref: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        address: Some("1 Main St".to_string()),
        city: city.to_string(),
        latitude: None,
        longitude: None,
        place_ref: place_ref.to_string(),
    }
}

// ============================================================================
// Import upsert tests
// ============================================================================

#[tokio::test]
async fn test_upsert_creates_then_refreshes_in_place() {
    let (db, _temp) = setup_test_db().await;
    let service = CafeService::new(&db);

    let (created, was_created) = service
        .upsert_by_place_ref(import("New Place", "LA", "pl-1"))
        .await
        .unwrap();
    assert!(was_created);
    assert!(!created.id.is_empty());
    assert!(!created.hidden);

    // Hide it, then re-import: descriptive fields refresh but the id
    // and the moderation state survive.
    service.set_visibility(&created.id, true).await.unwrap();

    let (refreshed, was_created) = service
        .upsert_by_place_ref(import("Renamed Place", "OC", "pl-1"))
        .await
        .unwrap();
    assert!(!was_created);
    assert_eq!(refreshed.id, created.id);
    assert_eq!(refreshed.name, "Renamed Place");
    assert_eq!(refreshed.city, "OC");
    assert!(refreshed.hidden);
    assert_eq!(refreshed.created_at, created.created_at);

    let all = cafe::Entity::find().all(&db).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_upsert_rejects_invalid_input() {
    let (db, _temp) = setup_test_db().await;
    let service = CafeService::new(&db);

    let mut nameless = import("", "LA", "pl-1");
    nameless.name = "   ".to_string();
    let err = service.upsert_by_place_ref(nameless).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service
        .upsert_by_place_ref(import("X", "Atlantis", "pl-1"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "city must be one of: LA, OC, Bay, Bay Area, Seattle, NYC"
    );

    let mut lopsided = import("X", "LA", "pl-1");
    lopsided.latitude = Some(34.0);
    let err = service.upsert_by_place_ref(lopsided).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "latitude and longitude must be provided together"
    );
}

// ============================================================================
// Visibility tests
// ============================================================================

#[tokio::test]
async fn test_bulk_visibility_counts_matched_rows() {
    let (db, _temp) = setup_test_db().await;
    seed_cafe(&db, "c1", "Alpha Beans", "LA").await;
    seed_cafe(&db, "c2", "Beta Brew", "LA").await;
    seed_cafe(&db, "c3", "Gamma Grind", "LA").await;
    let service = CafeService::new(&db);

    // Unknown ids are skipped, not an error.
    let ids = vec![
        "c1".to_string(),
        "c2".to_string(),
        "ghost".to_string(),
    ];
    let updated = service.bulk_visibility(&ids, BulkAction::Hide).await.unwrap();
    assert_eq!(updated, 2);

    let c1 = cafe::Entity::find_by_id("c1").one(&db).await.unwrap().unwrap();
    assert!(c1.hidden);

    // c3 was never hidden; restoring it still counts as a matched row.
    let mixed = vec!["c1".to_string(), "c3".to_string()];
    let restored = service
        .bulk_visibility(&mixed, BulkAction::Restore)
        .await
        .unwrap();
    assert_eq!(restored, 2);

    let none: Vec<String> = Vec::new();
    assert_eq!(
        service.bulk_visibility(&none, BulkAction::Hide).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_set_visibility_unknown_cafe() {
    let (db, _temp) = setup_test_db().await;
    let service = CafeService::new(&db);

    let err = service.set_visibility("nope", true).await.unwrap_err();
    assert_eq!(err.to_string(), "Cafe not found: nope");
}

// ============================================================================
// Listing pipeline tests
// ============================================================================

#[tokio::test]
async fn test_list_ranked_combines_query_and_city_filters() {
    let (db, _temp) = setup_test_db().await;
    seed_cafe(&db, "c-la", "Phê House", "LA").await;
    seed_cafe(&db, "c-bay", "Phê Corner", "Bay").await;
    seed_cafe(&db, "c-other", "Matcha Corner", "Bay").await;
    let service = CafeService::new(&db);

    let cities = vec!["Bay".to_string()];
    let page = service
        .list_ranked(&cities, Some("phê"), None, SortMode::Rating, first_page())
        .await
        .unwrap();

    assert_eq!(page.cafes.len(), 1);
    assert_eq!(page.cafes[0].cafe.id, "c-bay");
}

#[tokio::test]
async fn test_list_ranked_breaks_complete_ties_by_id() {
    let (db, _temp) = setup_test_db().await;
    // Same name, no reviews; only the id separates them.
    seed_cafe(&db, "b-2", "Twin Cafe", "LA").await;
    seed_cafe(&db, "a-1", "Twin Cafe", "LA").await;
    let service = CafeService::new(&db);

    let page = service
        .list_ranked(&[], None, None, SortMode::Rating, first_page())
        .await
        .unwrap();

    let ids: Vec<&str> = page.cafes.iter().map(|c| c.cafe.id.as_str()).collect();
    assert_eq!(ids, vec!["a-1", "b-2"]);
}

#[tokio::test]
async fn test_list_ranked_overlays_viewer_favorites() {
    let (db, _temp) = setup_test_db().await;
    seed_user(&db, "u1").await;
    seed_cafe(&db, "c1", "Alpha Beans", "LA").await;
    seed_cafe(&db, "c2", "Beta Brew", "LA").await;
    seed_favorite(&db, "u1", "c1").await;
    let service = CafeService::new(&db);

    let anonymous = service
        .list_ranked(&[], None, None, SortMode::Name, first_page())
        .await
        .unwrap();
    assert!(anonymous.cafes.iter().all(|c| !c.is_favorited));

    let viewed = service
        .list_ranked(&[], None, Some("u1"), SortMode::Name, first_page())
        .await
        .unwrap();
    assert!(viewed.cafes[0].is_favorited);
    assert!(!viewed.cafes[1].is_favorited);
}

#[tokio::test]
async fn test_get_ranked_honours_include_hidden() {
    let (db, _temp) = setup_test_db().await;
    seed_hidden_cafe(&db, "c-h", "Backroom Brew", "LA").await;
    let service = CafeService::new(&db);

    let err = service.get_ranked("c-h", None, false).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let ranked = service.get_ranked("c-h", None, true).await.unwrap();
    assert_eq!(ranked.cafe.id, "c-h");
    assert_eq!(ranked.summary.review_count, 0);
}
