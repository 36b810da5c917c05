//! Integration tests for the favorite endpoints.
//!
//! Tests cover:
//! - PUT /api/v1/cafes/{id}/favorite - Mark a cafe as favorite
//! - DELETE /api/v1/cafes/{id}/favorite - Unmark a favorite
//! - GET /api/v1/me/favorites - The viewer's saved cafes

use axum::http::StatusCode;
use serde_json::json;

use crate::api::rest::helpers::*;
use crate::bootstrap::init::setup_test_server;
use crate::util::seed::*;

// ============================================================================
// PUT /api/v1/cafes/{id}/favorite tests
// ============================================================================

#[tokio::test]
async fn test_favorite_requires_auth() {
    let server = setup_test_server().await;
    seed_cafe(&server.db, "c1", "Corner Pour", "LA").await;

    let (status, body) =
        put_request(&server.router, "/api/v1/cafes/c1/favorite", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    // Unfavoriting is protected too.
    let (status, _) = delete_request(&server.router, "/api/v1/cafes/c1/favorite").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_favorite_add_is_idempotent() {
    let server = setup_test_server().await;
    seed_cafe(&server.db, "c1", "Corner Pour", "LA").await;
    let token = mint_user_token("u1");

    let (status, body) =
        put_request_with_token(&server.router, "/api/v1/cafes/c1/favorite", json!({}), &token)
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], true);

    // Favoriting twice changes nothing.
    let (status, body) =
        put_request_with_token(&server.router, "/api/v1/cafes/c1/favorite", json!({}), &token)
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], true);

    let (_, mine) =
        get_request_with_token(&server.router, "/api/v1/me/favorites", &token).await;
    assert_eq!(mine["cafes"].as_array().map(Vec::len), Some(1));
    assert_eq!(mine["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_favorite_rejects_hidden_or_unknown_cafe() {
    let server = setup_test_server().await;
    seed_hidden_cafe(&server.db, "c-h", "Backroom Brew", "LA").await;
    let token = mint_user_token("u1");

    let (status, body) =
        put_request_with_token(&server.router, "/api/v1/cafes/c-h/favorite", json!({}), &token)
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cafe not found: c-h");

    let (status, _) =
        put_request_with_token(&server.router, "/api/v1/cafes/nope/favorite", json!({}), &token)
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// DELETE /api/v1/cafes/{id}/favorite tests
// ============================================================================

#[tokio::test]
async fn test_unfavorite_round_trip() {
    let server = setup_test_server().await;
    seed_cafe(&server.db, "c1", "Corner Pour", "LA").await;
    let token = mint_user_token("u1");

    let (_, _) =
        put_request_with_token(&server.router, "/api/v1/cafes/c1/favorite", json!({}), &token)
            .await;

    let (status, body) =
        delete_request_with_token(&server.router, "/api/v1/cafes/c1/favorite", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], false);

    let (_, mine) =
        get_request_with_token(&server.router, "/api/v1/me/favorites", &token).await;
    assert_eq!(mine["cafes"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_unfavorite_never_favorited_still_succeeds() {
    let server = setup_test_server().await;
    seed_cafe(&server.db, "c1", "Corner Pour", "LA").await;
    // No favorite row, and for this viewer not even an account row.
    let token = mint_user_token("u-ghost");

    let (status, body) =
        delete_request_with_token(&server.router, "/api/v1/cafes/c1/favorite", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], false);
}

// ============================================================================
// GET /api/v1/me/favorites tests
// ============================================================================

#[tokio::test]
async fn test_favorites_list_carries_summaries_and_flags() {
    // Setup
    let server = setup_test_server().await;
    seed_user(&server.db, "u1").await;
    seed_user(&server.db, "u2").await;
    seed_cafe(&server.db, "c1", "Corner Pour", "LA").await;
    seed_review_rated(&server.db, "u2", "c1", 5).await;
    seed_favorite(&server.db, "u1", "c1").await;
    let token = mint_user_token("u1");

    // Execute
    let (status, body) =
        get_request_with_token(&server.router, "/api/v1/me/favorites", &token).await;

    // Assert: entries read like cafe responses plus the saved time
    assert_eq!(status, StatusCode::OK);
    let entry = &body["cafes"][0];
    assert_eq!(entry["id"], "c1");
    assert_eq!(entry["name"], "Corner Pour");
    assert_eq!(entry["isFavorited"], true);
    assert_eq!(entry["reviewCount"], 1);
    assert_eq!(entry["weightedRating"], 3.33);
    assert!(entry["favoritedAt"].is_string());
}

#[tokio::test]
async fn test_favorites_list_drops_hidden_cafes() {
    let server = setup_test_server().await;
    seed_user(&server.db, "u1").await;
    seed_cafe(&server.db, "c-open", "Corner Pour", "LA").await;
    seed_hidden_cafe(&server.db, "c-gone", "Backroom Brew", "LA").await;
    seed_favorite(&server.db, "u1", "c-open").await;
    seed_favorite(&server.db, "u1", "c-gone").await;
    let token = mint_user_token("u1");

    let (status, body) =
        get_request_with_token(&server.router, "/api/v1/me/favorites", &token).await;

    assert_eq!(status, StatusCode::OK);
    let cafes = body["cafes"].as_array().unwrap();
    assert_eq!(cafes.len(), 1);
    assert_eq!(cafes[0]["id"], "c-open");
}

#[tokio::test]
async fn test_favorites_list_empty_without_account() {
    let server = setup_test_server().await;
    let token = mint_user_token("u-ghost");

    let (status, body) =
        get_request_with_token(&server.router, "/api/v1/me/favorites", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cafes"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_favorites_list_paginates() {
    let server = setup_test_server().await;
    seed_user(&server.db, "u1").await;
    for i in 0..3 {
        let id = format!("c{i}");
        let name = format!("Cafe {i}");
        seed_cafe(&server.db, &id, &name, "LA").await;
        seed_favorite(&server.db, "u1", &id).await;
    }
    let token = mint_user_token("u1");

    let (status, body) = get_request_with_token(
        &server.router,
        "/api/v1/me/favorites?pageSize=2&page=2",
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cafes"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasPreviousPage"], true);
}
