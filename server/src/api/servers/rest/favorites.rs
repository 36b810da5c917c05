//! Favorite handlers: mark, unmark, and the viewer's saved list.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::dto::{ApiError, FavoritesResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::auth::AccountService;
use crate::modules::favorites::{FavoritePage, FavoriteService, ServiceError};
use crate::modules::ranking::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::modules::ranking::PageRequest;

use super::param;

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::NotFound(msg) => ApiError::not_found(&msg),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// PUT /api/v1/cafes/:id/favorite
pub async fn add(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let account = AccountService::new(&app_state.db)
        .ensure_user(&user.claims)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let service = FavoriteService::new(&app_state.db);
    service.add(&account.id, &id).await?;

    Ok(Json(json!({ "favorited": true })))
}

/// DELETE /api/v1/cafes/:id/favorite
///
/// Idempotent: removing a favorite that never existed still succeeds.
pub async fn remove(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let account = AccountService::new(&app_state.db)
        .find_by_subject(&user.subject)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if let Some(account) = account {
        let service = FavoriteService::new(&app_state.db);
        service.remove(&account.id, &id).await?;
    }

    Ok(Json(json!({ "favorited": false })))
}

/// GET /api/v1/me/favorites
pub async fn list_mine(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let page_request = PageRequest::from_params(
        param(&pairs, "page"),
        param(&pairs, "pageSize"),
        DEFAULT_PAGE_SIZE,
        MAX_PAGE_SIZE,
    )
    .map_err(|e| ApiError::validation(e.to_string()))?;

    let account = AccountService::new(&app_state.db)
        .find_by_subject(&user.subject)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let page = match account {
        Some(account) => {
            FavoriteService::new(&app_state.db)
                .list_for_user(&account.id, page_request)
                .await?
        }
        // Never written, so never favorited anything either.
        None => FavoritePage::empty(page_request),
    };

    Ok(Json(FavoritesResponse::from(page)))
}
