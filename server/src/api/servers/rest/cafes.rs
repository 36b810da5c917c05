//! Cafe listing, search, and detail handlers.
//!
//! Handlers are thin: parse parameters, call the catalog service, and
//! convert to DTOs.

use axum::extract::{Path, Query, State};
use axum::response::Json;

use crate::api::dto::{ApiError, CafeResponse, ListCafesResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::MaybeViewer;
use crate::modules::catalog::{CafeService, ServiceError};
use crate::modules::ranking::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::modules::ranking::{PageRequest, SortMode};

use super::{param, values, viewer_user_id};

// ============================================================================
// Error Conversion
// ============================================================================

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(e) => ApiError::internal(e.to_string()),
            ServiceError::NotFound(msg) => ApiError::not_found(&msg),
            ServiceError::Validation(msg) => ApiError::validation(&msg),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/cafes
///
/// Query: city (repeatable), sort, page, pageSize.
pub async fn list(
    State(app_state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListCafesResponse>, ApiError> {
    let page_request = PageRequest::from_params(
        param(&pairs, "page"),
        param(&pairs, "pageSize"),
        DEFAULT_PAGE_SIZE,
        MAX_PAGE_SIZE,
    )
    .map_err(|e| ApiError::validation(e.to_string()))?;
    let sort = SortMode::from_param(param(&pairs, "sort"));
    let cities = values(&pairs, "city");

    let viewer_id = viewer_user_id(&app_state, viewer.as_ref()).await?;

    let service = CafeService::new(&app_state.db);
    let result = service
        .list_ranked(&cities, None, viewer_id.as_deref(), sort, page_request)
        .await?;

    Ok(Json(ListCafesResponse::from(result)))
}

/// GET /api/v1/cafes/search
///
/// Query: q (required), city (repeatable), sort, page, pageSize.
pub async fn search(
    State(app_state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListCafesResponse>, ApiError> {
    let q = param(&pairs, "q")
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::validation("q is required"))?;

    let page_request = PageRequest::from_params(
        param(&pairs, "page"),
        param(&pairs, "pageSize"),
        DEFAULT_PAGE_SIZE,
        MAX_PAGE_SIZE,
    )
    .map_err(|e| ApiError::validation(e.to_string()))?;
    let sort = SortMode::from_param(param(&pairs, "sort"));
    let cities = values(&pairs, "city");

    let viewer_id = viewer_user_id(&app_state, viewer.as_ref()).await?;

    let service = CafeService::new(&app_state.db);
    let result = service
        .list_ranked(&cities, Some(q), viewer_id.as_deref(), sort, page_request)
        .await?;

    Ok(Json(ListCafesResponse::from(result)))
}

/// GET /api/v1/cafes/:id
pub async fn get(
    State(app_state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<String>,
) -> Result<Json<CafeResponse>, ApiError> {
    // Admins can open a hidden cafe's detail page to review it.
    let include_hidden = viewer
        .as_ref()
        .map(|v| app_state.admins.is_admin(&v.email))
        .unwrap_or(false);

    let viewer_id = viewer_user_id(&app_state, viewer.as_ref()).await?;

    let service = CafeService::new(&app_state.db);
    let ranked = service
        .get_ranked(&id, viewer_id.as_deref(), include_hidden)
        .await?;

    Ok(Json(CafeResponse::from(ranked)))
}
