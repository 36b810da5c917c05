//! Admin handlers: catalog moderation and imports.
//!
//! Every handler here takes `AdminUser`, so authentication, allowlist
//! configuration, and membership are already settled by the time a
//! body is parsed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::dto::{AdminCafeResponse, ApiError};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AdminUser;
use crate::modules::catalog::{BulkAction, CafeService, NewCafe};
use crate::modules::ranking::page::{DEFAULT_ADMIN_PAGE_SIZE, MAX_ADMIN_PAGE_SIZE};
use crate::modules::ranking::PageRequest;
use crate::modules::reviews::ReviewService;

use super::param;

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/admin/cafes
///
/// Moderation listing: hidden first, then by name. Query: q,
/// showHidden (default true), page, pageSize.
pub async fn list(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let page_request = PageRequest::from_params(
        param(&pairs, "page"),
        param(&pairs, "pageSize"),
        DEFAULT_ADMIN_PAGE_SIZE,
        MAX_ADMIN_PAGE_SIZE,
    )
    .map_err(|e| ApiError::validation(e.to_string()))?;

    let q = param(&pairs, "q").map(str::trim).filter(|q| !q.is_empty());
    let show_hidden = !matches!(param(&pairs, "showHidden"), Some("false") | Some("0"));

    let service = CafeService::new(&app_state.db);
    let (cafes, pagination) = service.admin_list(q, show_hidden, page_request).await?;
    let cafes: Vec<AdminCafeResponse> = cafes.into_iter().map(AdminCafeResponse::from).collect();

    Ok(Json(json!({
        "cafes": cafes,
        "pagination": pagination,
    })))
}

/// POST /api/v1/admin/cafes
///
/// Imports a place as a cafe. The external place reference is the
/// idempotency key: posting the same place twice refreshes the row
/// (200) instead of duplicating it (201).
pub async fn create(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = NewCafe {
        name: string_field(&payload, "name"),
        address: optional_string(&payload, "address"),
        city: string_field(&payload, "city"),
        latitude: optional_f64(&payload, "latitude")?,
        longitude: optional_f64(&payload, "longitude")?,
        place_ref: string_field(&payload, "placeRef"),
    };

    let service = CafeService::new(&app_state.db);
    let (cafe, created) = service.upsert_by_place_ref(input).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(json!({
            "cafe": AdminCafeResponse::from(cafe),
            "created": created,
        })),
    ))
}

/// PATCH /api/v1/admin/cafes/:id/visibility
///
/// Body: { "isHidden": bool }.
pub async fn set_visibility(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let hidden = payload["isHidden"]
        .as_bool()
        .ok_or_else(|| ApiError::validation("isHidden must be a boolean"))?;

    let service = CafeService::new(&app_state.db);
    let cafe = service.set_visibility(&id, hidden).await?;

    Ok(Json(json!({
        "cafe": {
            "id": cafe.id,
            "isHidden": cafe.hidden,
        }
    })))
}

/// POST /api/v1/admin/cafes/bulk-visibility
///
/// Body: { "ids": [...], "action": "delete" | "restore" }. "delete"
/// hides, "restore" unhides; rows are never removed here.
pub async fn bulk_visibility(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let ids: Vec<String> = payload["ids"]
        .as_array()
        .ok_or_else(|| ApiError::validation("ids must be an array of cafe ids"))?
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect();

    let action = payload["action"]
        .as_str()
        .and_then(BulkAction::from_param)
        .ok_or_else(|| ApiError::validation("action must be \"delete\" or \"restore\""))?;

    let service = CafeService::new(&app_state.db);
    let updated = service.bulk_visibility(&ids, action).await?;

    Ok(Json(json!({
        "updatedCount": updated,
        "isHidden": action.hidden(),
    })))
}

/// DELETE /api/v1/admin/cafes/:id
///
/// Permanent removal for spam rows; reviews and favorites go with the
/// cafe. Moderation hiding lives under /visibility instead.
pub async fn hard_delete(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let service = CafeService::new(&app_state.db);
    service.hard_delete(&id).await?;

    Ok(Json(json!({ "deleted": true })))
}

/// DELETE /api/v1/admin/reviews/:id
pub async fn delete_review(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let service = ReviewService::new(&app_state.db);
    service.delete_by_id(&id).await?;

    Ok(Json(json!({ "deleted": true })))
}

// ============================================================================
// Body Parsing
// ============================================================================

fn string_field(payload: &Value, field: &str) -> String {
    payload[field].as_str().unwrap_or("").trim().to_string()
}

fn optional_string(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn optional_f64(payload: &Value, field: &str) -> Result<Option<f64>, ApiError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ApiError::validation(format!("{field} must be a number"))),
    }
}
