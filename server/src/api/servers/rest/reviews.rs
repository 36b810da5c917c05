//! Review handlers: submit, list, and delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::dto::{ApiError, ReviewResponse};
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::modules::auth::AccountService;
use crate::modules::ranking::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::modules::ranking::PageRequest;
use crate::modules::reviews::{ReviewInput, ReviewService, ServiceError};

use super::param;

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

/// GET /api/v1/cafes/:id/reviews
pub async fn list_for_cafe(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let page_request = PageRequest::from_params(
        param(&pairs, "page"),
        param(&pairs, "pageSize"),
        DEFAULT_PAGE_SIZE,
        MAX_PAGE_SIZE,
    )
    .map_err(|e| ApiError::validation(e.to_string()))?;

    let service = ReviewService::new(&app_state.db);
    let (reviews, pagination) = service.list_for_cafe(&id, page_request).await?;
    let reviews: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();

    Ok(Json(json!({
        "reviews": reviews,
        "pagination": pagination,
    })))
}

/// PUT /api/v1/cafes/:id/reviews
///
/// Creates the caller's review (201) or replaces their existing one
/// (200). Body: taste, aesthetic, study, optional price and comment.
pub async fn submit(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = ReviewInput {
        taste: rating_field(&payload, "taste")?,
        aesthetic: rating_field(&payload, "aesthetic")?,
        study: rating_field(&payload, "study")?,
        price: optional_price(&payload)?,
        comment: payload
            .get("comment")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    };

    let account = AccountService::new(&app_state.db)
        .ensure_user(&user.claims)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let service = ReviewService::new(&app_state.db);
    let (review, created) = service.submit(&account.id, &id, input).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let created_at: chrono::DateTime<chrono::Utc> = review.created_at.into();
    let updated_at: chrono::DateTime<chrono::Utc> = review.updated_at.into();

    Ok((
        status,
        Json(json!({
            "review": {
                "id": review.id,
                "userId": review.user_id,
                "cafeId": review.cafe_id,
                "taste": review.taste,
                "aesthetic": review.aesthetic,
                "study": review.study,
                "price": review.price,
                "comment": review.comment,
                "createdAt": created_at,
                "updatedAt": updated_at,
            },
            "created": created,
        })),
    ))
}

/// DELETE /api/v1/cafes/:id/reviews
///
/// Removes the caller's own review for this cafe.
pub async fn delete_own(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    // A viewer with no account row has never written, so there is no
    // review of theirs to delete.
    let account = AccountService::new(&app_state.db)
        .find_by_subject(&user.subject)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("Review not found for cafe: {id}")))?;

    let service = ReviewService::new(&app_state.db);
    service.delete_own(&account.id, &id).await?;

    Ok(Json(json!({ "deleted": true })))
}

// ============================================================================
// Body Parsing
// ============================================================================

/// A rating dimension must be present and an integer; range checking
/// happens in the service.
fn rating_field(payload: &Value, field: &str) -> Result<i32, ApiError> {
    payload[field]
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| ApiError::validation(format!("{field} must be an integer from 1 to 5")))
}

fn optional_price(payload: &Value) -> Result<Option<f64>, ApiError> {
    match payload.get("price") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ApiError::validation("price must be a non-negative number")),
    }
}
