//! Request throttling middleware for the heavy public read routes.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::modules::auth::jwt;
use crate::modules::throttle::Decision;

use super::app_state::AppState;

/// Reject requests over the configured per-client rate.
pub async fn throttle(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    match state.limiter.check(&key) {
        Decision::Allowed => next.run(request).await,
        Decision::Limited => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "too many requests" })),
        )
            .into_response(),
    }
}

/// Throttle key for a request: the authenticated subject when a valid
/// token is present, otherwise the forwarded client address. Behind
/// the usual proxy setup the first X-Forwarded-For entry is the
/// client; requests with neither share one anonymous bucket.
fn client_key(request: &Request) -> String {
    let token_subject = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|token| jwt::validate_token(token).ok())
        .map(|claims| claims.sub);

    if let Some(subject) = token_subject {
        return format!("user:{subject}");
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
        .map(|ip| format!("ip:{}", ip.trim()))
        .unwrap_or_else(|| "anonymous".to_string())
}
