//! JWT authentication extractors for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::dto::ApiError;
use crate::modules::auth::jwt;

use super::app_state::AppState;

/// Authenticated user extracted from a valid JWT token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub email: String,
    pub claims: jwt::Claims,
}

/// Error response for authentication failures.
#[derive(Debug)]
pub enum AuthError {
    MissingAuthHeader,
    InvalidAuthHeaderFormat,
    InvalidToken(String),
}

impl AuthError {
    fn message(&self) -> String {
        match self {
            AuthError::MissingAuthHeader => "Missing authorization header".to_string(),
            AuthError::InvalidAuthHeaderFormat => {
                "Authorization header must be a Bearer token".to_string()
            }
            AuthError::InvalidToken(detail) => format!("Invalid token: {detail}"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::unauthorized(err.message())
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeaderFormat)?;

        let claims =
            jwt::validate_token(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AuthenticatedUser {
            subject: claims.sub.clone(),
            email: claims.email.clone(),
            claims,
        })
    }
}

/// Optional viewer identity for public endpoints that personalize
/// their response. Anonymous and invalid-token requests both proceed
/// as `None`; the content they see is identical either way.
#[derive(Debug, Clone)]
pub struct MaybeViewer(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeViewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeViewer(
            AuthenticatedUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Admin identity for moderation routes.
///
/// Rejection order matters to clients: a missing or bad token is 401
/// before anything else, an unconfigured allowlist is reported as a
/// server problem, and only then does membership decide 403.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: AuthenticatedUser,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !state.admins.is_configured() {
            return Err(ApiError::config("admin email list is not configured"));
        }
        if !state.admins.is_admin(&user.email) {
            return Err(ApiError::forbidden("forbidden"));
        }

        Ok(AdminUser { user })
    }
}
