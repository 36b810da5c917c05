//! REST API server setup and routing.

mod admin;
mod cafes;
mod favorites;
mod health;
mod leaderboard;
mod reviews;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::api::dto::ApiError;
use crate::api::servers::app_state::AppState;
use crate::api::servers::jwt_middleware::AuthenticatedUser;
use crate::api::servers::throttle_middleware;
use crate::bootstrap::config::Config;
use crate::modules::auth::AccountService;

/// Build the REST router with all endpoints.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(config);
    let api = "/api/v1";

    // The aggregate-heavy read endpoints sit behind the throttle; the
    // rest of the surface is cheap enough to leave open.
    let throttled = Router::new()
        .route(&format!("{api}/cafes"), get(cafes::list))
        .route(&format!("{api}/cafes/search"), get(cafes::search))
        .route(&format!("{api}/leaderboard"), get(leaderboard::top))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            throttle_middleware::throttle,
        ));

    Router::new()
        .route(&format!("{api}/health"), get(health::check))
        .merge(throttled)
        .route(&format!("{api}/cafes/{{id}}"), get(cafes::get))
        .route(
            &format!("{api}/cafes/{{id}}/reviews"),
            get(reviews::list_for_cafe)
                .put(reviews::submit)
                .delete(reviews::delete_own),
        )
        .route(
            &format!("{api}/cafes/{{id}}/favorite"),
            put(favorites::add).delete(favorites::remove),
        )
        .route(&format!("{api}/me/favorites"), get(favorites::list_mine))
        .route(
            &format!("{api}/admin/cafes"),
            get(admin::list).post(admin::create),
        )
        .route(
            &format!("{api}/admin/cafes/bulk-visibility"),
            post(admin::bulk_visibility),
        )
        .route(
            &format!("{api}/admin/cafes/{{id}}"),
            delete(admin::hard_delete),
        )
        .route(
            &format!("{api}/admin/cafes/{{id}}/visibility"),
            patch(admin::set_visibility),
        )
        .route(
            &format!("{api}/admin/reviews/{{id}}"),
            delete(admin::delete_review),
        )
        .with_state(app_state)
        .layer(cors)
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Start the REST server.
pub async fn start(app_state: &AppState, config: &Config) -> Result<()> {
    let app = build_router(app_state.clone(), config);
    let bind_addr = format!("{}:{}", config.server.host, config.server.rest_port);

    info!("Starting REST server on {}", &bind_addr);
    info!("CORS allowed origins: {:?}", config.cors.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Shared Handler Helpers
// ============================================================================

/// First value for a query key, from raw pairs. Raw pairs are used
/// instead of a typed struct because `city` repeats.
pub(crate) fn param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Every value for a query key, in request order.
pub(crate) fn values(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

/// Resolve an optional viewer to their account id without creating an
/// account; a viewer who has never written has no row and reads as
/// anonymous.
pub(crate) async fn viewer_user_id(
    app_state: &AppState,
    viewer: Option<&AuthenticatedUser>,
) -> Result<Option<String>, ApiError> {
    match viewer {
        Some(user) => {
            let account = AccountService::new(&app_state.db)
                .find_by_subject(&user.subject)
                .await
                .map_err(|e| ApiError::internal(e.to_string()))?;
            Ok(account.map(|a| a.id))
        }
        None => Ok(None),
    }
}
