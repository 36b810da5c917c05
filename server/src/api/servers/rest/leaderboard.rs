//! Leaderboard handler.

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::api::dto::{ApiError, LeaderboardEntryResponse};
use crate::api::servers::app_state::AppState;
use crate::modules::catalog::CafeService;

/// GET /api/v1/leaderboard
///
/// Top cafes by overall rating; cafes without reviews never appear.
pub async fn top(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let service = CafeService::new(&app_state.db);
    let entries = service.leaderboard().await?;

    let leaderboard: Vec<LeaderboardEntryResponse> = entries
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            LeaderboardEntryResponse::from_candidate(index as u32 + 1, candidate)
        })
        .collect();

    let count = leaderboard.len();
    Ok(Json(json!({
        "leaderboard": leaderboard,
        "count": count,
    })))
}
