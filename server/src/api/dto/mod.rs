//! API error type and response DTOs for the REST surface.
//!
//! Wire field names are camelCase. Internal failures log their detail
//! and surface a generic message; validation and not-found errors pass
//! their message through, those strings are part of the contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use entity::cafe;

use crate::modules::catalog::{RankedCafe, RankedPage};
use crate::modules::favorites::{FavoriteCafe, FavoritePage};
use crate::modules::ranking::{Candidate, PageMeta};
use crate::modules::reviews::CafeReview;

// ============================================================================
// Error Type
// ============================================================================

/// Error carried out of a handler: an HTTP status plus the public
/// message for the response body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Server misconfiguration the operator must fix. Unlike
    /// `internal`, the message is surfaced: it names the missing
    /// configuration rather than anything request-derived.
    pub fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(message = %message, "Configuration error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn internal(detail: impl AsRef<str>) -> Self {
        tracing::error!(detail = %detail.as_ref(), "Internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ============================================================================
// Cafe Responses
// ============================================================================

/// Cafe as returned by the public list, search, and detail endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CafeResponse {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: String,
    pub created_at: DateTime<Utc>,
    pub review_count: u32,
    pub taste_rating: Option<f64>,
    pub aesthetic_rating: Option<f64>,
    pub study_rating: Option<f64>,
    /// Overall mean of the three dimension means.
    pub average_rating: Option<f64>,
    /// Bayesian-weighted score the rating sort uses.
    pub weighted_rating: Option<f64>,
    pub is_favorited: bool,
}

impl From<RankedCafe> for CafeResponse {
    fn from(ranked: RankedCafe) -> Self {
        let RankedCafe {
            cafe,
            summary,
            is_favorited,
        } = ranked;
        Self {
            id: cafe.id,
            name: cafe.name,
            address: cafe.address,
            city: cafe.city,
            latitude: cafe.latitude,
            longitude: cafe.longitude,
            place_ref: cafe.place_ref,
            created_at: cafe.created_at.into(),
            review_count: summary.review_count,
            taste_rating: summary.taste_rating,
            aesthetic_rating: summary.aesthetic_rating,
            study_rating: summary.study_rating,
            average_rating: summary.overall_rating,
            weighted_rating: summary.weighted_rating,
            is_favorited,
        }
    }
}

/// Paged cafe listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCafesResponse {
    pub cafes: Vec<CafeResponse>,
    pub pagination: PageMeta,
    pub sort: String,
}

impl From<RankedPage> for ListCafesResponse {
    fn from(page: RankedPage) -> Self {
        Self {
            sort: page.sort.as_str().to_string(),
            cafes: page.cafes.into_iter().map(CafeResponse::from).collect(),
            pagination: page.meta,
        }
    }
}

/// Cafe row in the admin listing. No aggregates here; moderation cares
/// about visibility, not scores.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCafeResponse {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: String,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl From<cafe::Model> for AdminCafeResponse {
    fn from(cafe: cafe::Model) -> Self {
        Self {
            id: cafe.id,
            name: cafe.name,
            address: cafe.address,
            city: cafe.city,
            latitude: cafe.latitude,
            longitude: cafe.longitude,
            place_ref: cafe.place_ref,
            is_hidden: cafe.hidden,
            created_at: cafe.created_at.into(),
        }
    }
}

// ============================================================================
// Review Responses
// ============================================================================

/// A review in a cafe's review listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub reviewer_name: Option<String>,
    pub taste: i32,
    pub aesthetic: i32,
    pub study: i32,
    pub price: Option<f64>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CafeReview> for ReviewResponse {
    fn from(review: CafeReview) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            reviewer_name: review.reviewer_name,
            taste: review.taste,
            aesthetic: review.aesthetic,
            study: review.study,
            price: review.price,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

// ============================================================================
// Favorite Responses
// ============================================================================

/// Entry in the viewer's favorites list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCafeResponse {
    #[serde(flatten)]
    pub cafe: CafeResponse,
    pub favorited_at: DateTime<Utc>,
}

impl From<FavoriteCafe> for FavoriteCafeResponse {
    fn from(favorite: FavoriteCafe) -> Self {
        let favorited_at = favorite.favorited_at;
        let cafe = CafeResponse::from(RankedCafe {
            cafe: favorite.cafe,
            summary: favorite.summary,
            is_favorited: true,
        });
        Self { cafe, favorited_at }
    }
}

/// Paged favorites listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub cafes: Vec<FavoriteCafeResponse>,
    pub pagination: PageMeta,
}

impl From<FavoritePage> for FavoritesResponse {
    fn from(page: FavoritePage) -> Self {
        Self {
            cafes: page.cafes.into_iter().map(FavoriteCafeResponse::from).collect(),
            pagination: page.meta,
        }
    }
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

/// Entry on the leaderboard, ranked by overall rating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub city: String,
    pub review_count: u32,
    pub taste_rating: Option<f64>,
    pub aesthetic_rating: Option<f64>,
    pub study_rating: Option<f64>,
    pub average_rating: Option<f64>,
}

impl LeaderboardEntryResponse {
    pub fn from_candidate(rank: u32, candidate: Candidate) -> Self {
        Self {
            rank,
            id: candidate.cafe.id,
            name: candidate.cafe.name,
            city: candidate.cafe.city,
            review_count: candidate.summary.review_count,
            taste_rating: candidate.summary.taste_rating,
            aesthetic_rating: candidate.summary.aesthetic_rating,
            study_rating: candidate.summary.study_rating,
            average_rating: candidate.summary.overall_rating,
        }
    }
}
