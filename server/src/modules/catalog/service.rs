//! Cafe catalog service.
//!
//! Owns the cafe listing pipeline (filter, aggregate, sort, window,
//! favorite overlay) and the moderation operations behind the admin
//! endpoints. Hiding a cafe is the moderation tool; hard deletion
//! exists for spam rows and takes the cafe's reviews and favorites
//! with it.

use std::collections::HashSet;

use entity::{cafe, favorite};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::modules::ranking::{
    normalize, page, sort_candidates, Candidate, PageMeta, PageRequest, RatingAggregator,
    SortMode,
};

use super::cities;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

// ============================================================================
// Domain Types
// ============================================================================

/// A cafe with its rating summary and the viewer's favorite flag.
#[derive(Debug, Clone)]
pub struct RankedCafe {
    pub cafe: cafe::Model,
    pub summary: crate::modules::ranking::RatingSummary,
    pub is_favorited: bool,
}

/// One page of ranked cafes plus the metadata to render pagination.
#[derive(Debug, Clone)]
pub struct RankedPage {
    pub cafes: Vec<RankedCafe>,
    pub meta: PageMeta,
    pub sort: SortMode,
}

/// Cafe fields accepted by the admin import endpoint.
#[derive(Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: String,
}

/// Bulk moderation actions. "delete" hides rows and "restore" unhides
/// them; neither removes anything from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Hide,
    Restore,
}

impl BulkAction {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "delete" => Some(BulkAction::Hide),
            "restore" => Some(BulkAction::Restore),
            _ => None,
        }
    }

    pub fn hidden(&self) -> bool {
        matches!(self, BulkAction::Hide)
    }
}

/// Number of entries on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 20;

// ============================================================================
// Service Definition
// ============================================================================

/// Service for cafe listing, search, and moderation.
pub struct CafeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CafeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Public Listing Operations
    // ========================================================================

    /// List visible cafes through the full ranking pipeline.
    ///
    /// `query`, when present, narrows candidates by folded-name
    /// containment. The whole candidate set is ranked before the page
    /// window is cut, and the favorite overlay is looked up for the
    /// window only.
    pub async fn list_ranked(
        &self,
        requested_cities: &[String],
        query: Option<&str>,
        viewer_user_id: Option<&str>,
        sort: SortMode,
        page_request: PageRequest,
    ) -> Result<RankedPage, ServiceError> {
        let mut select = cafe::Entity::find().filter(cafe::Column::Hidden.eq(false));
        if let Some(city_set) = cities::expand_filter(requested_cities) {
            select = select.filter(cafe::Column::City.is_in(city_set));
        }
        let fetched = select.all(self.db).await?;

        // Name matching happens in memory so accented and plain forms
        // compare equal regardless of store collation.
        let rows: Vec<cafe::Model> = match query {
            Some(q) => fetched
                .into_iter()
                .filter(|c| normalize::matches(&c.name, q))
                .collect(),
            None => fetched,
        };

        let ids: Vec<String> = rows.iter().map(|c| c.id.clone()).collect();
        let mut summaries = RatingAggregator::new(self.db).summarize(&ids).await?;

        let mut candidates: Vec<Candidate> = rows
            .into_iter()
            .map(|cafe| {
                let summary = summaries.remove(&cafe.id).unwrap_or_default();
                Candidate::new(cafe, summary)
            })
            .collect();

        sort_candidates(&mut candidates, sort);

        let (window, meta) = page::paginate(candidates, page_request);

        let window_ids: Vec<String> = window.iter().map(|c| c.cafe.id.clone()).collect();
        let favorited = self.favorited_within(viewer_user_id, &window_ids).await?;

        let cafes = window
            .into_iter()
            .map(|candidate| RankedCafe {
                is_favorited: favorited.contains(&candidate.cafe.id),
                cafe: candidate.cafe,
                summary: candidate.summary,
            })
            .collect();

        debug!(
            total = meta.total,
            page = meta.page,
            sort = sort.as_str(),
            "Ranked cafe listing"
        );

        Ok(RankedPage { cafes, meta, sort })
    }

    /// Fetch a single cafe with its summary and favorite flag.
    ///
    /// Hidden cafes behave as absent unless `include_hidden` is set
    /// (admin detail views).
    pub async fn get_ranked(
        &self,
        id: &str,
        viewer_user_id: Option<&str>,
        include_hidden: bool,
    ) -> Result<RankedCafe, ServiceError> {
        let cafe = self.require_cafe(id).await?;
        if cafe.hidden && !include_hidden {
            return Err(ServiceError::NotFound(format!("Cafe not found: {id}")));
        }

        let summaries = RatingAggregator::new(self.db)
            .summarize(&[cafe.id.clone()])
            .await?;
        let summary = summaries.get(&cafe.id).cloned().unwrap_or_default();

        let favorited = self
            .favorited_within(viewer_user_id, std::slice::from_ref(&cafe.id))
            .await?;

        Ok(RankedCafe {
            is_favorited: favorited.contains(&cafe.id),
            cafe,
            summary,
        })
    }

    /// Top cafes by overall rating, for the leaderboard.
    ///
    /// Only cafes with at least one review appear; the ordering uses
    /// the raw overall mean, not the weighted score, so the board
    /// rewards the best-rated rather than the best-evidenced.
    pub async fn leaderboard(&self) -> Result<Vec<Candidate>, ServiceError> {
        let rows = cafe::Entity::find()
            .filter(cafe::Column::Hidden.eq(false))
            .all(self.db)
            .await?;

        let ids: Vec<String> = rows.iter().map(|c| c.id.clone()).collect();
        let mut summaries = RatingAggregator::new(self.db).summarize(&ids).await?;

        let mut reviewed: Vec<Candidate> = rows
            .into_iter()
            .filter_map(|cafe| summaries.remove(&cafe.id).map(|s| Candidate::new(cafe, s)))
            .filter(|c| c.summary.review_count > 0)
            .collect();

        reviewed.sort_by(|a, b| {
            let overall_a = a.summary.overall_rating.unwrap_or(0.0);
            let overall_b = b.summary.overall_rating.unwrap_or(0.0);
            overall_b
                .partial_cmp(&overall_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.summary.review_count.cmp(&a.summary.review_count))
                .then_with(|| a.folded_name.cmp(&b.folded_name))
                .then_with(|| a.cafe.id.cmp(&b.cafe.id))
        });
        reviewed.truncate(LEADERBOARD_SIZE);

        Ok(reviewed)
    }

    // ========================================================================
    // Admin Operations
    // ========================================================================

    /// Moderation listing: hidden cafes first, then by name.
    ///
    /// `query` matches name, address, or city; `show_hidden` false
    /// narrows to visible cafes only.
    pub async fn admin_list(
        &self,
        query: Option<&str>,
        show_hidden: bool,
        page_request: PageRequest,
    ) -> Result<(Vec<cafe::Model>, PageMeta), ServiceError> {
        let mut select = cafe::Entity::find();
        if !show_hidden {
            select = select.filter(cafe::Column::Hidden.eq(false));
        }
        let fetched = select.all(self.db).await?;

        let mut rows: Vec<cafe::Model> = match query {
            Some(q) => fetched
                .into_iter()
                .filter(|c| {
                    normalize::matches(&c.name, q)
                        || c.address
                            .as_deref()
                            .map(|a| normalize::matches(a, q))
                            .unwrap_or(false)
                        || normalize::matches(&c.city, q)
                })
                .collect(),
            None => fetched,
        };

        rows.sort_by(|a, b| {
            b.hidden
                .cmp(&a.hidden)
                .then_with(|| normalize::fold(&a.name).cmp(&normalize::fold(&b.name)))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(page::paginate(rows, page_request))
    }

    /// Set a single cafe's visibility flag.
    pub async fn set_visibility(
        &self,
        id: &str,
        hidden: bool,
    ) -> Result<cafe::Model, ServiceError> {
        let cafe = self.require_cafe(id).await?;

        let mut active: cafe::ActiveModel = cafe.into();
        active.hidden = Set(hidden);
        let updated = active.update(self.db).await?;

        info!(cafe_id = %updated.id, hidden = updated.hidden, "Set cafe visibility");
        Ok(updated)
    }

    /// Apply a bulk visibility action and return the affected count.
    ///
    /// Ids that match nothing are skipped silently; re-hiding an
    /// already hidden cafe still counts as updated.
    pub async fn bulk_visibility(
        &self,
        ids: &[String],
        action: BulkAction,
    ) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = cafe::Entity::update_many()
            .col_expr(cafe::Column::Hidden, Expr::value(action.hidden()))
            .filter(cafe::Column::Id.is_in(ids.iter().cloned()))
            .exec(self.db)
            .await?;

        info!(
            requested = ids.len(),
            updated = result.rows_affected,
            hidden = action.hidden(),
            "Bulk visibility update"
        );
        Ok(result.rows_affected)
    }

    /// Create or refresh a cafe from an imported place.
    ///
    /// `place_ref` is the idempotency key: re-importing the same place
    /// updates the descriptive fields in place and keeps the existing
    /// id, visibility, and reviews. Returns the row and whether it was
    /// created.
    pub async fn upsert_by_place_ref(
        &self,
        input: NewCafe,
    ) -> Result<(cafe::Model, bool), ServiceError> {
        Self::validate(&input)?;

        let existing = cafe::Entity::find()
            .filter(cafe::Column::PlaceRef.eq(&input.place_ref))
            .one(self.db)
            .await?;

        if let Some(found) = existing {
            let mut active: cafe::ActiveModel = found.into();
            active.name = Set(input.name);
            active.address = Set(input.address);
            active.city = Set(input.city);
            active.latitude = Set(input.latitude);
            active.longitude = Set(input.longitude);
            let updated = active.update(self.db).await?;

            info!(cafe_id = %updated.id, place_ref = %updated.place_ref, "Refreshed imported cafe");
            return Ok((updated, false));
        }

        let record = cafe::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(input.name),
            address: Set(input.address),
            city: Set(input.city),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            place_ref: Set(input.place_ref),
            hidden: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };
        let created = record.insert(self.db).await?;

        info!(cafe_id = %created.id, place_ref = %created.place_ref, "Created cafe from import");
        Ok((created, true))
    }

    /// Permanently remove a cafe. Reviews and favorites cascade.
    pub async fn hard_delete(&self, id: &str) -> Result<(), ServiceError> {
        let cafe = self.require_cafe(id).await?;
        cafe::Entity::delete_by_id(cafe.id.clone()).exec(self.db).await?;

        info!(cafe_id = %id, "Hard deleted cafe");
        Ok(())
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    async fn require_cafe(&self, id: &str) -> Result<cafe::Model, ServiceError> {
        cafe::Entity::find_by_id(id.to_string())
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cafe not found: {id}")))
    }

    /// Favorite flags for the given cafe ids, restricted to the page
    /// window so per-request cost tracks page size.
    async fn favorited_within(
        &self,
        viewer_user_id: Option<&str>,
        cafe_ids: &[String],
    ) -> Result<HashSet<String>, ServiceError> {
        let Some(user_id) = viewer_user_id else {
            return Ok(HashSet::new());
        };
        if cafe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::CafeId.is_in(cafe_ids.iter().cloned()))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|f| f.cafe_id).collect())
    }

    fn validate(input: &NewCafe) -> Result<(), ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation("name is required".to_string()));
        }
        if input.place_ref.trim().is_empty() {
            return Err(ServiceError::Validation("placeRef is required".to_string()));
        }
        if !cities::is_known(&input.city) {
            return Err(ServiceError::Validation(format!(
                "city must be one of: {}",
                cities::CITIES.join(", ")
            )));
        }
        if input.latitude.is_some() != input.longitude.is_some() {
            return Err(ServiceError::Validation(
                "latitude and longitude must be provided together".to_string(),
            ));
        }
        Ok(())
    }
}
