//! Favorite marking and the viewer's favorites list.
//!
//! Favoriting is idempotent in both directions: double-favoriting and
//! unfavoriting something never favorited are both successful no-ops.
//! The unique index on (user_id, cafe_id) keeps the relation a set.

use chrono::{DateTime, Utc};
use entity::{cafe, favorite};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::modules::ranking::{page, PageMeta, PageRequest, RatingAggregator, RatingSummary};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during favorite operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    NotFound(String),
}

// ============================================================================
// Domain Types
// ============================================================================

/// A favorited cafe with its rating summary.
#[derive(Debug, Clone)]
pub struct FavoriteCafe {
    pub cafe: cafe::Model,
    pub summary: RatingSummary,
    pub favorited_at: DateTime<Utc>,
}

/// One page of the viewer's favorites, most recently favorited first.
#[derive(Debug, Clone)]
pub struct FavoritePage {
    pub cafes: Vec<FavoriteCafe>,
    pub meta: PageMeta,
}

impl FavoritePage {
    /// The page a viewer with no favorites (or no account yet) sees.
    pub fn empty(page_request: PageRequest) -> Self {
        let (cafes, meta) = page::paginate(Vec::new(), page_request);
        Self { cafes, meta }
    }
}

// ============================================================================
// Service Definition
// ============================================================================

/// Service for marking favorites and listing them.
pub struct FavoriteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavoriteService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mark a cafe as favorited. Re-favoriting is a no-op.
    pub async fn add(&self, user_id: &str, cafe_id: &str) -> Result<(), ServiceError> {
        let found = cafe::Entity::find_by_id(cafe_id.to_string())
            .one(self.db)
            .await?;
        match found {
            Some(cafe) if !cafe.hidden => {}
            _ => return Err(ServiceError::NotFound(format!("Cafe not found: {cafe_id}"))),
        }

        if self.find_pair(user_id, cafe_id).await?.is_some() {
            return Ok(());
        }

        let record = favorite::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            cafe_id: Set(cafe_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        match record.insert(self.db).await {
            Ok(created) => {
                info!(favorite_id = %created.id, cafe_id = %cafe_id, "Favorited cafe");
                Ok(())
            }
            // A concurrent request inserted the pair first; same outcome.
            Err(insert_err) => {
                if self.find_pair(user_id, cafe_id).await?.is_some() {
                    Ok(())
                } else {
                    Err(ServiceError::Database(insert_err))
                }
            }
        }
    }

    /// Remove a favorite. Removing one that never existed succeeds.
    pub async fn remove(&self, user_id: &str, cafe_id: &str) -> Result<(), ServiceError> {
        let result = favorite::Entity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::CafeId.eq(cafe_id))
            .exec(self.db)
            .await?;

        if result.rows_affected > 0 {
            info!(cafe_id = %cafe_id, "Unfavorited cafe");
        }
        Ok(())
    }

    /// The viewer's favorites, most recently favorited first.
    ///
    /// Hidden cafes drop out of the list while hidden and reappear on
    /// restore; the favorite rows themselves are untouched. Summaries
    /// are computed for the page window only.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        page_request: PageRequest,
    ) -> Result<FavoritePage, ServiceError> {
        let rows = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .find_also_related(cafe::Entity)
            .order_by_desc(favorite::Column::CreatedAt)
            .order_by_asc(favorite::Column::Id)
            .all(self.db)
            .await?;

        let visible: Vec<(favorite::Model, cafe::Model)> = rows
            .into_iter()
            .filter_map(|(fav, cafe)| cafe.map(|c| (fav, c)))
            .filter(|(_, cafe)| !cafe.hidden)
            .collect();

        let (window, meta) = page::paginate(visible, page_request);

        let window_ids: Vec<String> = window.iter().map(|(_, c)| c.id.clone()).collect();
        let mut summaries = RatingAggregator::new(self.db).summarize(&window_ids).await?;

        let cafes = window
            .into_iter()
            .map(|(fav, cafe)| FavoriteCafe {
                summary: summaries.remove(&cafe.id).unwrap_or_default(),
                favorited_at: fav.created_at.into(),
                cafe,
            })
            .collect();

        Ok(FavoritePage { cafes, meta })
    }

    async fn find_pair(
        &self,
        user_id: &str,
        cafe_id: &str,
    ) -> Result<Option<favorite::Model>, ServiceError> {
        let found = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::CafeId.eq(cafe_id))
            .one(self.db)
            .await?;
        Ok(found)
    }
}
