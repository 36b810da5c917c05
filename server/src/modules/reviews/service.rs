//! Review submission and listing.
//!
//! One review per user per cafe: resubmitting replaces the caller's
//! existing review instead of stacking a second one, so nobody can
//! pile votes onto a cafe. The unique index on (user_id, cafe_id)
//! backs this at the storage layer.

use chrono::{DateTime, Utc};
use entity::{cafe, review, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::modules::ranking::{page, PageMeta, PageRequest};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during review operations
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

/// Review fields accepted from the submission endpoint.
#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub taste: i32,
    pub aesthetic: i32,
    pub study: i32,
    pub price: Option<f64>,
    pub comment: Option<String>,
}

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// A review joined with its author's display name, for listing.
#[derive(Debug, Clone)]
pub struct CafeReview {
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

// ============================================================================
// Service Definition
// ============================================================================

/// Service for submitting, listing, and removing reviews.
pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create or replace the caller's review for a cafe.
    ///
    /// Returns the stored review and whether it was newly created.
    /// Concurrent first submissions race on the unique (user, cafe)
    /// index; an insert that loses the race falls back to updating
    /// the winning row.
    pub async fn submit(
        &self,
        user_id: &str,
        cafe_id: &str,
        input: ReviewInput,
    ) -> Result<(review::Model, bool), ServiceError> {
        Self::validate(&input)?;
        self.require_visible_cafe(cafe_id).await?;

        if let Some(existing) = self.find_by_user_and_cafe(user_id, cafe_id).await? {
            let updated = self.apply(existing, &input).await?;
            info!(review_id = %updated.id, cafe_id = %cafe_id, "Replaced review");
            return Ok((updated, false));
        }

        let now = Utc::now();
        let record = review::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            cafe_id: Set(cafe_id.to_string()),
            taste: Set(input.taste),
            aesthetic: Set(input.aesthetic),
            study: Set(input.study),
            price: Set(input.price),
            comment: Set(input.comment.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        match record.insert(self.db).await {
            Ok(created) => {
                info!(review_id = %created.id, cafe_id = %cafe_id, "Created review");
                Ok((created, true))
            }
            Err(insert_err) => match self.find_by_user_and_cafe(user_id, cafe_id).await? {
                Some(existing) => {
                    let updated = self.apply(existing, &input).await?;
                    Ok((updated, false))
                }
                None => Err(ServiceError::Database(insert_err)),
            },
        }
    }

    /// Delete the caller's own review for a cafe.
    pub async fn delete_own(&self, user_id: &str, cafe_id: &str) -> Result<(), ServiceError> {
        let existing = self
            .find_by_user_and_cafe(user_id, cafe_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Review not found for cafe: {cafe_id}"))
            })?;

        review::Entity::delete_by_id(existing.id.clone())
            .exec(self.db)
            .await?;

        info!(review_id = %existing.id, cafe_id = %cafe_id, "Deleted own review");
        Ok(())
    }

    /// Delete any review by id. Moderation path; ownership is not
    /// checked here, the caller has already authorized the action.
    pub async fn delete_by_id(&self, review_id: &str) -> Result<(), ServiceError> {
        let existing = review::Entity::find_by_id(review_id.to_string())
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Review not found: {review_id}")))?;

        review::Entity::delete_by_id(existing.id.clone())
            .exec(self.db)
            .await?;

        info!(review_id = %review_id, "Deleted review");
        Ok(())
    }

    /// List a cafe's reviews, newest first, with author names.
    pub async fn list_for_cafe(
        &self,
        cafe_id: &str,
        page_request: PageRequest,
    ) -> Result<(Vec<CafeReview>, PageMeta), ServiceError> {
        self.require_visible_cafe(cafe_id).await?;

        let rows = review::Entity::find()
            .filter(review::Column::CafeId.eq(cafe_id))
            .find_also_related(user::Entity)
            .order_by_desc(review::Column::CreatedAt)
            .order_by_asc(review::Column::Id)
            .all(self.db)
            .await?;

        let reviews: Vec<CafeReview> = rows
            .into_iter()
            .map(|(row, author)| CafeReview {
                id: row.id,
                user_id: row.user_id,
                reviewer_name: author.and_then(|a| a.display_name),
                taste: row.taste,
                aesthetic: row.aesthetic,
                study: row.study,
                price: row.price,
                comment: row.comment,
                created_at: row.created_at.into(),
                updated_at: row.updated_at.into(),
            })
            .collect();

        Ok(page::paginate(reviews, page_request))
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    async fn find_by_user_and_cafe(
        &self,
        user_id: &str,
        cafe_id: &str,
    ) -> Result<Option<review::Model>, ServiceError> {
        let found = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::CafeId.eq(cafe_id))
            .one(self.db)
            .await?;
        Ok(found)
    }

    async fn apply(
        &self,
        existing: review::Model,
        input: &ReviewInput,
    ) -> Result<review::Model, ServiceError> {
        let mut active: review::ActiveModel = existing.into();
        active.taste = Set(input.taste);
        active.aesthetic = Set(input.aesthetic);
        active.study = Set(input.study);
        active.price = Set(input.price);
        active.comment = Set(input.comment.clone());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(self.db).await?;
        Ok(updated)
    }

    /// Reviews attach only to cafes the public can see; a hidden cafe
    /// behaves as absent.
    async fn require_visible_cafe(&self, cafe_id: &str) -> Result<cafe::Model, ServiceError> {
        let found = cafe::Entity::find_by_id(cafe_id.to_string())
            .one(self.db)
            .await?;
        match found {
            Some(cafe) if !cafe.hidden => Ok(cafe),
            _ => Err(ServiceError::NotFound(format!("Cafe not found: {cafe_id}"))),
        }
    }

    fn validate(input: &ReviewInput) -> Result<(), ServiceError> {
        for (dimension, value) in [
            ("taste", input.taste),
            ("aesthetic", input.aesthetic),
            ("study", input.study),
        ] {
            if !(1..=5).contains(&value) {
                return Err(ServiceError::Validation(format!(
                    "{dimension} must be an integer from 1 to 5"
                )));
            }
        }
        if let Some(price) = input.price {
            if !price.is_finite() || price < 0.0 {
                return Err(ServiceError::Validation(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(comment) = &input.comment {
            if comment.chars().count() > MAX_COMMENT_LENGTH {
                return Err(ServiceError::Validation(format!(
                    "comment must be at most {MAX_COMMENT_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }
}
