//! Per-cafe rating aggregation.
//!
//! Summaries are recomputed from the review rows present at query time;
//! nothing here is cached or persisted, so a response always reflects
//! the reviews as of the read.

use std::collections::HashMap;

use entity::review;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use tracing::debug;

use super::score::{round2, weighted_rating};

/// Derived rating summary for a single cafe.
///
/// A cafe with no reviews has `review_count` 0 and every rating `None`.
/// That is a normal state for a freshly imported cafe, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub review_count: u32,
    pub taste_rating: Option<f64>,
    pub aesthetic_rating: Option<f64>,
    pub study_rating: Option<f64>,
    pub overall_rating: Option<f64>,
    pub weighted_rating: Option<f64>,
}

/// Computes rating summaries for a set of cafes.
pub struct RatingAggregator<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RatingAggregator<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarize reviews for exactly the given cafes.
    ///
    /// Cafes without reviews are absent from the returned map; callers
    /// treat absence as the empty summary. An empty id set returns an
    /// empty map without touching storage.
    pub async fn summarize(
        &self,
        cafe_ids: &[String],
    ) -> Result<HashMap<String, RatingSummary>, sea_orm::DbErr> {
        if cafe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = review::Entity::find()
            .filter(review::Column::CafeId.is_in(cafe_ids.iter().cloned()))
            .all(self.db)
            .await?;

        debug!(
            cafes = cafe_ids.len(),
            reviews = rows.len(),
            "Aggregating review rows"
        );

        Ok(summarize_rows(&rows))
    }
}

/// Fold review rows into per-cafe summaries.
///
/// Per-dimension means are rounded to two decimals first; the overall
/// rating is the rounded mean of those rounded means, and the weighted
/// score derives from the overall rating. Order of operations matters
/// for byte-stable responses across replicas.
pub fn summarize_rows(rows: &[review::Model]) -> HashMap<String, RatingSummary> {
    struct Totals {
        count: u32,
        taste: i64,
        aesthetic: i64,
        study: i64,
    }

    let mut by_cafe: HashMap<String, Totals> = HashMap::new();
    for row in rows {
        let totals = by_cafe.entry(row.cafe_id.clone()).or_insert(Totals {
            count: 0,
            taste: 0,
            aesthetic: 0,
            study: 0,
        });
        totals.count += 1;
        totals.taste += row.taste as i64;
        totals.aesthetic += row.aesthetic as i64;
        totals.study += row.study as i64;
    }

    by_cafe
        .into_iter()
        .map(|(cafe_id, totals)| {
            let count = totals.count as f64;
            let taste = round2(totals.taste as f64 / count);
            let aesthetic = round2(totals.aesthetic as f64 / count);
            let study = round2(totals.study as f64 / count);
            let overall = round2((taste + aesthetic + study) / 3.0);

            let summary = RatingSummary {
                review_count: totals.count,
                taste_rating: Some(taste),
                aesthetic_rating: Some(aesthetic),
                study_rating: Some(study),
                overall_rating: Some(overall),
                weighted_rating: weighted_rating(overall, totals.count),
            };
            (cafe_id, summary)
        })
        .collect()
}
