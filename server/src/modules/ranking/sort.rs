//! Candidate ordering.
//!
//! Every sort family ends in the same deterministic tail: folded name,
//! then id. Two runs over the same data produce the same order, so page
//! windows are stable across requests.

use std::cmp::Ordering;

use entity::cafe;

use super::aggregate::RatingSummary;
use super::normalize;

/// A cafe paired with its rating summary, ready for ordering.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub cafe: cafe::Model,
    pub summary: RatingSummary,
    /// Name folded once at construction; ordering by name must agree
    /// with search matching, which uses the same fold.
    pub folded_name: String,
}

impl Candidate {
    pub fn new(cafe: cafe::Model, summary: RatingSummary) -> Self {
        let folded_name = normalize::fold(&cafe.name);
        Self {
            cafe,
            summary,
            folded_name,
        }
    }
}

/// Sort families offered by the list and search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Weighted rating desc, review count desc, name asc.
    Rating,
    /// Review count desc, weighted rating desc, name asc.
    Popularity,
    /// Name ascending.
    Name,
    /// Name descending.
    NameDesc,
}

impl SortMode {
    /// Parse a `sort` query parameter. Absent and unrecognized values
    /// fall back to the rating family.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("popularity") => SortMode::Popularity,
            Some("name") => SortMode::Name,
            Some("name_desc") => SortMode::NameDesc,
            _ => SortMode::Rating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Rating => "rating",
            SortMode::Popularity => "popularity",
            SortMode::Name => "name",
            SortMode::NameDesc => "name_desc",
        }
    }
}

/// Cafes without a weighted rating sort below every scored cafe.
fn weighted_key(candidate: &Candidate) -> f64 {
    candidate.summary.weighted_rating.unwrap_or(-1.0)
}

fn cmp_weighted_desc(a: &Candidate, b: &Candidate) -> Ordering {
    weighted_key(b)
        .partial_cmp(&weighted_key(a))
        .unwrap_or(Ordering::Equal)
}

fn cmp_count_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.summary.review_count.cmp(&a.summary.review_count)
}

fn cmp_name_asc(a: &Candidate, b: &Candidate) -> Ordering {
    a.folded_name.cmp(&b.folded_name)
}

fn cmp_id(a: &Candidate, b: &Candidate) -> Ordering {
    a.cafe.id.cmp(&b.cafe.id)
}

/// Order the full candidate set in place.
///
/// Always applied before pagination: a page is a slice of this order,
/// never a reordering of a slice.
pub fn sort_candidates(candidates: &mut [Candidate], mode: SortMode) {
    match mode {
        SortMode::Rating => candidates.sort_by(|a, b| {
            cmp_weighted_desc(a, b)
                .then_with(|| cmp_count_desc(a, b))
                .then_with(|| cmp_name_asc(a, b))
                .then_with(|| cmp_id(a, b))
        }),
        SortMode::Popularity => candidates.sort_by(|a, b| {
            cmp_count_desc(a, b)
                .then_with(|| cmp_weighted_desc(a, b))
                .then_with(|| cmp_name_asc(a, b))
                .then_with(|| cmp_id(a, b))
        }),
        SortMode::Name => {
            candidates.sort_by(|a, b| cmp_name_asc(a, b).then_with(|| cmp_id(a, b)))
        }
        SortMode::NameDesc => {
            candidates.sort_by(|a, b| cmp_name_asc(b, a).then_with(|| cmp_id(a, b)))
        }
    }
}
