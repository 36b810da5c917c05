//! Bayesian-weighted ranking score.
//!
//! A plain mean would let a cafe with a single 5-star review outrank a
//! cafe holding 4.8 across fifty reviews. The weighted score blends
//! each cafe's overall mean with a fixed prior, in proportion to review
//! volume, so sparsely reviewed cafes sit near the middle of the scale
//! until they accumulate evidence.

/// Rating the score shrinks toward: the midpoint of the 1-5 scale.
pub const PRIOR_RATING: f64 = 3.0;

/// Weight of the prior, expressed as a virtual review count.
pub const PRIOR_WEIGHT: f64 = 5.0;

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted ranking score for a cafe.
///
/// Returns `None` when there are no reviews: the score would collapse
/// to the bare prior, and callers surface "no rating yet" instead of a
/// number that pretends to be evidence.
pub fn weighted_rating(overall_rating: f64, review_count: u32) -> Option<f64> {
    if review_count == 0 {
        return None;
    }
    let count = review_count as f64;
    let score = (overall_rating * count + PRIOR_RATING * PRIOR_WEIGHT) / (count + PRIOR_WEIGHT);
    Some(round2(score))
}
