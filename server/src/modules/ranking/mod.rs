//! Rating aggregation and ranking pipeline.
//!
//! Every list-style read recomputes ratings from the review rows that
//! exist at query time and flows through the same stages:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Candidate cafes                        │
//! │        (visibility + city filters, storage-side)        │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   RatingAggregator: per-cafe counts and rounded means   │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   weighted_rating: Bayesian shrinkage toward the prior  │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   sort_candidates: sort family + deterministic ties     │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │     paginate: clamped page window + page metadata       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Sorting always happens over the full candidate set before the page
//! window is cut, so a page is a slice of one global order.

pub mod aggregate;
pub mod normalize;
pub mod page;
pub mod score;
pub mod sort;

// Re-exports for convenient access
pub use aggregate::{RatingAggregator, RatingSummary};
pub use page::{PageMeta, PageParamError, PageRequest};
pub use sort::{sort_candidates, Candidate, SortMode};
