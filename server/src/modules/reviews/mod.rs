//! Review submission, listing, and removal.

pub mod service;

// Re-exports for convenient access
pub use service::{CafeReview, ReviewInput, ReviewService, ServiceError, MAX_COMMENT_LENGTH};
