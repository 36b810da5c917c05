//! Cafe catalog: listing pipeline and moderation.

pub mod cities;
pub mod service;

// Re-exports for convenient access
pub use service::{
    BulkAction, CafeService, NewCafe, RankedCafe, RankedPage, ServiceError, LEADERBOARD_SIZE,
};
