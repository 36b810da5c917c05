//! Favorites: idempotent marking and the viewer's saved list.

pub mod service;

// Re-exports for convenient access
pub use service::{FavoriteCafe, FavoritePage, FavoriteService, ServiceError};
