//! Shared application state for request handlers.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::modules::auth::AdminDirectory;
use crate::modules::throttle::FixedWindowLimiter;

/// State cloned into every handler. The connection is pooled and the
/// limiter is shared, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub admins: AdminDirectory,
    pub limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        admins: AdminDirectory,
        limiter: Arc<FixedWindowLimiter>,
    ) -> Self {
        Self {
            db,
            admins,
            limiter,
        }
    }
}
