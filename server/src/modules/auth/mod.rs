//! Viewer identity and admin authorization.

pub mod accounts;
pub mod admin;
pub mod jwt;

// Re-exports for convenient access
pub use accounts::AccountService;
pub use admin::AdminDirectory;
pub use jwt::{init_jwt_secret, validate_token, Claims, JwtError};
