pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod ranking;
pub mod reviews;
pub mod throttle;
