pub mod app_state;
pub mod jwt_middleware;
pub mod rest;
pub mod throttle_middleware;
