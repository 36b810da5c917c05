//! Environment variable parsing helpers.
//!
//! Provides typed accessors for environment variables with default values.
//! All helpers follow the same pattern: read the variable, parse it,
//! fall back to the default when missing or malformed.
//!
//! # Example
//! ```ignore
//! let port = env_u16("REST_PORT", 8080);
//! let logging = env_bool("DB_LOGGING", false);
//! ```

use std::time::Duration;

/// Read an environment variable as u64 with a default value.
#[inline]
pub fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read an environment variable as u32 with a default value.
#[inline]
pub fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read an environment variable as u16 with a default value.
#[inline]
pub fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read an environment variable as bool with a default value.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true.
#[inline]
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(default)
}

/// Read an environment variable as String with a default value.
#[inline]
pub fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an optional environment variable as String (no default).
#[inline]
pub fn env_string_opt(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read an environment variable as Duration from seconds with a default.
#[inline]
pub fn env_duration_secs(key: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_u64(key, default_secs))
}
