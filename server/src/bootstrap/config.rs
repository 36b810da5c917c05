//! Application configuration loaded from environment variables.

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::utils::env::{env_bool, env_duration_secs, env_string, env_u16, env_u32, env_u64};

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub admin: AdminConfig,
    pub throttle: ThrottleConfig,
}

/// Database connection pool settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub logging_enabled: bool,
}

/// REST server bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub rest_port: u16,
}

/// JWT validation settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// CORS settings for browser clients.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Admin authorization settings.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Comma-separated list of admin email addresses. An empty list
    /// means admin endpoints reject every request.
    pub allowlist: String,
}

/// Request throttling settings for the public read endpoints.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else
    /// has defaults suitable for local development.
    pub fn from_env() -> Result<Self> {
        let url =
            std::env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL must be set"))?;
        let secret = std::env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            db: DbConfig {
                url,
                max_connections: env_u32("DB_MAX_CONNECTIONS", 50),
                min_connections: env_u32("DB_MIN_CONNECTIONS", 1),
                connect_timeout: env_duration_secs("DB_CONNECT_TIMEOUT_SECS", 8),
                idle_timeout: env_duration_secs("DB_IDLE_TIMEOUT_SECS", 600),
                max_lifetime: env_duration_secs("DB_MAX_LIFETIME_SECS", 1800),
                logging_enabled: env_bool("DB_LOGGING", false),
            },
            server: ServerConfig {
                host: env_string("SERVER_HOST", "0.0.0.0"),
                rest_port: env_u16("REST_PORT", 8080),
            },
            jwt: JwtConfig {
                secret,
                expiry_hours: env_u64("JWT_EXPIRY_HOURS", 24) as i64,
            },
            cors: CorsConfig {
                allowed_origins: env_string("CORS_ALLOWED_ORIGINS", "http://localhost:3000")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_bool("CORS_ALLOW_CREDENTIALS", true),
            },
            admin: AdminConfig {
                allowlist: env_string("ADMIN_EMAILS", ""),
            },
            throttle: ThrottleConfig {
                max_requests: env_u32("THROTTLE_MAX_REQUESTS", 120),
                window: env_duration_secs("THROTTLE_WINDOW_SECS", 60),
            },
        })
    }
}
