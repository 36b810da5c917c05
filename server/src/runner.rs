//! Application runner: wires configuration, storage, and the REST
//! server together and runs until shutdown.

use std::sync::Arc;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::servers::app_state::AppState;
use crate::api::servers::rest;
use crate::bootstrap::config::Config;
use crate::modules::auth::{self, AdminDirectory};
use crate::modules::throttle::FixedWindowLimiter;

/// Run the application until a shutdown signal arrives.
pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    info!("Configuration loaded. Starting server...");

    auth::init_jwt_secret(&config.jwt.secret);

    let db = setup_database(&config).await?;
    let app_state = assemble_state(db, &config);

    run_server(app_state, config).await
}

/// Initialize the tracing subscriber. RUST_LOG overrides the default
/// info level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Connect to the database and bring the schema up to date.
async fn setup_database(config: &Config) -> Result<DatabaseConnection> {
    info!("Setting up database");

    let db_config = &config.db;
    let mut opt = ConnectOptions::new(&db_config.url);
    opt.max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .connect_timeout(db_config.connect_timeout)
        .idle_timeout(db_config.idle_timeout)
        .max_lifetime(db_config.max_lifetime)
        .sqlx_logging(db_config.logging_enabled);

    let connection = sea_orm::Database::connect(opt).await?;

    info!("Running database migrations...");
    Migrator::up(&connection, None).await?;

    Ok(connection)
}

fn assemble_state(db: DatabaseConnection, config: &Config) -> AppState {
    let admins = AdminDirectory::from_allowlist(&config.admin.allowlist);
    if !admins.is_configured() {
        info!("ADMIN_EMAILS is empty; admin endpoints are disabled");
    }

    let limiter = Arc::new(FixedWindowLimiter::new(
        config.throttle.max_requests,
        config.throttle.window,
    ));

    AppState::new(db, admins, limiter)
}

async fn run_server(app_state: AppState, config: Config) -> Result<()> {
    tokio::select! {
        result = rest::start(&app_state, &config) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Application shutdown complete.");
    Ok(())
}
