//! Integration test root.
//!
//! `api` drives the router over in-process requests, `modules` tests
//! the services against real storage, and `bootstrap`/`util` hold the
//! shared server setup and seeding helpers.


#[cfg(test)]
#[ctor::ctor]
fn global_test_setup() {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .init();
}
