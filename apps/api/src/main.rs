mod assessment;
mod auth;
mod config;
mod db;
mod errors;
mod generator;
mod jobs;
mod models;
mod profiles;
mod routes;
mod state;
mod talent;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::attempts::RedisAttemptStore;
use crate::auth::HostedAuthVerifier;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::generator::CatalogGenerator;
use crate::jobs::catalog::seed_catalog_if_empty;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FirstCommit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    if config.seed_jobs {
        let seeded = seed_catalog_if_empty(&db).await?;
        if seeded == 0 {
            info!("Job catalog already populated; skipping seed");
        }
    }

    // Initialize Redis-backed attempt store
    let redis = redis::Client::open(config.redis_url.clone())?;
    let attempts = Arc::new(RedisAttemptStore::new(redis, config.attempt_ttl_secs));
    info!(
        "Attempt store initialized (ttl {}s)",
        config.attempt_ttl_secs
    );

    // Hosted auth provider
    let auth = Arc::new(HostedAuthVerifier::new(
        &config.auth_url,
        config.auth_anon_key.clone(),
    )?);
    info!("Auth provider: {}", config.auth_url);

    // Assessment generator (CatalogGenerator by default)
    let generator = Arc::new(CatalogGenerator::new(Duration::from_millis(
        config.generator_delay_ms,
    )));

    // Build app state
    let state = AppState {
        db,
        attempts,
        auth,
        generator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
