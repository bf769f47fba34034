mod careers;
mod catalog;
mod config;
mod db;
mod errors;
mod localize;
mod models;
mod pages;
mod reviews;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::SiteCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::reviews::google::GooglePlacesSource;
use crate::reviews::ReviewsCache;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Express API v{}", env!("CARGO_PKG_VERSION"));

    // Service and location catalogs; bad service data aborts startup
    let catalog = Arc::new(SiteCatalog::load()?);

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Reviews proxy
    let source = GooglePlacesSource::new(
        config.google_places_api_key.clone(),
        config.google_place_id.clone(),
    )?;
    let reviews = Arc::new(ReviewsCache::new(Arc::new(source), config.reviews_cache_ttl));
    if config.google_places_api_key.is_none() || config.google_place_id.is_none() {
        info!("Google Places credentials not set; /api/v1/reviews will report a config error");
    }
    info!(
        "Reviews cache TTL: {}s",
        config.reviews_cache_ttl.as_secs()
    );

    let state = AppState {
        db,
        s3,
        config: config.clone(),
        catalog,
        reviews,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the marketing site domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "express-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
