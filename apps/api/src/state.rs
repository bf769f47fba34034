use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::catalog::SiteCatalog;
use crate::config::Config;
use crate::reviews::ReviewsCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Service and location catalogs, built once at startup and never mutated.
    pub catalog: Arc<SiteCatalog>,
    pub reviews: Arc<ReviewsCache>,
}
