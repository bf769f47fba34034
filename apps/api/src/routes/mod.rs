pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::careers::handlers as careers;
use crate::careers::uploads::MAX_RESUME_BYTES;
use crate::pages::handlers as pages;
use crate::reviews::handlers as reviews;
use crate::state::AppState;

/// Headroom over the résumé cap for multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Marketing pages
        .route("/api/v1/services", get(pages::handle_list_services))
        .route("/api/v1/services/:slug", get(pages::handle_get_service))
        .route(
            "/api/v1/cities/:city/services/:slug",
            get(pages::handle_get_city_service),
        )
        .route("/api/v1/locations", get(pages::handle_list_locations))
        .route("/api/v1/locations/:slug", get(pages::handle_get_location))
        .route("/api/v1/service-areas", get(pages::handle_service_areas))
        .route("/api/v1/paths", get(pages::handle_static_paths))
        // Reviews
        .route("/api/v1/reviews", get(reviews::handle_get_reviews))
        // Careers
        .route("/api/v1/jobs", get(careers::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(careers::handle_get_job))
        .route(
            "/api/v1/applications",
            post(careers::handle_submit_application),
        )
        .route(
            "/api/v1/uploads/resume",
            post(careers::handle_upload_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Careers admin
        .route(
            "/api/v1/admin/jobs",
            get(careers::handle_admin_list_jobs).post(careers::handle_admin_create_job),
        )
        .route(
            "/api/v1/admin/jobs/:id",
            put(careers::handle_admin_update_job).delete(careers::handle_admin_delete_job),
        )
        .route(
            "/api/v1/admin/applications",
            get(careers::handle_admin_list_applications),
        )
        .route(
            "/api/v1/admin/applications/:id",
            put(careers::handle_admin_update_application)
                .delete(careers::handle_admin_delete_application),
        )
        .with_state(state)
}
