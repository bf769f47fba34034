//! Axum route handlers for the marketing pages API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::catalog::locations::County;
use crate::catalog::services::ServiceCard;
use crate::catalog::LocationEntry;
use crate::errors::AppError;
use crate::pages::{
    city_service_page, generic_service_page, location_page, resolve_city, static_paths,
    LocationPage, ServicePage,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub total: usize,
    pub paths: Vec<String>,
}

/// GET /api/v1/services
pub async fn handle_list_services(State(state): State<AppState>) -> Json<Vec<ServiceCard>> {
    Json(state.catalog.services.cards())
}

/// GET /api/v1/services/:slug
pub async fn handle_get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ServicePage>, AppError> {
    let doc = state
        .catalog
        .services
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Service '{slug}' not found")))?;
    Ok(Json(generic_service_page(doc)))
}

/// GET /api/v1/cities/:city/services/:slug
pub async fn handle_get_city_service(
    State(state): State<AppState>,
    Path((city, slug)): Path<(String, String)>,
) -> Result<Json<ServicePage>, AppError> {
    let catalog = &state.catalog;
    let location = resolve_city(catalog, &city);
    let doc = catalog.services.find_by_slug(&slug);

    match (doc, location) {
        (Some(doc), Ok(location)) => Ok(Json(city_service_page(doc, location))),
        (_, Err(display)) => Err(AppError::NotFound(format!(
            "No information for service '{slug}' in '{display}'"
        ))),
        (None, Ok(location)) => Err(AppError::NotFound(format!(
            "No information for service '{slug}' in '{}'",
            location.name
        ))),
    }
}

/// GET /api/v1/locations
pub async fn handle_list_locations(State(state): State<AppState>) -> Json<Vec<LocationEntry>> {
    Json(state.catalog.locations.entries().to_vec())
}

/// GET /api/v1/locations/:slug
pub async fn handle_get_location(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LocationPage>, AppError> {
    let location = state
        .catalog
        .locations
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Location '{slug}' not found")))?;
    Ok(Json(location_page(&state.catalog, location)))
}

/// GET /api/v1/service-areas
pub async fn handle_service_areas(State(state): State<AppState>) -> Json<Vec<County>> {
    Json(state.catalog.locations.counties().to_vec())
}

/// GET /api/v1/paths
pub async fn handle_static_paths(State(state): State<AppState>) -> Json<PathsResponse> {
    let paths = static_paths(&state.catalog);
    Json(PathsResponse {
        total: paths.len(),
        paths,
    })
}
