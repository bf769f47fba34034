//! Axum route handlers for the careers portal and its admin panel.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::careers::applications::{self, NewApplication, StatusUpdate};
use crate::careers::auth::AdminAuth;
use crate::careers::jobs::{self, JobUpdate, NewJob};
use crate::careers::uploads::{store_resume, ResumeFile, ResumeUploadResponse};
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationWithJob};
use crate::models::job::{JobRow, JobWithCountRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationFilter {
    pub job_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(jobs::list_active_jobs(&state.db).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = jobs::find_job(&state.db, id)
        .await?
        .filter(|j| j.is_active)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// POST /api/v1/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Json(req): Json<NewApplication>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let job_id = req.validate()?;

    let job = jobs::find_job(&state.db, job_id)
        .await?
        .filter(|j| j.is_active)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let application = applications::create_application(&state.db, job_id, &req).await?;

    info!(
        "New application {} for '{}' from {} {} <{}>",
        application.id, job.title, application.first_name, application.last_name, application.email
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// POST /api/v1/uploads/resume
///
/// Multipart body with a single `file` part (PDF or Word, up to 5MB).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut resume = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read upload"))?;
        resume = Some(ResumeFile {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    resume.validate()?;

    let response = store_resume(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        resume,
    )
    .await?;
    Ok(Json(response))
}

/// Body-limit rejections surface as 413; anything else is a malformed request.
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File size must be less than 5MB".to_string())
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/jobs
pub async fn handle_admin_list_jobs(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<JobWithCountRow>>, AppError> {
    Ok(Json(jobs::list_jobs_with_counts(&state.db).await?))
}

/// POST /api/v1/admin/jobs
pub async fn handle_admin_create_job(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    req.validate()?;
    let job = jobs::create_job(&state.db, &req).await?;
    info!("Created job {} ('{}')", job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/v1/admin/jobs/:id
pub async fn handle_admin_update_job(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobUpdate>,
) -> Result<Json<JobRow>, AppError> {
    req.validate()?;
    let job = jobs::update_job(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    info!("Updated job {id}");
    Ok(Json(job))
}

/// DELETE /api/v1/admin/jobs/:id
pub async fn handle_admin_delete_job(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !jobs::delete_job(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    info!("Deleted job {id}");
    Ok(Json(MessageResponse {
        message: "Job deleted successfully".to_string(),
    }))
}

/// GET /api/v1/admin/applications
pub async fn handle_admin_list_applications(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Query(filter): Query<ApplicationFilter>,
) -> Result<Json<Vec<ApplicationWithJob>>, AppError> {
    let rows = applications::list_applications(&state.db, filter.job_id).await?;
    Ok(Json(rows.into_iter().map(ApplicationWithJob::from).collect()))
}

/// PUT /api/v1/admin/applications/:id
pub async fn handle_admin_update_application(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ApplicationWithJob>, AppError> {
    let status = req.parse()?;
    if !applications::update_status(&state.db, id, status).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    info!("Application {id} marked {status}");

    let row = applications::find_application(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(row.into()))
}

/// DELETE /api/v1/admin/applications/:id
pub async fn handle_admin_delete_application(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !applications::delete_application(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    info!("Deleted application {id}");
    Ok(Json(MessageResponse {
        message: "Application deleted successfully".to_string(),
    }))
}
