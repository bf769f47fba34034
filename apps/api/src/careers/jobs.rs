//! Job posting queries and request validation.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRow, JobWithCountRow};

#[derive(Debug, Deserialize)]
pub struct NewJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub excerpt: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("location", &self.location),
            ("job_type", &self.job_type),
            ("department", &self.department),
            ("excerpt", &self.excerpt),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub department: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
}

impl JobUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("location", &self.location),
            ("job_type", &self.job_type),
            ("department", &self.department),
            ("excerpt", &self.excerpt),
        ];
        for (name, value) in required {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::Validation(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }
}

/// Active postings, newest first.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE is_active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

/// Every posting (active or not) with its application count, newest first.
pub async fn list_jobs_with_counts(pool: &PgPool) -> Result<Vec<JobWithCountRow>, sqlx::Error> {
    sqlx::query_as::<_, JobWithCountRow>(
        r#"
        SELECT j.*, COUNT(a.id) AS application_count
        FROM jobs j
        LEFT JOIN job_applications a ON a.job_id = j.id
        GROUP BY j.id
        ORDER BY j.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (title, location, job_type, department, excerpt,
             description, requirements, benefits, salary, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(job.title.trim())
    .bind(job.location.trim())
    .bind(job.job_type.trim())
    .bind(job.department.trim())
    .bind(job.excerpt.trim())
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(&job.benefits)
    .bind(&job.salary)
    .bind(job.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await
}

pub async fn update_job(
    pool: &PgPool,
    id: Uuid,
    update: &JobUpdate,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            title        = COALESCE($2, title),
            location     = COALESCE($3, location),
            job_type     = COALESCE($4, job_type),
            department   = COALESCE($5, department),
            excerpt      = COALESCE($6, excerpt),
            description  = COALESCE($7, description),
            requirements = COALESCE($8, requirements),
            benefits     = COALESCE($9, benefits),
            salary       = COALESCE($10, salary),
            is_active    = COALESCE($11, is_active),
            updated_at   = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.title)
    .bind(&update.location)
    .bind(&update.job_type)
    .bind(&update.department)
    .bind(&update.excerpt)
    .bind(&update.description)
    .bind(&update.requirements)
    .bind(&update.benefits)
    .bind(&update.salary)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was deleted. Applications cascade.
pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
