use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub job_type: String,
    pub department: String,
    pub excerpt: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin listing row: a job plus how many applications it has received.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobWithCountRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub application_count: i64,
}

/// The slice of a job shown next to an application.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub department: String,
}
