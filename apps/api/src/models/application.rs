use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::JobSummary;

/// Stored in a `TEXT` column guarded by a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "REVIEWED" => Ok(ApplicationStatus::Reviewed),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("Invalid status '{other}'")),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub availability_type: Option<String>,
    pub monday_available: bool,
    pub tuesday_available: bool,
    pub wednesday_available: bool,
    pub thursday_available: bool,
    pub friday_available: bool,
    pub saturday_available: bool,
    pub sunday_available: bool,
    pub has_reliable_transportation: bool,
    pub can_travel: bool,
    pub can_relocate: bool,
    pub is_at_least_18: bool,
    pub can_provide_work_auth: bool,
    pub can_perform_job_functions: bool,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub resume_file_name: Option<String>,
    pub digital_signature: Option<String>,
    pub agreement_accepted: bool,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with its job's title, location and department.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithJobRow {
    #[sqlx(flatten)]
    pub application: ApplicationRow,
    pub job_title: String,
    pub job_location: String,
    pub job_department: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job: JobSummary,
}

impl From<ApplicationWithJobRow> for ApplicationWithJob {
    fn from(row: ApplicationWithJobRow) -> Self {
        Self {
            job: JobSummary {
                id: row.application.job_id,
                title: row.job_title,
                location: row.job_location,
                department: row.job_department,
            },
            application: row.application,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_and_lowercase() {
        assert!("ARCHIVED".parse::<ApplicationStatus>().is_err());
        assert!("pending".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_row_status_is_typed() {
        let row: ApplicationRow = serde_json::from_value(serde_json::json!({
            "id": "6f1c1c3e-6a8e-4b8e-9d0a-2f0e0b6c9a11",
            "job_id": "0b5e8a7c-1d2f-4e3a-9b8c-7d6e5f4a3b2c",
            "first_name": "Dana",
            "last_name": "Reyes",
            "email": "dana@example.com",
            "phone": "609-555-0100",
            "date_of_birth": null,
            "street_address": null,
            "city": null,
            "state": null,
            "zip_code": null,
            "availability_type": null,
            "monday_available": true,
            "tuesday_available": false,
            "wednesday_available": false,
            "thursday_available": false,
            "friday_available": false,
            "saturday_available": false,
            "sunday_available": false,
            "has_reliable_transportation": true,
            "can_travel": false,
            "can_relocate": false,
            "is_at_least_18": true,
            "can_provide_work_auth": true,
            "can_perform_job_functions": true,
            "cover_letter": null,
            "resume_url": null,
            "resume_file_name": null,
            "digital_signature": "Dana Reyes",
            "agreement_accepted": true,
            "status": "REVIEWED",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(row.status, ApplicationStatus::Reviewed);
        assert_eq!(serde_json::to_value(&row).unwrap()["status"], "REVIEWED");
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Reviewed).unwrap(),
            "\"REVIEWED\""
        );
    }
}
