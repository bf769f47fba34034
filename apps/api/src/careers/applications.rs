//! Job application intake and admin review queries.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus, ApplicationWithJobRow};

/// Public application form payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewApplication {
    pub job_id: Option<Uuid>,
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
}

impl NewApplication {
    /// Checks required fields and returns the target job id.
    pub fn validate(&self) -> Result<Uuid, AppError> {
        let job_id = self
            .job_id
            .ok_or_else(|| AppError::Validation("job_id is required".to_string()))?;

        for (name, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{name} is required")));
            }
        }

        if !self.email.contains('@') {
            return Err(AppError::Validation("email is not a valid address".to_string()));
        }
        if !self.agreement_accepted {
            return Err(AppError::Validation(
                "The application agreement must be accepted".to_string(),
            ));
        }
        Ok(job_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

impl StatusUpdate {
    pub fn parse(&self) -> Result<ApplicationStatus, AppError> {
        self.status
            .parse()
            .map_err(|_| AppError::Validation("Invalid status".to_string()))
    }
}

pub async fn create_application(
    pool: &PgPool,
    job_id: Uuid,
    app: &NewApplication,
) -> Result<ApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO job_applications
            (job_id, first_name, last_name, email, phone, date_of_birth,
             street_address, city, state, zip_code, availability_type,
             monday_available, tuesday_available, wednesday_available, thursday_available,
             friday_available, saturday_available, sunday_available,
             has_reliable_transportation, can_travel, can_relocate, is_at_least_18,
             can_provide_work_auth, can_perform_job_functions,
             cover_letter, resume_url, resume_file_name, digital_signature,
             agreement_accepted, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30)
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(app.first_name.trim())
    .bind(app.last_name.trim())
    .bind(app.email.trim())
    .bind(app.phone.trim())
    .bind(&app.date_of_birth)
    .bind(&app.street_address)
    .bind(&app.city)
    .bind(&app.state)
    .bind(&app.zip_code)
    .bind(&app.availability_type)
    .bind(app.monday_available)
    .bind(app.tuesday_available)
    .bind(app.wednesday_available)
    .bind(app.thursday_available)
    .bind(app.friday_available)
    .bind(app.saturday_available)
    .bind(app.sunday_available)
    .bind(app.has_reliable_transportation)
    .bind(app.can_travel)
    .bind(app.can_relocate)
    .bind(app.is_at_least_18)
    .bind(app.can_provide_work_auth)
    .bind(app.can_perform_job_functions)
    .bind(&app.cover_letter)
    .bind(&app.resume_url)
    .bind(&app.resume_file_name)
    .bind(&app.digital_signature)
    .bind(app.agreement_accepted)
    .bind(ApplicationStatus::Pending)
    .fetch_one(pool)
    .await
}

const APPLICATION_WITH_JOB_SELECT: &str = r#"
    SELECT a.*,
           j.title AS job_title,
           j.location AS job_location,
           j.department AS job_department
    FROM job_applications a
    JOIN jobs j ON j.id = a.job_id
"#;

/// All applications, newest first, optionally restricted to one job.
pub async fn list_applications(
    pool: &PgPool,
    job_id: Option<Uuid>,
) -> Result<Vec<ApplicationWithJobRow>, sqlx::Error> {
    let sql = format!(
        "{APPLICATION_WITH_JOB_SELECT} WHERE ($1::uuid IS NULL OR a.job_id = $1) ORDER BY a.created_at DESC"
    );
    sqlx::query_as::<_, ApplicationWithJobRow>(&sql)
        .bind(job_id)
        .fetch_all(pool)
        .await
}

pub async fn find_application(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ApplicationWithJobRow>, sqlx::Error> {
    let sql = format!("{APPLICATION_WITH_JOB_SELECT} WHERE a.id = $1");
    sqlx::query_as::<_, ApplicationWithJobRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns whether the application existed.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE job_applications SET status = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(status)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_application(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> NewApplication {
        NewApplication {
            job_id: Some(Uuid::new_v4()),
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: "609-555-0100".to_string(),
            agreement_accepted: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_application_validates() {
        let app = complete();
        assert_eq!(app.validate().unwrap(), app.job_id.unwrap());
    }

    #[test]
    fn test_missing_job_id() {
        let app = NewApplication {
            job_id: None,
            ..complete()
        };
        assert!(matches!(app.validate(), Err(AppError::Validation(m)) if m == "job_id is required"));
    }

    #[test]
    fn test_blank_phone_reported_by_name() {
        let app = NewApplication {
            phone: "   ".to_string(),
            ..complete()
        };
        assert!(matches!(app.validate(), Err(AppError::Validation(m)) if m == "phone is required"));
    }

    #[test]
    fn test_agreement_required() {
        let app = NewApplication {
            agreement_accepted: false,
            ..complete()
        };
        assert!(app.validate().is_err());
    }

    #[test]
    fn test_minimal_json_payload_defaults_flags() {
        let app: NewApplication = serde_json::from_value(serde_json::json!({
            "job_id": "6f1c1c3e-6a8e-4b8e-9d0a-2f0e0b6c9a11",
            "first_name": "Dana",
            "last_name": "Reyes",
            "email": "dana@example.com",
            "phone": "609-555-0100",
            "agreement_accepted": true
        }))
        .unwrap();
        assert!(app.validate().is_ok());
        assert!(!app.monday_available);
        assert!(app.cover_letter.is_none());
    }

    #[test]
    fn test_status_update_parsing() {
        let ok = StatusUpdate {
            status: "ACCEPTED".to_string(),
        };
        assert_eq!(ok.parse().unwrap(), ApplicationStatus::Accepted);

        let bad = StatusUpdate {
            status: "HIRED".to_string(),
        };
        assert!(matches!(bad.parse(), Err(AppError::Validation(m)) if m == "Invalid status"));
    }
}
