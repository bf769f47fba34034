// Careers portal: job listings, applications, résumé uploads and the admin back office.
// Persistence is Postgres (sqlx); résumés go to S3.

pub mod applications;
pub mod auth;
pub mod handlers;
pub mod jobs;
pub mod uploads;
