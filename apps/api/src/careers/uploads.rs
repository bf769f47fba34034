//! Résumé uploads to S3 / MinIO.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub resume_url: String,
    pub resume_key: String,
    pub resume_file_name: String,
}

/// A validated file pulled out of the multipart body.
#[derive(Debug)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ResumeFile {
    pub fn validate(&self) -> Result<(), AppError> {
        if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::Validation(
                "Please upload a PDF or Word document".to_string(),
            ));
        }
        if self.data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if self.data.len() > MAX_RESUME_BYTES {
            return Err(AppError::PayloadTooLarge(
                "File size must be less than 5MB".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keeps `[A-Za-z0-9._-]`, replaces everything else with `_` and caps the length.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    // ASCII only at this point; keep the tail so the extension survives
    let capped = &trimmed[trimmed.len().saturating_sub(100)..];
    if capped.is_empty() {
        "resume".to_string()
    } else {
        capped.to_string()
    }
}

pub async fn store_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    file: ResumeFile,
) -> Result<ResumeUploadResponse, AppError> {
    let safe_name = sanitize_file_name(&file.file_name);
    let key = format!("resumes/{}/{}", Uuid::new_v4(), safe_name);
    let size = file.data.len();

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(file.data))
        .content_type(&file.content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Résumé upload failed: {e}")))?;

    info!("Uploaded résumé ({size} bytes) to s3://{bucket}/{key}");

    Ok(ResumeUploadResponse {
        resume_url: format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        resume_key: key,
        resume_file_name: file.file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, len: usize) -> ResumeFile {
        ResumeFile {
            file_name: "cv.pdf".to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from(vec![1u8; len]),
        }
    }

    #[test]
    fn test_accepts_pdf_and_word() {
        assert!(file("application/pdf", 10).validate().is_ok());
        assert!(file("application/msword", 10).validate().is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(matches!(
            file("image/png", 10).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_and_empty() {
        assert!(matches!(
            file("application/pdf", MAX_RESUME_BYTES + 1).validate(),
            Err(AppError::PayloadTooLarge(_))
        ));
        assert!(file("application/pdf", 0).validate().is_err());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My Resume (2024).pdf"), "My_Resume__2024_.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\pat\\cv.docx"), "cv.docx");
        assert_eq!(sanitize_file_name(".hidden.pdf"), "hidden.pdf");
        assert_eq!(sanitize_file_name(""), "resume");
    }
}
