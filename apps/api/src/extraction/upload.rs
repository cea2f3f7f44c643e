//! Multipart form handling shared by the upload endpoints.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;
use crate::extraction::looks_like_pdf;

/// A validated `resume` + `job_role` form submission.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
    pub job_role: String,
}

impl ResumeUpload {
    /// Reads the `resume` file part and the `job_role` text part. Unknown parts are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut resume: Option<(Option<String>, Option<String>, Bytes)> = None;
        let mut job_role: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            match field.name() {
                Some("resume") => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                    resume = Some((file_name, content_type, bytes));
                }
                Some("job_role") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Could not read job_role: {e}")))?;
                    job_role = Some(text);
                }
                _ => {}
            }
        }

        let job_role = job_role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AppError::Validation("job_role is required".to_string()))?;

        let (file_name, content_type, bytes) =
            resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("resume file is empty".to_string()));
        }

        if !looks_like_pdf(content_type.as_deref(), file_name.as_deref(), &bytes) {
            return Err(AppError::UnsupportedMedia(
                "only PDF resumes are supported".to_string(),
            ));
        }

        Ok(Self {
            file_name,
            bytes,
            job_role,
        })
    }
}
