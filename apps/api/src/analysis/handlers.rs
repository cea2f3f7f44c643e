//! Axum route handler for the full narrative analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::{analyze_resume, interpret_response, AnalysisOutcome, AnalysisReport};
use crate::errors::AppError;
use crate::extraction::{extract_text, upload::ResumeUpload};
use crate::job_links::{job_links, JobLink};
use crate::motivation::random_quote;
use crate::state::AppState;

pub const BUSY_MESSAGE: &str = "Service is busy right now. Please retry again in a few minutes.";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalyzeResponse {
    Ok {
        report: AnalysisReport,
        job_links: Vec<JobLink>,
        motivation: &'static str,
    },
    Busy {
        message: &'static str,
        job_links: Vec<JobLink>,
        motivation: &'static str,
    },
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    info!(
        "Analyzing upload {:?} for role '{}'",
        upload.file_name, upload.job_role
    );

    let resume_text = extract_text(upload.bytes).await?;
    let raw = analyze_resume(state.llm.as_ref(), &resume_text, &upload.job_role).await;

    let links = job_links(&upload.job_role);
    let response = match interpret_response(&raw) {
        AnalysisOutcome::Report(report) => AnalyzeResponse::Ok {
            report,
            job_links: links,
            motivation: random_quote(),
        },
        AnalysisOutcome::Busy => AnalyzeResponse::Busy {
            message: BUSY_MESSAGE,
            job_links: links,
            motivation: random_quote(),
        },
        AnalysisOutcome::Malformed { raw, reason } => {
            return Err(AppError::MalformedResponse { raw, reason });
        }
    };

    Ok(Json(response))
}
