//! Axum route handlers for the heuristic ATS score.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, upload::ResumeUpload};
use crate::scoring::engine::{ScoreBreakdown, ScoringRequest};
use crate::state::AppState;

/// POST /api/v1/ats/score
pub async fn handle_score_text(
    State(state): State<AppState>,
    Json(req): Json<ScoringRequest>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    if req.job_role.trim().is_empty() {
        return Err(AppError::Validation("job_role is required".to_string()));
    }
    let breakdown = state.scorer.score(&req).await?;
    Ok(Json(breakdown))
}

/// POST /api/v1/resumes/ats-score
pub async fn handle_score_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreBreakdown>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    info!(
        "Scoring upload {:?} for role '{}'",
        upload.file_name, upload.job_role
    );

    let resume_text = extract_text(upload.bytes).await?;
    let breakdown = state
        .scorer
        .score(&ScoringRequest {
            resume_text,
            job_role: upload.job_role,
        })
        .await?;

    Ok(Json(breakdown))
}
