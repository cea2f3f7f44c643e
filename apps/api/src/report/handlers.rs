use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::report::{render_report_pdf, REPORT_FILE_NAME};

/// POST /api/v1/reports/pdf
///
/// Accepts an analysis report (read defensively, like model output) and returns it
/// as a downloadable PDF.
pub async fn handle_report_pdf(Json(body): Json<Value>) -> Result<Response, AppError> {
    let report = AnalysisReport::from_value(&body);

    let pdf = tokio::task::spawn_blocking(move || render_report_pdf(&report))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed rendering report: {e}")))??;

    tracing::info!("Rendered analysis report ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
