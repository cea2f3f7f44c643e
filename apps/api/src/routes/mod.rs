pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::job_links::handle_job_links;
use crate::report::handlers as report;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Upload ceiling for resume PDFs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const INDEX_HTML: &str = include_str!("../../static/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_handler))
        // Narrative analysis + presentation
        .route("/api/v1/resumes/analyze", post(analysis::handle_analyze))
        // Heuristic ATS score
        .route("/api/v1/resumes/ats-score", post(scoring::handle_score_upload))
        .route("/api/v1/ats/score", post(scoring::handle_score_text))
        // Export and links
        .route("/api/v1/reports/pdf", post(report::handle_report_pdf))
        .route("/api/v1/job-links", get(handle_job_links))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::AnalysisReport;
    use crate::config::Config;
    use crate::llm_client::testing::StubGenerator;
    use crate::llm_client::TextGenerator;
    use crate::report::render_report_pdf;
    use crate::scoring::cache::SkillCache;
    use crate::scoring::engine::AtsScorer;
    use crate::scoring::role_skills::RoleSkillGenerator;

    const BOUNDARY: &str = "resumeops-test-boundary";

    fn test_config() -> Config {
        Config {
            google_api_key: "test-key".into(),
            gemini_model: "gemini-test".into(),
            gemini_api_base: "http://localhost".into(),
            llm_timeout_secs: 5,
            skill_cache_capacity: 8,
            port: 0,
            rust_log: "debug".into(),
        }
    }

    fn app_with(llm: Arc<dyn TextGenerator>) -> Router {
        let cache = Arc::new(SkillCache::new(8));
        let scorer = Arc::new(AtsScorer::new(RoleSkillGenerator::new(llm.clone(), cache)));
        build_router(AppState {
            config: test_config(),
            llm,
            scorer,
        })
    }

    /// Answers the skill prompt with a fixed list and the analysis prompt with `analysis`.
    fn routing_stub(analysis: &'static str) -> Arc<dyn TextGenerator> {
        Arc::new(StubGenerator::new(move |prompt| {
            if prompt.contains("TOP 12 core technical skills") {
                Ok("[\"python\", \"sql\"]".to_string())
            } else {
                Ok(analysis.to_string())
            }
        }))
    }

    fn multipart_body(role: Option<&str>, file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(role) = role {
            body.extend(format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_role\"\r\n\r\n{role}\r\n"
            ).as_bytes());
        }
        if let Some((name, content_type, bytes)) = file {
            body.extend(format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            ).as_bytes());
            body.extend(bytes);
            body.extend(b"\r\n");
        }
        body.extend(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_resume_pdf() -> Vec<u8> {
        render_report_pdf(&AnalysisReport {
            strengths: vec!["Python and SQL experience on analytics projects".into()],
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(StubGenerator::replying("")));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resumeops-api");
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = app_with(Arc::new(StubGenerator::replying("")));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("ResumeOps"));
    }

    #[tokio::test]
    async fn test_score_text_endpoint() {
        let app = app_with(routing_stub("{}"));
        let response = app
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({"resume_text": "I used Python and SQL daily", "job_role": "Data Analyst"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["keyword_match"], 100.0);
        assert_eq!(body["matched_skills"], json!(["python", "sql"]));
        assert_eq!(body["missing_skills"], json!([]));
        let ats = body["ats_score"].as_f64().unwrap();
        assert!((40.0..=88.0).contains(&ats));
    }

    #[tokio::test]
    async fn test_score_text_skill_failure_is_bad_gateway() {
        let app = app_with(Arc::new(StubGenerator::failing()));
        let response = app
            .oneshot(json_request(
                "/api/v1/ats/score",
                json!({"resume_text": "anything", "job_role": "Designer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_score_upload_endpoint() {
        let app = app_with(routing_stub("{}"));
        let pdf = sample_resume_pdf();
        let body = multipart_body(
            Some("Data Analyst"),
            Some(("resume.pdf", "application/pdf", pdf.as_slice())),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/ats-score", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["matched_skills"], json!(["python", "sql"]));
    }

    #[tokio::test]
    async fn test_analyze_returns_report_links_and_quote() {
        let app = app_with(routing_stub(
            r#"{"ats_score": 58, "strengths": ["SQL"], "role_fit_level": "Medium"}"#,
        ));
        let pdf = sample_resume_pdf();
        let body = multipart_body(
            Some("Data Analyst"),
            Some(("resume.pdf", "application/pdf", pdf.as_slice())),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["report"]["ats_score"], 58);
        assert_eq!(body["report"]["weaknesses"], json!([]));
        assert_eq!(body["job_links"].as_array().unwrap().len(), 3);
        assert!(body["motivation"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_busy_when_service_down() {
        let app = app_with(Arc::new(StubGenerator::failing()));
        let pdf = sample_resume_pdf();
        let body = multipart_body(
            Some("Data Analyst"),
            Some(("resume.pdf", "application/pdf", pdf.as_slice())),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "busy");
        assert!(body.get("report").is_none());
    }

    #[tokio::test]
    async fn test_analyze_malformed_surfaces_raw_output() {
        let app = app_with(routing_stub("I'm not able to do that."));
        let pdf = sample_resume_pdf();
        let body = multipart_body(
            Some("Data Analyst"),
            Some(("resume.pdf", "application/pdf", pdf.as_slice())),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_AI_RESPONSE");
        assert_eq!(body["error"]["raw_output"], "I'm not able to do that.");
    }

    #[tokio::test]
    async fn test_upload_requires_role() {
        let app = app_with(routing_stub("{}"));
        let pdf = sample_resume_pdf();
        let body = multipart_body(None, Some(("resume.pdf", "application/pdf", pdf.as_slice())));
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let app = app_with(routing_stub("{}"));
        let body = multipart_body(
            Some("Data Analyst"),
            Some(("resume.docx", "application/msword", &b"PK\x03\x04 not a pdf"[..])),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/resumes/ats-score", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_report_pdf_download() {
        let app = app_with(Arc::new(StubGenerator::replying("")));
        let response = app
            .oneshot(json_request(
                "/api/v1/reports/pdf",
                json!({"ats_score": 61, "strengths": ["Clear bullets"], "weaknesses": "oops"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("Resume_Analysis_Report.pdf"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_job_links_endpoint() {
        let app = app_with(Arc::new(StubGenerator::replying("")));
        let response = app
            .oneshot(
                Request::get("/api/v1/job-links?role=ML%20Engineer")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body[1]["url"],
            "https://www.indeed.com/jobs?q=ML%20Engineer"
        );
    }

    #[tokio::test]
    async fn test_job_links_requires_role() {
        let app = app_with(Arc::new(StubGenerator::replying("")));
        let response = app
            .oneshot(Request::get("/api/v1/job-links").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
