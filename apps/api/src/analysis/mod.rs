//! Narrative analysis — the model's qualitative read of a resume for a role.
//!
//! Two independent failure kinds reach the caller:
//! - **busy**: the model could not be reached; `analyze_resume` substitutes a sentinel
//!   payload instead of an error, and the UI asks the user to retry.
//! - **malformed**: the model answered with something that is not a JSON object; the
//!   raw text is surfaced as a debug view.
//!
//! Anything in between is parsed defensively: absent or mistyped list fields become
//! empty lists rather than errors.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};
use tracing::{info, warn};

use crate::analysis::prompts::resume_analysis_prompt;
use crate::llm_client::{extract_delimited, TextGenerator};

pub const BUSY_STATUS: &str = "busy";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleFitLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RoleFitLevel {
    /// Lenient parse; anything unrecognized is `Low`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => RoleFitLevel::High,
            "medium" => RoleFitLevel::Medium,
            _ => RoleFitLevel::Low,
        }
    }
}

/// The model's self-reported point split. Numbers are kept as JSON numbers so an
/// integer stays an integer when the report is echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiScoreBreakdown {
    pub skills_match: Number,
    pub experience_relevance: Number,
    pub keyword_coverage: Number,
    pub resume_structure: Number,
    pub impact_achievements: Number,
}

impl Default for AiScoreBreakdown {
    fn default() -> Self {
        Self {
            skills_match: Number::from(0),
            experience_relevance: Number::from(0),
            keyword_coverage: Number::from(0),
            resume_structure: Number::from(0),
            impact_achievements: Number::from(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_status: Option<String>,
    pub ats_score: Number,
    pub score_breakdown: AiScoreBreakdown,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improved_bullets: Vec<String>,
    pub suggestions: Vec<String>,
    pub skill_roadmap: Vec<String>,
    pub project_feedback: Vec<String>,
    pub recommended_projects: Vec<String>,
    pub role_fit_level: RoleFitLevel,
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            service_status: None,
            ats_score: Number::from(0),
            score_breakdown: AiScoreBreakdown::default(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            missing_skills: Vec::new(),
            improved_bullets: Vec::new(),
            suggestions: Vec::new(),
            skill_roadmap: Vec::new(),
            project_feedback: Vec::new(),
            recommended_projects: Vec::new(),
            role_fit_level: RoleFitLevel::Low,
        }
    }
}

impl AnalysisReport {
    /// Builds a report from any JSON value without failing. Missing or mistyped fields
    /// fall back to zero, empty lists, or `Low`; non-string list items are dropped.
    pub fn from_value(value: &Value) -> Self {
        let breakdown = value.get("score_breakdown");
        let breakdown_number = |key: &str| {
            breakdown
                .map(|b| number(b, key))
                .unwrap_or_else(|| Number::from(0))
        };

        Self {
            service_status: value
                .get("service_status")
                .and_then(Value::as_str)
                .map(str::to_string),
            ats_score: number(value, "ats_score"),
            score_breakdown: AiScoreBreakdown {
                skills_match: breakdown_number("skills_match"),
                experience_relevance: breakdown_number("experience_relevance"),
                keyword_coverage: breakdown_number("keyword_coverage"),
                resume_structure: breakdown_number("resume_structure"),
                impact_achievements: breakdown_number("impact_achievements"),
            },
            strengths: string_list(value, "strengths"),
            weaknesses: string_list(value, "weaknesses"),
            missing_skills: string_list(value, "missing_skills"),
            improved_bullets: string_list(value, "improved_bullets"),
            suggestions: string_list(value, "suggestions"),
            skill_roadmap: string_list(value, "skill_roadmap"),
            project_feedback: string_list(value, "project_feedback"),
            recommended_projects: string_list(value, "recommended_projects"),
            role_fit_level: value
                .get("role_fit_level")
                .and_then(Value::as_str)
                .map(RoleFitLevel::parse)
                .unwrap_or_default(),
        }
    }
}

fn number(value: &Value, key: &str) -> Number {
    match value.get(key) {
        Some(Value::Number(n)) => n.clone(),
        _ => Number::from(0),
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Result of reading the analyzer's raw output.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    Busy,
    Malformed { raw: String, reason: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Payload substituted for the model's answer when the service is unavailable.
pub fn busy_sentinel() -> Value {
    json!({
        "service_status": BUSY_STATUS,
        "ats_score": 0,
        "score_breakdown": {
            "skills_match": 0,
            "experience_relevance": 0,
            "keyword_coverage": 0,
            "resume_structure": 0,
            "impact_achievements": 0
        },
        "strengths": [],
        "weaknesses": [],
        "missing_skills": [],
        "improved_bullets": [],
        "suggestions": [],
        "skill_roadmap": [],
        "project_feedback": [],
        "recommended_projects": [],
        "role_fit_level": "Low"
    })
}

/// Asks the model for a strict-ATS analysis and returns its raw text. Never fails:
/// a service error becomes the busy sentinel.
pub async fn analyze_resume(llm: &dyn TextGenerator, resume_text: &str, job_role: &str) -> String {
    let prompt = resume_analysis_prompt(resume_text, job_role);
    match llm.generate(&prompt).await {
        Ok(raw) => {
            info!("Narrative analysis received for role '{job_role}'");
            raw
        }
        Err(e) => {
            warn!("Narrative analysis unavailable, returning busy sentinel: {e}");
            busy_sentinel().to_string()
        }
    }
}

/// Classifies the analyzer's raw text as a report, the busy sentinel, or malformed.
pub fn interpret_response(raw: &str) -> AnalysisOutcome {
    let malformed = |reason: String| AnalysisOutcome::Malformed {
        raw: raw.to_string(),
        reason,
    };

    let Some(body) = extract_delimited(raw, '{', '}') else {
        return malformed("no JSON object found in model output".to_string());
    };

    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return malformed(e.to_string()),
    };

    if !value.is_object() {
        return malformed("model output is not a JSON object".to_string());
    }

    if value.get("service_status").and_then(Value::as_str) == Some(BUSY_STATUS) {
        return AnalysisOutcome::Busy;
    }

    AnalysisOutcome::Report(AnalysisReport::from_value(&value))
}
