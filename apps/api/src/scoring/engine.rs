//! Heuristic ATS scorer — deterministic, explainable, no model in the arithmetic.
//!
//! The model is consulted once per role (upstream, via [`RoleSkillGenerator`]) for the
//! skill list. Everything here is plain scoring arithmetic:
//!
//! ```text
//! ats = clamp(0.35 * keyword + 0.45 * semantic + 0.20 * structure, 40, 88)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::scoring::normalize::normalize_text;
use crate::scoring::role_skills::RoleSkillGenerator;
use crate::scoring::synonyms::aliases_for;
use crate::scoring::tfidf::cosine_similarity;

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

pub const SECTION_MARKERS: [&str; 4] = ["experience", "education", "skills", "projects"];

const KEYWORD_WEIGHT: f64 = 0.35;
const SEMANTIC_WEIGHT: f64 = 0.45;
const STRUCTURE_WEIGHT: f64 = 0.20;

pub const ATS_FLOOR: f64 = 40.0;
pub const ATS_CEILING: f64 = 88.0;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringRequest {
    pub resume_text: String,
    pub job_role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub ats_score: f64,
    pub keyword_match: f64,
    pub semantic_match: f64,
    pub structure_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordResult {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the role's skill list, then scores the resume against it.
pub struct AtsScorer {
    skills: RoleSkillGenerator,
}

impl AtsScorer {
    pub fn new(skills: RoleSkillGenerator) -> Self {
        Self { skills }
    }

    pub async fn score(&self, request: &ScoringRequest) -> Result<ScoreBreakdown, AppError> {
        let skills = self.skills.skills_for(&request.job_role).await?;
        let breakdown = score_resume(&request.resume_text, &skills);
        debug!(
            "ATS score for '{}': {} (keyword={}, semantic={}, structure={})",
            request.job_role,
            breakdown.ats_score,
            breakdown.keyword_match,
            breakdown.semantic_match,
            breakdown.structure_score
        );
        Ok(breakdown)
    }
}

/// Scores `resume_text` against an already-known skill list.
pub fn score_resume(resume_text: &str, skills: &[String]) -> ScoreBreakdown {
    let normalized = normalize_text(resume_text);

    let keyword = keyword_score(&normalized, skills);
    // Semantic similarity sees the raw text; the vectorizer does its own tokenizing.
    let semantic = semantic_score(resume_text, skills);
    let structure = structure_score(&normalized);

    ScoreBreakdown {
        ats_score: composite_score(keyword.score, semantic, structure),
        keyword_match: keyword.score,
        semantic_match: semantic,
        structure_score: structure,
        matched_skills: keyword.matched,
        missing_skills: keyword.missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

/// Forgiving skill match against normalized resume text. First hit wins:
/// whole phrase, then any single token of the phrase, then a registered alias.
pub fn skill_matches(skill: &str, normalized_resume: &str) -> bool {
    if normalized_resume.contains(skill) {
        return true;
    }

    if skill
        .split_whitespace()
        .any(|token| normalized_resume.contains(token))
    {
        return true;
    }

    aliases_for(skill)
        .iter()
        .any(|alias| normalized_resume.contains(alias))
}

/// Percentage of `skills` matched. Zero skills scores 0.
pub fn keyword_score(normalized_resume: &str, skills: &[String]) -> KeywordResult {
    let (matched, missing): (Vec<String>, Vec<String>) = skills
        .iter()
        .cloned()
        .partition(|skill| skill_matches(skill, normalized_resume));

    let score = if skills.is_empty() {
        0.0
    } else {
        round2(matched.len() as f64 / skills.len() as f64 * 100.0)
    };

    KeywordResult {
        score,
        matched,
        missing,
    }
}

/// TF-IDF cosine similarity between the joined skill list and the raw resume, ×100.
pub fn semantic_score(raw_resume: &str, skills: &[String]) -> f64 {
    round2(cosine_similarity(&skills.join(" "), raw_resume) * 100.0)
}

/// Share of the four section markers present anywhere in the normalized resume.
pub fn structure_score(normalized_resume: &str) -> f64 {
    let found = SECTION_MARKERS
        .iter()
        .filter(|marker| normalized_resume.contains(*marker))
        .count();
    round2(found as f64 / SECTION_MARKERS.len() as f64 * 100.0)
}

pub fn composite_score(keyword: f64, semantic: f64, structure: f64) -> f64 {
    let weighted = KEYWORD_WEIGHT * keyword + SEMANTIC_WEIGHT * semantic + STRUCTURE_WEIGHT * structure;
    round2(weighted.clamp(ATS_FLOOR, ATS_CEILING))
}

/// Rounds to two decimals from the exact binary value, ties to even.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
