//! Role → skill list, generated once per role by the model and memoized in a
//! [`SkillCache`]. Failures propagate and are never cached.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::llm_client::{extract_delimited, strip_json_fences, LlmError, TextGenerator};
use crate::scoring::cache::SkillCache;
use crate::scoring::prompts::role_skills_prompt;

pub const MAX_SKILLS: usize = 12;

pub struct RoleSkillGenerator {
    llm: Arc<dyn TextGenerator>,
    cache: Arc<SkillCache>,
}

impl RoleSkillGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, cache: Arc<SkillCache>) -> Self {
        Self { llm, cache }
    }

    pub async fn skills_for(&self, job_role: &str) -> Result<Vec<String>, LlmError> {
        if let Some(skills) = self.cache.get(job_role) {
            debug!("Skill cache hit for role '{job_role}'");
            return Ok(skills);
        }

        let raw = self.llm.generate(&role_skills_prompt(job_role)).await?;
        let skills = parse_skill_list(&raw)?;
        info!("Generated {} skills for role '{job_role}'", skills.len());

        self.cache.insert(job_role, skills.clone());
        debug!("Skill cache holds {} roles", self.cache.len());
        Ok(skills)
    }
}

/// Parses the outermost JSON string array in `raw` into a clean skill list:
/// trimmed, lowercased, blanks dropped, deduplicated in first-seen order, capped at
/// [`MAX_SKILLS`].
pub fn parse_skill_list(raw: &str) -> Result<Vec<String>, LlmError> {
    let body = extract_delimited(strip_json_fences(raw), '[', ']').ok_or(
        LlmError::MissingStructure {
            expected: "JSON array",
        },
    )?;
    let items: Vec<String> = serde_json::from_str(body)?;

    let mut seen = HashSet::new();
    let skills = items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .take(MAX_SKILLS)
        .collect();

    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;

    #[test]
    fn test_parse_cleans_and_dedupes() {
        let raw = "Here you go:\n[\" Python \", \"SQL\", \"python\", \"Docker\"]";
        assert_eq!(parse_skill_list(raw).unwrap(), vec!["python", "sql", "docker"]);
    }

    #[test]
    fn test_parse_drops_blank_items() {
        let raw = "[\"\", \"  \", \"Kafka\", \"\"]";
        assert_eq!(parse_skill_list(raw).unwrap(), vec!["kafka"]);
    }

    #[test]
    fn test_parse_caps_at_twelve() {
        let items: Vec<String> = (0..20).map(|i| format!("\"skill{i}\"")).collect();
        let raw = format!("[{}]", items.join(","));
        let skills = parse_skill_list(&raw).unwrap();
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills[0], "skill0");
        assert_eq!(skills[11], "skill11");
    }

    #[test]
    fn test_parse_handles_code_fences() {
        let raw = "```json\n[\"rust\", \"tokio\"]\n```";
        assert_eq!(parse_skill_list(raw).unwrap(), vec!["rust", "tokio"]);
    }

    #[test]
    fn test_parse_without_array_fails() {
        let err = parse_skill_list("I cannot help with that.").unwrap_err();
        assert!(matches!(err, LlmError::MissingStructure { .. }));
    }

    #[test]
    fn test_parse_with_non_string_items_fails() {
        let err = parse_skill_list("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_second_request_for_role_uses_cache() {
        let stub = Arc::new(StubGenerator::replying("[\"python\", \"sql\"]"));
        let generator = RoleSkillGenerator::new(stub.clone(), Arc::new(SkillCache::new(8)));

        let first = generator.skills_for("Data Analyst").await.unwrap();
        let second = generator.skills_for("Data Analyst").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_names_the_role() {
        let stub = Arc::new(StubGenerator::new(|prompt| {
            assert!(prompt.contains("\"Site Reliability Engineer\""));
            Ok("[\"kubernetes\"]".to_string())
        }));
        let generator = RoleSkillGenerator::new(stub, Arc::new(SkillCache::new(8)));
        let skills = generator.skills_for("Site Reliability Engineer").await.unwrap();
        assert_eq!(skills, vec!["kubernetes"]);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let stub = Arc::new(StubGenerator::failing());
        let cache = Arc::new(SkillCache::new(8));
        let generator = RoleSkillGenerator::new(stub.clone(), cache.clone());

        assert!(generator.skills_for("Designer").await.is_err());
        assert!(generator.skills_for("Designer").await.is_err());
        assert_eq!(stub.calls(), 2);
        assert_eq!(cache.len(), 0);
    }
}
