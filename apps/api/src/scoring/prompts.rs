// Prompt constants for the role → skill generator.

/// Role skill prompt. Replace `{job_role}` before sending.
pub const ROLE_SKILLS_PROMPT_TEMPLATE: &str = r#"You are an ATS engine.

Generate a JSON list of the TOP 12 core technical skills
required for the job role: "{job_role}"

Rules:
- skills only
- industry standard terminology
- lowercase
- no explanations
- no duplicates

Output format:
["skill1","skill2",...]"#;

pub fn role_skills_prompt(job_role: &str) -> String {
    ROLE_SKILLS_PROMPT_TEMPLATE.replace("{job_role}", job_role)
}
