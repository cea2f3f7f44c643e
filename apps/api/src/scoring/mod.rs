//! Heuristic ATS scoring: keyword coverage, TF-IDF similarity and section structure.

pub mod cache;
pub mod engine;
pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod role_skills;
pub mod synonyms;
pub mod tfidf;
