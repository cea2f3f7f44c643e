/// Canonical skill phrase → short aliases recruiters and candidates commonly write instead.
///
/// Only consulted as the last matching step. Static; never mutated at runtime.
const SYNONYM_TABLE: &[(&str, &[&str])] = &[
    ("machine learning", &["ml"]),
    ("deep learning", &["dl"]),
    ("natural language processing", &["nlp"]),
    ("computer vision", &["cv"]),
    ("artificial intelligence", &["ai"]),
    ("data structures", &["dsa"]),
    ("object oriented programming", &["oop"]),
    ("continuous integration", &["ci"]),
    ("continuous deployment", &["cd"]),
];

/// Returns the aliases registered for `skill`, or an empty slice.
pub fn aliases_for(skill: &str) -> &'static [&'static str] {
    SYNONYM_TABLE
        .iter()
        .find(|(canonical, _)| *canonical == skill)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_skill_has_alias() {
        assert_eq!(aliases_for("natural language processing"), &["nlp"]);
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        assert!(aliases_for("Machine Learning").is_empty());
        assert!(aliases_for("machine").is_empty());
    }

    #[test]
    fn test_every_entry_is_lowercase() {
        for (canonical, aliases) in SYNONYM_TABLE {
            assert_eq!(*canonical, canonical.to_lowercase());
            assert!(aliases.iter().all(|a| *a == a.to_lowercase()));
        }
    }
}
