//! Lifecycle stages present in the building dataset.

/// One known lifecycle stage and the words that map to it in query text.
pub struct StageInfo {
    /// Canonical stage name as it appears in the dataset.
    pub name: &'static str,
    /// Lower-case words that select this stage in free-text queries.
    pub synonyms: &'static [&'static str],
}

/// Stage vocabulary table.
pub const STAGE_TABLE: &[StageInfo] = &[
    StageInfo {
        name: "CONSTRUCTED",
        synonyms: &["constructed", "built", "completed", "existing", "finished"],
    },
    StageInfo {
        name: "NEW",
        synonyms: &["new", "recent"],
    },
    StageInfo {
        name: "PROPOSED",
        synonyms: &["proposed", "planned", "upcoming"],
    },
];

/// Canonical stage name for a query word, if the word is a known synonym.
pub fn stage_for_synonym(word: &str) -> Option<&'static str> {
    let lowered = word.to_ascii_lowercase();
    STAGE_TABLE
        .iter()
        .find(|stage| stage.synonyms.contains(&lowered.as_str()))
        .map(|stage| stage.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_resolve_to_canonical_names() {
        assert_eq!(stage_for_synonym("built"), Some("CONSTRUCTED"));
        assert_eq!(stage_for_synonym("NEW"), Some("NEW"));
        assert_eq!(stage_for_synonym("Planned"), Some("PROPOSED"));
    }

    #[test]
    fn unknown_words_resolve_to_none() {
        assert_eq!(stage_for_synonym("tall"), None);
        assert_eq!(stage_for_synonym(""), None);
    }
}
