//! Closed skill vocabulary and the matcher over it

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::BTreeSet;

/// Bump whenever [`SKILL_TAXONOMY`] changes; extracted skill sets are only
/// comparable within one version.
pub const TAXONOMY_VERSION: u32 = 1;

/// Every skill the extractor can ever report, lower-case.
pub const SKILL_TAXONOMY: &[&str] = &[
    "python", "java", "javascript", "typescript", "html", "css",
    "react", "angular", "vue", "node", "express", "django", "flask",
    "sql", "mysql", "postgresql", "mongodb", "aws", "azure", "gcp",
    "docker", "kubernetes", "machine learning", "data analysis",
    "tensorflow", "pytorch", "pandas", "numpy", "git", "linux",
    "c++", "c#", "php", "ruby", "swift", "kotlin", "go", "rust",
    "data science", "ai", "artificial intelligence", "deep learning",
    "big data", "hadoop", "spark", "tableau", "power bi", "excel",
];

/// Case-insensitive lookup of taxonomy entries in free text
pub struct SkillMatcher {
    matcher: AhoCorasick,
}

impl SkillMatcher {
    pub fn new() -> Self {
        let matcher = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(SKILL_TAXONOMY)
            .expect("Invalid skill taxonomy");

        Self { matcher }
    }

    /// Taxonomy entries occurring in `text` with no word character directly
    /// before or after them (`java` does not fire inside `javascript`).
    pub fn find_whole_words(&self, text: &str) -> BTreeSet<&'static str> {
        self.matcher
            .find_overlapping_iter(text)
            .filter(|m| is_word_bounded(text, m.start(), m.end()))
            .map(|m| SKILL_TAXONOMY[m.pattern().as_usize()])
            .collect()
    }

    /// Taxonomy entries occurring anywhere in `text`, inside words included
    /// (`golang` yields `go`). Used on the captured skills section only.
    pub fn find_substrings(&self, text: &str) -> BTreeSet<&'static str> {
        self.matcher
            .find_overlapping_iter(text)
            .map(|m| SKILL_TAXONOMY[m.pattern().as_usize()])
            .collect()
    }

    /// Taxonomy entry equal to `word`, ignoring case
    pub fn lookup(&self, word: &str) -> Option<&'static str> {
        SKILL_TAXONOMY
            .iter()
            .copied()
            .find(|entry| entry.eq_ignore_ascii_case(word))
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_is_pinned() {
        assert_eq!(TAXONOMY_VERSION, 1);
        assert_eq!(SKILL_TAXONOMY.len(), 48);
        assert!(SKILL_TAXONOMY.contains(&"sql"));
        assert!(SKILL_TAXONOMY.contains(&"machine learning"));
        let unique: BTreeSet<_> = SKILL_TAXONOMY.iter().collect();
        assert_eq!(unique.len(), SKILL_TAXONOMY.len());
    }

    #[test]
    fn test_whole_word_matching() {
        let matcher = SkillMatcher::new();

        let found = matcher.find_whole_words("Senior JavaScript developer, some Go and SQL");

        assert!(found.contains("javascript"));
        assert!(found.contains("go"));
        assert!(found.contains("sql"));
        assert!(!found.contains("java"));
    }

    #[test]
    fn test_multi_word_and_symbol_entries() {
        let matcher = SkillMatcher::new();

        let found = matcher.find_whole_words("Machine Learning with C++ and Power BI");

        assert!(found.contains("machine learning"));
        assert!(found.contains("c++"));
        assert!(found.contains("power bi"));
    }

    #[test]
    fn test_substrings_inside_words_are_ignored() {
        let matcher = SkillMatcher::new();

        let found = matcher.find_whole_words("Maintained Google gateways");

        assert!(found.is_empty());
    }

    #[test]
    fn test_substring_scan_finds_embedded_entries() {
        let matcher = SkillMatcher::new();

        let found = matcher.find_substrings("Golang, NodeJS, MongoDB");

        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["go", "mongodb", "node"]);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let matcher = SkillMatcher::new();
        assert_eq!(matcher.lookup("Python"), Some("python"));
        assert_eq!(matcher.lookup("Cobol"), None);
    }
}
