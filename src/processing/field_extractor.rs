//! Rule-based extraction of candidate fields from resume text

use crate::config::ExtractionConfig;
use crate::processing::candidate::{CandidateRecord, UNKNOWN_NAME};
use crate::processing::patterns::{first_match, FieldPattern};
use crate::processing::sections::{SectionExtractor, SectionKind};
use crate::processing::taxonomy::SkillMatcher;
use crate::processing::text_processor::{title_case, truncate_with_marker, TextProcessor};
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;

pub struct FieldExtractor {
    processor: TextProcessor,
    name_patterns: Vec<FieldPattern>,
    email_patterns: Vec<FieldPattern>,
    phone_patterns: Vec<FieldPattern>,
    capitalized_word: Regex,
    skills: SkillMatcher,
    sections: SectionExtractor,
    limits: ExtractionConfig,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl FieldExtractor {
    pub fn new(limits: ExtractionConfig) -> Self {
        let name_patterns = vec![
            FieldPattern::new("leading_name", r"^([A-Z][a-z]+ [A-Z][a-z]+)", 1),
            FieldPattern::new("any_name", r"\b([A-Z][a-z]+ [A-Z][a-z]+)\b", 1),
            FieldPattern::new("labeled_name", r"(?i:name)[:\s]*([A-Z][a-z]+ [A-Z][a-z]+)", 1),
        ];

        let email_patterns = vec![FieldPattern::new(
            "email",
            r"\b([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})\b",
            1,
        )];

        let phone_patterns = vec![
            // optional country code; area code parentheses only when closed
            FieldPattern::new(
                "nanp_phone",
                r"(?:^|[^\w+(])((?:\+\d{1,2}\s?)?(?:\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4})\b",
                1,
            ),
            FieldPattern::new("bare_phone", r"\b(\d{3}[-.\s]?\d{3}[-.\s]?\d{4})\b", 1),
        ];

        let capitalized_word = Regex::new(r"\b[A-Z][a-z]+\b").expect("Invalid capitalized word regex");

        Self {
            processor: TextProcessor::new(),
            name_patterns,
            email_patterns,
            phone_patterns,
            capitalized_word,
            skills: SkillMatcher::new(),
            sections: SectionExtractor::new(),
            limits,
        }
    }

    /// Build a record from extracted text. Individual fields that cannot be
    /// found degrade to their empty or sentinel value.
    pub fn extract_record(&self, text: &str, source_file: &str) -> CandidateRecord {
        let normalized = self.processor.normalize(text);
        let cleaned = self.processor.light_clean(text);

        let name = or_miss("name", self.extract_name(&normalized), UNKNOWN_NAME);
        let email = or_miss("email", self.extract_email(&normalized), "");
        let phone = or_miss("phone", self.extract_phone(&normalized), "");
        let experience = or_miss(
            "experience",
            self.extract_snippet(&cleaned, SectionKind::Experience),
            "",
        );
        let education = or_miss(
            "education",
            self.extract_snippet(&cleaned, SectionKind::Education),
            "",
        );

        let skills = self.extract_skills(&normalized, &cleaned);
        if skills.is_empty() {
            debug!("No taxonomy skills found in {}", source_file);
        }

        CandidateRecord {
            name,
            email,
            phone,
            skills,
            experience,
            education,
            raw_text_preview: truncate_with_marker(&normalized, self.limits.preview_max_chars),
            source_file: source_file.to_string(),
            text_length: text.chars().count(),
        }
    }

    pub fn extract_name(&self, normalized: &str) -> Option<String> {
        first_match(&self.name_patterns, normalized).map(|(rule, name)| {
            debug!("Name matched by {}", rule.name);
            name
        })
    }

    pub fn extract_email(&self, normalized: &str) -> Option<String> {
        first_match(&self.email_patterns, normalized).map(|(_, email)| email)
    }

    pub fn extract_phone(&self, normalized: &str) -> Option<String> {
        first_match(&self.phone_patterns, normalized).map(|(rule, phone)| {
            debug!("Phone matched by {}", rule.name);
            phone
        })
    }

    /// Taxonomy skills mentioned as whole words anywhere in the text, as any
    /// substring of the skills section, or as a capitalized word; sorted and
    /// title-cased.
    pub fn extract_skills(&self, normalized: &str, cleaned: &str) -> Vec<String> {
        let mut found: BTreeSet<&'static str> = self.skills.find_whole_words(normalized);

        if let Some(section) = self.sections.extract(cleaned, SectionKind::Skills) {
            found.extend(self.skills.find_substrings(&section));
        }

        found.extend(
            self.capitalized_word
                .find_iter(cleaned)
                .filter_map(|word| self.skills.lookup(word.as_str())),
        );

        found
            .into_iter()
            .map(title_case)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Section body truncated to the configured snippet length
    pub fn extract_snippet(&self, cleaned: &str, kind: SectionKind) -> Option<String> {
        self.sections
            .extract(cleaned, kind)
            .map(|section| truncate_with_marker(&section, self.limits.snippet_max_chars))
    }

    pub fn processor(&self) -> &TextProcessor {
        &self.processor
    }
}

fn or_miss(field: &str, value: Option<String>, fallback: &str) -> String {
    value.unwrap_or_else(|| {
        debug!("No {} found; using {:?}", field, fallback);
        fallback.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
    John Doe

    Data Scientist | john.doe@example.com | (123) 456-7890

    SKILLS: Python, Machine Learning, SQL

    EXPERIENCE: Data Scientist at ABC Corp (2020-Present)

    EDUCATION: BSc Computer Science, XYZ University
    ";

    #[test]
    fn test_full_record_from_sample() {
        let extractor = FieldExtractor::default();

        let record = extractor.extract_record(SAMPLE, "sample.txt");

        assert_eq!(record.name, "John Doe");
        assert_eq!(record.email, "john.doe@example.com");
        assert_eq!(record.phone, "(123) 456-7890");
        assert_eq!(record.skills, vec!["Machine Learning", "Python", "Sql"]);
        assert_eq!(record.experience, "Data Scientist at ABC Corp (2020-Present)");
        assert_eq!(record.education, "BSc Computer Science, XYZ University");
        assert_eq!(record.source_file, "sample.txt");
        assert_eq!(record.text_length, SAMPLE.chars().count());
    }

    #[test]
    fn test_name_at_start_of_text() {
        let extractor = FieldExtractor::default();
        let normalized = extractor.processor().normalize("Jane Smith\nSoftware Engineer");

        assert_eq!(extractor.extract_name(&normalized).as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_name_is_unknown_without_capitalized_pair() {
        let extractor = FieldExtractor::default();

        let record = extractor.extract_record("python developer with sql experience", "cv.txt");

        assert_eq!(record.name, UNKNOWN_NAME);
        assert_eq!(record.email, "");
        assert_eq!(record.phone, "");
    }

    #[test]
    fn test_name_capitalization_is_case_sensitive() {
        let extractor = FieldExtractor::default();
        let normalized = extractor.processor().normalize("resume of jane smith, Senior Engineer");

        assert_eq!(extractor.extract_name(&normalized).as_deref(), Some("Senior Engineer"));
    }

    #[test]
    fn test_phone_variants() {
        let extractor = FieldExtractor::default();

        assert_eq!(
            extractor.extract_phone("call +1 555-123-4567 today").as_deref(),
            Some("+1 555-123-4567")
        );
        assert_eq!(
            extractor.extract_phone("phone 555.123.4567").as_deref(),
            Some("555.123.4567")
        );
        assert!(extractor.extract_phone("room 12345").is_none());
    }

    #[test]
    fn test_unbalanced_parenthesis_is_not_captured() {
        let extractor = FieldExtractor::default();
        let normalized = extractor.processor().normalize("Phone (555-123-4567) call");

        assert_eq!(extractor.extract_phone(&normalized).as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_skills_are_closed_vocabulary() {
        let extractor = FieldExtractor::default();
        let text = "Skills: Rust, Elixir, Haskell, Docker";

        let record = extractor.extract_record(text, "cv.txt");

        assert_eq!(record.skills, vec!["Docker", "Rust"]);
    }

    #[test]
    fn test_skills_section_matches_inside_words() {
        let extractor = FieldExtractor::default();

        let record = extractor.extract_record("Jane Smith\n\nSKILLS: Golang, NodeJS, MongoDB", "cv.txt");

        assert_eq!(record.skills, vec!["Go", "Mongodb", "Node"]);
    }

    #[test]
    fn test_substrings_outside_skills_section_are_ignored() {
        let extractor = FieldExtractor::default();

        let record = extractor.extract_record("Jane Smith\nBuilt Golang services on NodeJS", "cv.txt");

        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_skills_are_order_independent() {
        let extractor = FieldExtractor::default();
        let a = extractor.extract_record("Jane Smith\nworked with aws, docker and python", "a.txt");
        let b = extractor.extract_record("Jane Smith\npython then docker, later aws", "b.txt");

        assert_eq!(a.skills, b.skills);
        assert_eq!(a.skills, vec!["Aws", "Docker", "Python"]);
    }

    #[test]
    fn test_long_sections_are_truncated_with_marker() {
        let extractor = FieldExtractor::default();
        let text = format!("EXPERIENCE: {}", "a".repeat(250));

        let record = extractor.extract_record(&text, "cv.txt");

        assert_eq!(record.experience.chars().count(), 203);
        assert!(record.experience.ends_with("..."));
    }

    #[test]
    fn test_preview_is_bounded() {
        let extractor = FieldExtractor::default();
        let text = "word ".repeat(200);

        let record = extractor.extract_record(&text, "cv.txt");

        assert_eq!(record.raw_text_preview.chars().count(), 503);
        assert!(record.raw_text_preview.ends_with("..."));
    }
}
