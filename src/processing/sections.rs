//! Labeled section capture (skills, experience, education)

use crate::processing::patterns::{first_match, FieldPattern};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Skills,
    Experience,
    Education,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Education => write!(f, "Education"),
        }
    }
}

/// Captures the text following a section label.
///
/// Runs on line-preserving text (see `TextProcessor::light_clean`). The
/// label is matched case-insensitively as a whole word; the terminators that
/// look for a capitalized line are case-sensitive.
pub struct SectionExtractor {
    skills: Vec<FieldPattern>,
    experience: Vec<FieldPattern>,
    education: Vec<FieldPattern>,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self {
            skills: Self::templates(SectionKind::Skills),
            experience: Self::templates(SectionKind::Experience),
            education: Self::templates(SectionKind::Education),
        }
    }

    fn templates(kind: SectionKind) -> Vec<FieldPattern> {
        let label = regex::escape(kind.label());
        vec![
            // up to a blank line, a capitalized line, a "word:" header, or the end
            FieldPattern::new(
                "until_blank_or_header",
                &format!(r"(?s)\b(?i:{label})\b[:\s]*(.*?)(?:\n\s*\n|\n[A-Z]|\n\w+:|\z)"),
                1,
            ),
            FieldPattern::new(
                "until_titled_header",
                &format!(r"(?s)\b(?i:{label})\b[:\s]*(.*?)(?:\n[A-Z][a-z]+\s*:|\z)"),
                1,
            ),
            // text that still carries literal "\n" escape sequences
            FieldPattern::new(
                "escaped_newlines",
                &format!(r"(?s)\b(?i:{label})\s*\\n(.*?)(?:\\n\\n|\\n[A-Z]|\z)"),
                1,
            ),
        ]
    }

    pub fn patterns(&self, kind: SectionKind) -> &[FieldPattern] {
        match kind {
            SectionKind::Skills => &self.skills,
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
        }
    }

    /// Trimmed section body, `None` when no template captures anything
    pub fn extract(&self, text: &str, kind: SectionKind) -> Option<String> {
        first_match(self.patterns(kind), text).map(|(_, value)| value)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
