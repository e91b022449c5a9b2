//! Candidate records and the profile text fed to the matcher

use serde::{Deserialize, Serialize};

/// Name reported when no name pattern matches
pub const UNKNOWN_NAME: &str = "Unknown";

/// Structured fields pulled out of one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Sorted, de-duplicated, title-cased taxonomy entries
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
    pub raw_text_preview: String,
    pub source_file: String,
    /// Characters in the extracted text before normalization
    pub text_length: usize,
}

/// Skills and narrative typed in by hand instead of parsed from a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualProfile {
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
}

impl ManualProfile {
    /// Build from form fields; `skills` is comma separated
    pub fn from_form(skills: &str, experience: &str, education: &str) -> Self {
        Self {
            skills: skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            experience: experience.trim().to_string(),
            education: education.trim().to_string(),
        }
    }

    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }
}

/// Anything that can be flattened into the single string the matcher embeds
pub trait ProfileText {
    fn skills(&self) -> &[String];
    fn experience(&self) -> &str;
    fn education(&self) -> &str;

    fn profile_text(&self) -> String {
        build_profile_text(self.skills(), self.experience(), self.education())
    }
}

impl ProfileText for CandidateRecord {
    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn experience(&self) -> &str {
        &self.experience
    }

    fn education(&self) -> &str {
        &self.education
    }
}

impl ProfileText for ManualProfile {
    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn experience(&self) -> &str {
        &self.experience
    }

    fn education(&self) -> &str {
        &self.education
    }
}

/// Space-joined skills, then experience, then education; outer whitespace trimmed
pub fn build_profile_text(skills: &[String], experience: &str, education: &str) -> String {
    format!("{} {} {}", skills.join(" "), experience, education)
        .trim()
        .to_string()
}
