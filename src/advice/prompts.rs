//! Prompt handed to an external language model for career advice

use crate::processing::candidate::CandidateRecord;
use serde::{Deserialize, Serialize};

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub career_advice: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            career_advice: CAREER_ADVICE_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptParams {
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
}

impl From<&CandidateRecord> for PromptParams {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            skills: record.skills.clone(),
            experience: record.experience.clone(),
            education: record.education.clone(),
        }
    }
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

impl PromptTemplates {
    pub fn render_career_advice(&self, params: &PromptParams) -> String {
        let skills = params.skills.join(", ");

        self.career_advice
            .replace("{skills}", or_not_specified(&skills))
            .replace("{experience}", or_not_specified(&params.experience))
            .replace("{education}", or_not_specified(&params.education))
    }
}

const CAREER_ADVICE_TEMPLATE: &str = r#"As a career advisor, analyze this resume and provide specific advice:

Skills: {skills}
Experience: {experience}
Education: {education}

Provide:
1. 2-3 suitable career paths with explanations
2. 2-3 skills to learn with resources
3. Recommended certifications
4. Actionable next steps

Format with clear sections and emojis."#;
