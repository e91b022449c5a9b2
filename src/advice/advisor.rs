//! Career advice generation

use crate::error::Result;
use crate::processing::candidate::CandidateRecord;
use log::warn;

pub const ADVICE_FALLBACK: &str = "Could not generate AI advice at this time.";

const DATA_TRACK_SKILLS: [&str; 3] = ["python", "machine learning", "data"];
const WEB_TRACK_SKILLS: [&str; 3] = ["javascript", "react", "node"];

const DATA_TRACK_ADVICE: [&str; 4] = [
    "🎯 **Career Path**: Data Scientist / ML Engineer",
    "📚 **Skills to Learn**: TensorFlow, PyTorch, AWS",
    "💡 **Certifications**: Google Data Analytics, AWS ML Specialty",
    "🚀 **Next Steps**: Build portfolio projects with real datasets",
];

const WEB_TRACK_ADVICE: [&str; 4] = [
    "🎯 **Career Path**: Full-Stack Developer",
    "📚 **Skills to Learn**: React Native, GraphQL, Docker",
    "💡 **Certifications**: Google Cloud Associate, React Certification",
    "🚀 **Next Steps**: Contribute to open-source projects",
];

const GENERAL_ADVICE: [&str; 4] = [
    "🎯 **Career Path**: Based on your skills, consider technology roles",
    "📚 **Skills to Learn**: Python, Cloud Computing, Data Analysis",
    "💡 **Certifications**: Entry-level tech certifications",
    "🚀 **Next Steps**: Gain practical experience through projects",
];

/// Produces free-text career advice for a parsed candidate
pub trait AdviceGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn generate(&self, record: &CandidateRecord) -> Result<String>;
}

/// Offline advice from a fixed rule set keyed on the candidate's skills
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    fn has_any(skills: &[String], track: &[&str]) -> bool {
        skills
            .iter()
            .any(|skill| track.iter().any(|t| skill.eq_ignore_ascii_case(t)))
    }
}

impl AdviceGenerator for RuleBasedAdvisor {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn generate(&self, record: &CandidateRecord) -> Result<String> {
        let mut advice: Vec<&str> = Vec::new();

        if Self::has_any(&record.skills, &DATA_TRACK_SKILLS) {
            advice.extend(DATA_TRACK_ADVICE);
        }
        if Self::has_any(&record.skills, &WEB_TRACK_SKILLS) {
            advice.extend(WEB_TRACK_ADVICE);
        }
        if advice.is_empty() {
            advice.extend(GENERAL_ADVICE);
        }

        Ok(advice.join("\n\n"))
    }
}

/// Advice text, or the canned fallback when the generator fails
pub fn advice_or_fallback(generator: &dyn AdviceGenerator, record: &CandidateRecord) -> String {
    match generator.generate(record) {
        Ok(advice) if !advice.trim().is_empty() => advice,
        Ok(_) => {
            warn!("{} returned empty advice", generator.name());
            ADVICE_FALLBACK.to_string()
        }
        Err(e) => {
            warn!("Advice generation with {} failed: {}", generator.name(), e);
            ADVICE_FALLBACK.to_string()
        }
    }
}
