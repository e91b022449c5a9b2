//! Report structures shared by all output formats

use crate::matching::JobMatch;
use crate::processing::CandidateRecord;
use crate::service::Recommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one command run produced, ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub candidate: Option<CandidateRecord>,
    pub profile_text: String,
    pub matches: Vec<JobMatch>,
    pub advice: Option<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Embedder the postings were ranked with; `None` when no matching ran
    pub embedder: Option<String>,
    pub catalog_size: usize,
    pub top_n: usize,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            embedder: None,
            catalog_size: 0,
            top_n: 0,
            processing_time_ms: 0,
        }
    }
}

/// Coarse reading of a cosine score for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.6 {
            ScoreBand::Strong
        } else if score >= 0.3 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "STRONG",
            ScoreBand::Moderate => "MODERATE",
            ScoreBand::Weak => "WEAK",
        }
    }
}

impl MatchReport {
    pub fn from_recommendation(
        recommendation: Recommendation,
        embedder: &str,
        catalog_size: usize,
        top_n: usize,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            candidate: recommendation.candidate,
            profile_text: recommendation.profile_text,
            matches: recommendation.matches,
            advice: recommendation.advice,
            metadata: ReportMetadata {
                embedder: Some(embedder.to_string()),
                catalog_size,
                top_n,
                processing_time_ms,
                ..ReportMetadata::now()
            },
        }
    }

    /// Report for a parse-only run
    pub fn for_candidate(candidate: CandidateRecord) -> Self {
        Self {
            profile_text: crate::processing::ProfileText::profile_text(&candidate),
            candidate: Some(candidate),
            matches: Vec::new(),
            advice: None,
            metadata: ReportMetadata::now(),
        }
    }

    pub fn has_matching(&self) -> bool {
        self.metadata.embedder.is_some()
    }

    pub fn best_match(&self) -> Option<&JobMatch> {
        self.matches.first()
    }

    /// Name used in titles and suggested file names
    pub fn subject(&self) -> &str {
        self.candidate
            .as_ref()
            .map(|c| c.source_file.as_str())
            .unwrap_or("manual profile")
    }
}
