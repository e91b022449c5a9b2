//! Recommendation flow shared by every front end: parse, match, advise

use crate::advice::{advice_or_fallback, AdviceGenerator};
use crate::error::{CareerMatcherError, Result};
use crate::matching::{JobMatch, JobMatcher};
use crate::processing::{CandidateRecord, ManualProfile, ProfileText, ResumeParser};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Absent for manually entered profiles
    pub candidate: Option<CandidateRecord>,
    pub profile_text: String,
    pub matches: Vec<JobMatch>,
    pub advice: Option<String>,
}

pub struct CareerService {
    parser: ResumeParser,
    matcher: Arc<JobMatcher>,
    advisor: Box<dyn AdviceGenerator>,
}

impl CareerService {
    pub fn new(
        parser: ResumeParser,
        matcher: Arc<JobMatcher>,
        advisor: Box<dyn AdviceGenerator>,
    ) -> Self {
        Self {
            parser,
            matcher,
            advisor,
        }
    }

    pub fn parser(&self) -> &ResumeParser {
        &self.parser
    }

    pub fn matcher(&self) -> &JobMatcher {
        &self.matcher
    }

    /// Parse a resume file and recommend postings. Advice is only produced
    /// when the resume yielded at least one skill.
    pub fn recommend_for_file(&self, path: &Path, top_n: usize) -> Result<Recommendation> {
        let record = self.parser.parse(path)?;
        Ok(self.recommend_for_record(record, top_n))
    }

    pub fn recommend_for_upload(
        &self,
        file_name: &str,
        bytes: &[u8],
        top_n: usize,
    ) -> Result<Recommendation> {
        let record = self.parser.parse_upload(file_name, bytes)?;
        Ok(self.recommend_for_record(record, top_n))
    }

    fn recommend_for_record(&self, record: CandidateRecord, top_n: usize) -> Recommendation {
        let profile_text = record.profile_text();
        let matches = self.matcher.match_profile(&profile_text, top_n);
        let advice = (!record.skills.is_empty())
            .then(|| advice_or_fallback(self.advisor.as_ref(), &record));

        info!(
            "Recommended {} postings for {}",
            matches.len(),
            record.source_file
        );

        Recommendation {
            candidate: Some(record),
            profile_text,
            matches,
            advice,
        }
    }

    /// Recommend postings for hand-entered skills. At least one skill is required.
    pub fn recommend_for_manual(
        &self,
        profile: &ManualProfile,
        top_n: usize,
    ) -> Result<Recommendation> {
        if !profile.has_skills() {
            return Err(CareerMatcherError::InvalidInput(
                "Please enter at least some skills".to_string(),
            ));
        }

        let profile_text = profile.profile_text();
        let matches = self.matcher.match_profile(&profile_text, top_n);

        Ok(Recommendation {
            candidate: None,
            profile_text,
            matches,
            advice: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::RuleBasedAdvisor;
    use crate::matching::{HashingEmbedder, JobCatalog};
    use tempfile::TempDir;

    fn service() -> CareerService {
        let catalog = JobCatalog::from_listings(JobCatalog::default_listings());
        let matcher = JobMatcher::new(catalog, Arc::new(HashingEmbedder::default())).unwrap();
        CareerService::new(
            ResumeParser::default(),
            Arc::new(matcher),
            Box::new(RuleBasedAdvisor),
        )
    }

    #[test]
    fn test_file_with_skills_gets_advice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "John Doe\n\nSKILLS: Python, SQL\n\nEXPERIENCE: data analysis").unwrap();

        let rec = service().recommend_for_file(&path, 5).unwrap();

        assert_eq!(rec.matches.len(), 3);
        assert!(rec.advice.unwrap().contains("Data Scientist"));
        assert_eq!(rec.profile_text, "Data Analysis Python Sql data analysis");
    }

    #[test]
    fn test_file_without_skills_gets_no_advice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "John Doe\nWorked at a bakery").unwrap();

        let rec = service().recommend_for_file(&path, 5).unwrap();

        assert!(rec.candidate.unwrap().skills.is_empty());
        assert!(rec.advice.is_none());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            service().recommend_for_file(&path, 5),
            Err(CareerMatcherError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_manual_profile_requires_skills() {
        let err = service()
            .recommend_for_manual(&ManualProfile::from_form("", "5 years", ""), 5)
            .unwrap_err();
        assert!(matches!(err, CareerMatcherError::InvalidInput(_)));
    }

    #[test]
    fn test_manual_profile_is_matched_without_advice() {
        let profile = ManualProfile::from_form("python, sql", "2 years data analysis", "");
        let rec = service().recommend_for_manual(&profile, 2).unwrap();

        assert_eq!(rec.matches.len(), 2);
        assert_eq!(rec.matches[0].title, "Data Analyst");
        assert!(rec.candidate.is_none());
        assert!(rec.advice.is_none());
    }
}
