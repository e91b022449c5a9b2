//! Semantic matching of a profile against the job catalog

use crate::error::{CareerMatcherError, Result};
use crate::matching::catalog::{JobCatalog, JobListing};
use crate::matching::embeddings::TextEmbedder;
use crate::matching::similarity::cosine_similarity;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_TOP_N: usize = 5;

/// A catalog row with its precomputed embedding
#[derive(Debug, Clone)]
pub struct JobPosting {
    pub listing: JobListing,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub match_score: f32,
}

impl JobMatch {
    fn from_posting(posting: &JobPosting, match_score: f32) -> Self {
        Self {
            title: posting.listing.title.clone(),
            company: posting.listing.company.clone(),
            location: posting.listing.location.clone(),
            link: posting.listing.link.clone(),
            match_score,
        }
    }

    /// Score as a percentage for display
    pub fn percent(&self) -> f32 {
        self.match_score * 100.0
    }
}

/// Ranks postings by cosine similarity to a profile.
///
/// Built once over the whole catalog and never mutated afterwards, so a
/// single instance can be shared between concurrent requests.
pub struct JobMatcher {
    postings: Vec<JobPosting>,
    embedder: Arc<dyn TextEmbedder>,
}

impl JobMatcher {
    /// Embed every posting up front. Any failure here is a catalog error.
    pub fn new(catalog: JobCatalog, embedder: Arc<dyn TextEmbedder>) -> Result<Self> {
        let start_time = Instant::now();
        let listings = catalog.listings().to_vec();
        let texts: Vec<String> = listings.iter().map(JobListing::embedding_text).collect();

        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            embedder.embed_batch(&texts).map_err(|e| {
                CareerMatcherError::CatalogLoad(format!("Failed to embed postings: {}", e))
            })?
        };

        if embeddings.len() != listings.len() {
            return Err(CareerMatcherError::CatalogLoad(format!(
                "Embedded {} of {} postings",
                embeddings.len(),
                listings.len()
            )));
        }

        let postings = listings
            .into_iter()
            .zip(embeddings)
            .map(|(listing, embedding)| JobPosting { listing, embedding })
            .collect::<Vec<_>>();

        info!(
            "Embedded {} postings with {} in {:.2?}",
            postings.len(),
            embedder.name(),
            start_time.elapsed()
        );

        Ok(Self { postings, embedder })
    }

    /// Top `top_n` postings for the profile, best first.
    ///
    /// Equal scores keep catalog order.
    pub fn try_match(&self, profile_text: &str, top_n: usize) -> Result<Vec<JobMatch>> {
        if self.postings.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let profile_embedding = self.embedder.embed(profile_text)?;

        let mut scored = Vec::with_capacity(self.postings.len());
        for posting in &self.postings {
            let score = cosine_similarity(&profile_embedding, &posting.embedding)?;
            scored.push((posting, score));
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_n);

        debug!(
            "Best match: {:?}",
            scored.first().map(|(posting, score)| (&posting.listing.title, *score))
        );

        Ok(scored
            .into_iter()
            .map(|(posting, score)| JobMatch::from_posting(posting, score))
            .collect())
    }

    /// Like [`try_match`](Self::try_match), but a failure is logged and
    /// yields no matches.
    pub fn match_profile(&self, profile_text: &str, top_n: usize) -> Vec<JobMatch> {
        match self.try_match(profile_text, top_n) {
            Ok(matches) => matches,
            Err(e) => {
                error!("Error matching jobs: {}", e);
                Vec::new()
            }
        }
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::embeddings::HashingEmbedder;

    struct FailingEmbedder;

    impl TextEmbedder for FailingEmbedder {
        fn name(&self) -> &str {
            "failing"
        }

        fn dimension(&self) -> usize {
            4
        }

        fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(CareerMatcherError::Embedding("offline".to_string()))
        }
    }

    /// Catalog vectors are 2-d, profile vectors 3-d
    struct MismatchedEmbedder;

    impl TextEmbedder for MismatchedEmbedder {
        fn name(&self) -> &str {
            "mismatched"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let dim = if texts.len() == 1 { 3 } else { 2 };
            Ok(texts.iter().map(|_| vec![1.0; dim]).collect())
        }
    }

    fn default_matcher() -> JobMatcher {
        let catalog = JobCatalog::from_listings(JobCatalog::default_listings());
        JobMatcher::new(catalog, Arc::new(HashingEmbedder::default())).unwrap()
    }

    #[test]
    fn test_results_are_bounded_and_sorted() {
        let matcher = default_matcher();
        let matches = matcher.match_profile("python sql data analysis", DEFAULT_TOP_N);

        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        for m in &matches {
            assert!((-1.0..=1.0).contains(&m.match_score));
        }
    }

    #[test]
    fn test_top_n_truncates() {
        let matcher = default_matcher();
        assert_eq!(matcher.match_profile("web developer", 1).len(), 1);
        assert!(matcher.match_profile("web developer", 0).is_empty());
    }

    #[test]
    fn test_shared_words_rank_first() {
        let matcher = default_matcher();
        let matches = matcher.match_profile("python sql 2 years data analysis", DEFAULT_TOP_N);
        assert_eq!(matches[0].title, "Data Analyst");
    }

    #[test]
    fn test_matching_is_deterministic() {
        let matcher = default_matcher();
        let first = matcher.match_profile("javascript react web", 3);
        let second = matcher.match_profile("javascript react web", 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // An empty profile embeds to the zero vector, so every posting scores 0
        let matcher = default_matcher();
        let titles: Vec<String> = matcher
            .match_profile("", 3)
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Software Developer", "Data Analyst", "Web Developer"]);
    }

    #[test]
    fn test_empty_catalog_gives_no_matches() {
        let matcher = JobMatcher::new(JobCatalog::default(), Arc::new(HashingEmbedder::default()))
            .unwrap();
        assert!(matcher.is_empty());
        assert!(matcher.match_profile("python", 5).is_empty());
    }

    #[test]
    fn test_catalog_embedding_failure_is_fatal() {
        let catalog = JobCatalog::from_listings(JobCatalog::default_listings());
        let err = JobMatcher::new(catalog, Arc::new(FailingEmbedder))
            .err()
            .unwrap();
        assert!(matches!(err, CareerMatcherError::CatalogLoad(_)));
    }

    #[test]
    fn test_computation_failure_is_recovered() {
        let catalog = JobCatalog::from_listings(JobCatalog::default_listings());
        let matcher = JobMatcher::new(catalog, Arc::new(MismatchedEmbedder)).unwrap();

        assert!(matches!(
            matcher.try_match("python", 5),
            Err(CareerMatcherError::MatchComputation(_))
        ));
        assert!(matcher.match_profile("python", 5).is_empty());
    }
}
