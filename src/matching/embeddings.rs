//! Text embedding backends

use crate::error::{CareerMatcherError, Result};
use log::info;
use model2vec_rs::model::StaticModel;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

/// Changing these keys changes every hashed vector.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

pub const DEFAULT_HASHING_DIMENSION: usize = 512;

/// Maps free text into a fixed-length vector space.
///
/// Implementations must be deterministic: the same text always produces the
/// same vector, so rankings built on top of them are reproducible.
pub trait TextEmbedder: Send + Sync {
    fn name(&self) -> &str;

    fn dimension(&self) -> usize;

    /// One vector per input text, in input order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| CareerMatcherError::Embedding("Embedder returned no vector".to_string()))
    }
}

/// Model2Vec static embeddings
pub struct StaticModelEmbedder {
    model: StaticModel,
    model_name: String,
    dimension: usize,
}

impl StaticModelEmbedder {
    /// Load from a local model directory or a Hugging Face repo id
    pub fn load(repo_or_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec model from: {}", repo_or_path.display());

        let model = StaticModel::from_pretrained(repo_or_path, None, None, None)?;
        let dimension = model.encode_single("dimension").len();
        if dimension == 0 {
            return Err(CareerMatcherError::ModelError(format!(
                "Model {} produced zero-length embeddings",
                model_name
            )));
        }

        info!(
            "Model {} loaded in {:.2?} ({} dimensions)",
            model_name,
            start_time.elapsed(),
            dimension
        );

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl TextEmbedder for StaticModelEmbedder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.model.encode(texts);
        if embeddings.len() != texts.len() {
            return Err(CareerMatcherError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }
}

/// Feature-hashing bag-of-words embedder.
///
/// Every lowercased word is hashed into a signed bucket and the result is
/// L2-normalized. Needs no model files, so it serves offline runs and is the
/// fallback when a Model2Vec model cannot be loaded.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIMENSION)
    }
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for word in text.unicode_words() {
            let token = word.to_lowercase();
            let idx = (self.hash_token(&token) % self.dimension as u64) as usize;
            let sign = if self.hash_token(&format!("{}_sign", token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl TextEmbedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.vectorize(text)).collect())
    }
}
