//! Vector similarity

use crate::error::{CareerMatcherError, Result};

/// Cosine similarity of two embeddings, in `[-1, 1]`.
///
/// Empty or zero-norm vectors score 0. Vectors of different length are an
/// error rather than a silent truncation.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(CareerMatcherError::MatchComputation(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let score = dot_product / (norm_a * norm_b);
    if score.is_nan() {
        return Err(CareerMatcherError::MatchComputation(
            "Similarity is not a number".to_string(),
        ));
    }
    Ok(score.clamp(-1.0, 1.0))
}
