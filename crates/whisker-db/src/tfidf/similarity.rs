//! Cosine similarity ranking over a dense vector matrix.

use std::cmp::Ordering;

/// Default minimum similarity for a match to be returned.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Score `query` against every row of `vectors` and return the best matches.
///
/// Returns `(row, score)` pairs, best first. Rows scoring below
/// `min_similarity` are dropped. Equal scores keep row order.
pub fn rank(
    query: &[f32],
    vectors: &[Vec<f32>],
    limit: usize,
    min_similarity: f32,
) -> Vec<(usize, f32)> {
    if limit == 0 || vectors.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .enumerate()
        .map(|(row, vector)| (row, cosine_similarity(query, vector)))
        .filter(|(_, score)| *score >= min_similarity)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);

    tracing::trace!("Ranked {} of {} vectors", scored.len(), vectors.len());
    scored
}
