use std::cmp::Ordering;

/// Cosine similarity between two vectors. Returns 0.0 for empty or
/// mismatched inputs rather than erroring; a zero score simply ranks
/// the candidate last.
pub fn cosine_similarity(query: &[f32], candidate: &[f32]) -> f32 {
    if query.len() != candidate.len() || query.is_empty() {
        return 0.0;
    }

    let dot: f32 = query.iter().zip(candidate.iter()).map(|(x, y)| x * y).sum();
    let query_norm: f32 = query.iter().map(|x| x * x).sum::<f32>().sqrt();
    let candidate_norm: f32 = candidate.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = query_norm * candidate_norm;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

/// Rank candidate indices by descending cosine similarity to the query.
pub fn rank_descending_by_cosine(query: &[f32], candidates: &[Vec<f32>]) -> Vec<(usize, f32)> {
    let mut scores: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| (idx, cosine_similarity(query, candidate)))
        .collect();

    scores.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal));
    scores
}
