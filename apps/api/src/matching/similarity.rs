/// Cosine similarity of two embedding vectors.
///
/// Returns 0.0 when either vector is empty, has zero magnitude, or the
/// dimensions disagree, so a failed embedding never leaks NaN into ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return 0.0;
    }
    dot / magnitude
}

/// Linear interpolation between a keyword score and a semantic score:
/// `(1 - weight) * keyword + weight * semantic`.
///
/// Both scores must be on the same scale. `weight` is not clamped.
pub fn blend_scores(keyword_score: f64, semantic_score: f64, weight: f64) -> f64 {
    (1.0 - weight) * keyword_score + weight * semantic_score
}
