//! Vector helpers for embedding comparison.

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when the lengths differ, either vector is empty, or either
/// vector has zero magnitude, so callers never see NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norms = l2_norm(a) * l2_norm(b);

    if norms == 0.0 {
        return 0.0;
    }

    dot / norms
}

/// L2 norm (magnitude) of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale a vector to unit length in place. Zero vectors are left untouched.
pub fn normalize_in_place(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}
