//! Cosine similarity between feature vectors.

use serde::{Deserialize, Serialize};

/// Vectors longer than this are stride-sampled in [`CosineMode::LegacySampled`].
pub const LEGACY_SAMPLING_DIMS: usize = 500;

/// How similarity is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CosineMode {
    /// Full cosine similarity over every dimension.
    #[default]
    Exact,
    /// Every other dimension for vectors over 500 entries, with a ×2
    /// compensation on the dot product and squared norms. Numerically
    /// different from `Exact`; only for parity with older outputs.
    LegacySampled,
}

impl CosineMode {
    pub fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Exact => cosine_similarity(a, b),
            Self::LegacySampled => legacy_sampled_similarity(a, b),
        }
    }
}

/// `dot(a, b) / (|a| |b|)`, clamped to [-1, 1].
///
/// Returns 0 for empty or mismatched vectors and when either norm is 0.
/// Callers treat 0 as "no similarity", never as a failure.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    cosine_with_stride(a, b, 1, 1.0)
}

/// Legacy stride-2 approximation for long vectors.
pub fn legacy_sampled_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() > LEGACY_SAMPLING_DIMS {
        cosine_with_stride(a, b, 2, 2.0)
    } else {
        cosine_with_stride(a, b, 1, 1.0)
    }
}

fn cosine_with_stride(a: &[f64], b: &[f64], stride: usize, scale: f64) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()).step_by(stride) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    dot *= scale;
    norm_a *= scale;
    norm_b *= scale;

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b).sqrt()).clamp(-1.0, 1.0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_one() {
        let vectors: [&[f64]; 4] = [
            &[1.0],
            &[0.3, -0.7, 2.5],
            &[1e-3, 4.0, 4.0, -9.25, 0.1],
            &[2.0, 2.0],
        ];
        for v in vectors {
            assert_eq!(cosine_similarity(v, v), 1.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let a = [0.2, -1.3, 0.8, 4.4];
        let b = [1.1, 0.4, -0.6, 2.0];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
        assert_eq!(
            legacy_sampled_similarity(&a, &b),
            legacy_sampled_similarity(&b, &a)
        );
    }

    #[test]
    fn test_degenerate_vectors_yield_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]), -1.0);
    }

    #[test]
    fn test_legacy_matches_exact_for_short_vectors() {
        let a: Vec<f64> = (0..100).map(|i| (i as f64).sin()).collect();
        let b: Vec<f64> = (0..100).map(|i| (i as f64 * 0.5).cos()).collect();
        assert_eq!(
            CosineMode::LegacySampled.similarity(&a, &b),
            CosineMode::Exact.similarity(&a, &b)
        );
    }

    #[test]
    fn test_legacy_ignores_odd_dimensions_for_long_vectors() {
        // identical on even indices, opposite on odd ones
        let a: Vec<f64> = (0..600).map(|_| 1.0).collect();
        let b: Vec<f64> = (0..600).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert_eq!(CosineMode::Exact.similarity(&a, &b), 0.0);
        assert_eq!(CosineMode::LegacySampled.similarity(&a, &b), 1.0);
    }
}
