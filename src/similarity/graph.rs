//! Sparse similarity graph construction.
//!
//! For every subject a bounded candidate sample is drawn (a local index
//! window plus a seeded random fill), candidates below the threshold are
//! dropped, and the best `max_links_per_node` survive. Per-subject work is
//! independent; edges are deduplicated by unordered pair in a single merge
//! pass afterwards.

use std::cmp::Ordering;
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::IsotypeConfig;
use crate::subject::{Dimension, Subject};

use super::cosine::CosineMode;

/// Neighbors on each side of a subject in the local sampling window.
const LOCAL_WINDOW_HALF: usize = 10;

/// An undirected similarity link between two subjects (by index).
///
/// `source` is the subject whose candidate search produced the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: usize,
    pub target: usize,
    pub similarity: f64,
    pub dimension: Dimension,
}

impl SimilarityEdge {
    /// Canonical unordered pair key.
    pub fn key(&self) -> (usize, usize) {
        pair_key(self.source, self.target)
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Link and sample budget for a given subject count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTier {
    pub max_links_per_node: usize,
    pub sample_size: usize,
}

impl GraphTier {
    pub fn for_subject_count(n: usize) -> Self {
        if n <= 20 {
            Self {
                max_links_per_node: 10.min(n.saturating_sub(1)),
                sample_size: n,
            }
        } else if n <= 50 {
            Self {
                max_links_per_node: 8,
                sample_size: 30.min(n),
            }
        } else {
            Self {
                max_links_per_node: 5,
                sample_size: 50.min(n),
            }
        }
    }
}

/// Builds degree-bounded similarity graphs. Each `build` call is independent:
/// the sampling RNG is reseeded from `seed` every time.
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    pub threshold: f64,
    pub dimension: Dimension,
    pub cosine_mode: CosineMode,
    pub seed: u64,
}

impl SimilarityGraphBuilder {
    pub fn new(config: &IsotypeConfig) -> Self {
        Self {
            threshold: config.similarity_threshold,
            dimension: config.dimension,
            cosine_mode: config.cosine_mode,
            seed: config.sampling_seed,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Build the edge list over the configured dimension. Embeddings are
    /// zero-padded to the widest one in `subjects`.
    pub fn build(&self, subjects: &[Subject]) -> Vec<SimilarityEdge> {
        let embedding_width = subjects.iter().map(|s| s.embedding.len()).max().unwrap_or(0);
        let vectors: Vec<Vec<f64>> = subjects
            .iter()
            .map(|s| s.feature_vector_with_width(self.dimension, embedding_width))
            .collect();
        self.build_from_vectors(&vectors)
    }

    /// Build the edge list over precomputed feature vectors (one per subject).
    pub fn build_from_vectors(&self, vectors: &[Vec<f64>]) -> Vec<SimilarityEdge> {
        let n = vectors.len();
        if n < 2 {
            return Vec::new();
        }
        let tier = GraphTier::for_subject_count(n);

        let per_subject: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|i| self.strongest_links(i, vectors, tier))
            .collect();

        let edges = self.merge(per_subject);
        tracing::debug!(
            subjects = n,
            max_links = tier.max_links_per_node,
            sample_size = tier.sample_size,
            edges = edges.len(),
            dimension = %self.dimension,
            "Built similarity graph"
        );
        edges
    }

    /// Candidate indices for subject `i`: the symmetric local window first,
    /// then seeded random indices until `sample_size` is reached.
    pub fn sample(&self, i: usize, n: usize, sample_size: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.subject_seed(i));
        sample_candidates(i, n, sample_size, &mut rng)
    }

    fn subject_seed(&self, i: usize) -> u64 {
        self.seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    /// Top-k candidates of subject `i` at or above the threshold.
    fn strongest_links(&self, i: usize, vectors: &[Vec<f64>], tier: GraphTier) -> Vec<(usize, f64)> {
        let mut links: Vec<(usize, f64)> = self
            .sample(i, vectors.len(), tier.sample_size)
            .into_iter()
            .map(|j| (j, self.cosine_mode.similarity(&vectors[i], &vectors[j])))
            .filter(|(_, sim)| *sim >= self.threshold)
            .collect();

        links.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        links.truncate(tier.max_links_per_node);
        links
    }

    /// Single-threaded merge with unordered-pair deduplication.
    fn merge(&self, per_subject: Vec<Vec<(usize, f64)>>) -> Vec<SimilarityEdge> {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut edges = Vec::new();
        for (source, links) in per_subject.into_iter().enumerate() {
            for (target, similarity) in links {
                if seen.insert(pair_key(source, target)) {
                    edges.push(SimilarityEdge {
                        source,
                        target,
                        similarity,
                        dimension: self.dimension,
                    });
                }
            }
        }
        edges
    }
}

fn sample_candidates(i: usize, n: usize, sample_size: usize, rng: &mut StdRng) -> Vec<usize> {
    let wanted = sample_size.min(n.saturating_sub(1));
    let mut chosen: Vec<usize> = Vec::with_capacity(wanted);

    for offset in 1..=LOCAL_WINDOW_HALF {
        if let Some(before) = i.checked_sub(offset) {
            chosen.push(before);
        }
        if i + offset < n {
            chosen.push(i + offset);
        }
    }
    chosen.truncate(wanted);

    if chosen.len() < wanted {
        let taken: HashSet<usize> = chosen.iter().copied().collect();
        let mut pool: Vec<usize> = (0..n).filter(|j| *j != i && !taken.contains(j)).collect();
        let need = wanted - chosen.len();
        let (picked, _) = pool.partial_shuffle(rng, need);
        chosen.extend_from_slice(picked);
    }

    chosen
}

/// Number of edges incident to each of `n` subjects.
pub fn node_degrees(n: usize, edges: &[SimilarityEdge]) -> Vec<usize> {
    let mut degrees = vec![0; n];
    for edge in edges {
        if edge.source < n {
            degrees[edge.source] += 1;
        }
        if edge.target < n && edge.target != edge.source {
            degrees[edge.target] += 1;
        }
    }
    degrees
}

// ============================================================================
// Tests
// ============================================================================
