//! Similarity between subjects and the sparse graph built from it.

pub mod cosine;
pub mod graph;

pub use cosine::{cosine_similarity, CosineMode};
pub use graph::{node_degrees, GraphTier, SimilarityEdge, SimilarityGraphBuilder};
