//! Subjects (interview participants) and their derived identity values.
//!
//! A [`Subject`] is built once from a [`RawSubject`] record and never
//! changes afterwards. Positions and highlight state belong to the render
//! layer (see [`crate::render::RenderState`]), not to the subject.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{palette_color, Rgb};
use crate::config::IsotypeConfig;
use crate::subjectivity::{self, SubjectivityProfile};

/// Emotion categories of the ordered emotion vector (Plutchik's wheel).
pub const EMOTION_NAMES: [&str; 8] = [
    "joy",
    "trust",
    "fear",
    "surprise",
    "sadness",
    "disgust",
    "anger",
    "anticipation",
];

// ============================================================================
// Raw input
// ============================================================================

/// Optional record metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectMetadata {
    #[serde(default)]
    pub text_length: Option<usize>,
}

/// A participant record as delivered by the data-loading layer.
///
/// Everything except the id is optional and falls back to neutral defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSubject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "text")]
    pub text_content: Option<String>,
    #[serde(default, alias = "semantic_vector")]
    pub embedding: Option<Vec<f64>>,
    #[serde(default, alias = "emotion_scores")]
    pub emotions: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub metadata: Option<SubjectMetadata>,
    #[serde(default)]
    pub color: Option<String>,
}

// ============================================================================
// Dimension
// ============================================================================

/// Which feature vector similarity is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// The semantic embedding.
    Semantic,
    /// The ordered emotion vector.
    Emotion,
    /// The scalar subjectivity profile.
    Subjectivity,
    /// All of the above, each L2-normalized, concatenated.
    Unified,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Emotion => "emotion",
            Self::Subjectivity => "subjectivity",
            Self::Unified => "unified",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Subject
// ============================================================================

/// An immutable participant with its derived profile and identity values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f64>,
    pub emotions: BTreeMap<String, f64>,
    pub text_length: usize,
    /// Numeric part of the id (or a stable hash of it).
    pub id_numeric: u64,
    /// Per-subject seed for glyph noise.
    pub seed: u64,
    pub base_color: Rgb,
    pub base_size: f64,
    pub profile: SubjectivityProfile,
}

impl Subject {
    /// Build a subject from a raw record. Records without an id yield `None`.
    pub fn from_raw(raw: RawSubject, config: &IsotypeConfig) -> Option<Self> {
        let id = raw.id.filter(|id| !id.trim().is_empty())?;
        let text = raw.text_content.unwrap_or_default();
        let embedding = raw.embedding.unwrap_or_default();
        let emotions = raw.emotions.unwrap_or_default();
        let text_length = raw
            .metadata
            .and_then(|m| m.text_length)
            .unwrap_or_else(|| text.chars().count());

        let id_numeric = id_numeric_part(&id);
        let seed = derive_seed(id_numeric, &embedding, &emotions, text_length);

        let base_color = raw
            .color
            .as_deref()
            .and_then(|c| Rgb::from_hex(c).ok())
            .unwrap_or_else(|| palette_color(seed));

        let fill = (text_length as f64 / config.reference_text_length as f64).min(1.0);
        let base_size = config.base_size_min + (config.base_size_max - config.base_size_min) * fill;

        let profile = subjectivity::extract(&text, &embedding, &emotions);

        Some(Self {
            id,
            text,
            embedding,
            emotions,
            text_length,
            id_numeric,
            seed,
            base_color,
            base_size,
            profile,
        })
    }

    /// Emotion scores in [`EMOTION_NAMES`] order; missing names are 0.
    pub fn emotion_vector(&self) -> [f64; 8] {
        let mut v = [0.0; 8];
        for (slot, name) in v.iter_mut().zip(EMOTION_NAMES.iter()) {
            *slot = self.emotions.get(*name).copied().unwrap_or(0.0);
        }
        v
    }

    /// Highest emotion score under any name, 0 when there are none.
    pub fn max_emotion(&self) -> f64 {
        self.emotions.values().copied().fold(0.0, f64::max)
    }

    /// Plain sum of the embedding values.
    pub fn semantic_sum(&self) -> f64 {
        self.embedding.iter().sum()
    }

    /// The feature vector compared for `dimension`.
    pub fn feature_vector(&self, dimension: Dimension) -> Vec<f64> {
        self.feature_vector_with_width(dimension, self.embedding.len())
    }

    /// Like [`Subject::feature_vector`], with the embedding zero-padded to
    /// `embedding_width` so subjects without one stay comparable.
    pub fn feature_vector_with_width(&self, dimension: Dimension, embedding_width: usize) -> Vec<f64> {
        let mut embedding = self.embedding.clone();
        if embedding.len() < embedding_width {
            embedding.resize(embedding_width, 0.0);
        }
        match dimension {
            Dimension::Semantic => embedding,
            Dimension::Emotion => self.emotion_vector().to_vec(),
            Dimension::Subjectivity => self.profile.to_vector().to_vec(),
            Dimension::Unified => {
                let mut unified = normalized(&embedding);
                unified.extend(normalized(&self.emotion_vector()));
                unified.extend(normalized(&self.profile.to_vector()));
                unified
            }
        }
    }
}

/// Digits of the id as an integer, or a stable FNV-1a hash modulo 10 000.
pub fn id_numeric_part(id: &str) -> u64 {
    let digits: String = id.chars().filter(|c| c.is_ascii_digit()).take(15).collect();
    if let Ok(n) = digits.parse::<u64>() {
        return n;
    }
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash % 10_000
}

/// Seed from id, aggregated vector magnitudes and text length.
pub fn derive_seed(
    id_numeric: u64,
    embedding: &[f64],
    emotions: &BTreeMap<String, f64>,
    text_length: usize,
) -> u64 {
    let embedding_mass: f64 = embedding.iter().map(|v| v.abs()).sum();
    let emotion_mass: f64 = emotions.values().map(|v| v.abs()).sum();
    id_numeric
        .wrapping_mul(100)
        .wrapping_add((embedding_mass * 100.0).floor() as u64)
        .wrapping_add((emotion_mass * 100.0).floor() as u64)
        .wrapping_add(text_length as u64)
}

/// L2-normalized copy; zero vectors and empty slices pass through.
fn normalized(values: &[f64]) -> Vec<f64> {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return values.to_vec();
    }
    values.iter().map(|v| v / norm).collect()
}

// ============================================================================
// Tests
// ============================================================================
