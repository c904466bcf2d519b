//! Pure sub-analyzers over lowercased text and optional vectors.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{
    self, AUTHENTICITY, CONDITIONALS, EMOTION, EXPRESSION, NARRATIVE, REFLECTION_PHRASES,
    SELF_REFERENCE, TEMPORAL,
};
use super::profile::{
    Authenticity, Complexity, ComplexityLevel, EmotionLevel, EmotionalExpression, Expression,
    NarrativeStyle, SelfReference, TemporalFocus,
};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Embedding dimensions sampled by the complexity analyzer.
const COMPLEXITY_EMBEDDING_DIMS: usize = 20;
/// Standard deviation that maps to a uniqueness contribution of 1.
const UNIQUENESS_STD_SCALE: f64 = 0.3;

// ============================================================================
// TextStats
// ============================================================================

/// Tokens and sentence lengths shared by several analyzers.
#[derive(Debug, Clone, Default)]
pub struct TextStats<'a> {
    pub words: Vec<&'a str>,
    /// Sentence lengths in characters.
    pub sentence_lengths: Vec<usize>,
}

impl<'a> TextStats<'a> {
    /// `text` must already be lowercased.
    pub fn new(text: &'a str) -> Self {
        let words = WORD.find_iter(text).map(|m| m.as_str()).collect();
        let sentence_lengths = SENTENCE_END
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.chars().count())
            .collect();
        Self {
            words,
            sentence_lengths,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Unique tokens over total tokens, 0 for empty text.
    pub fn lexical_diversity(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let unique: HashSet<&str> = self.words.iter().copied().collect();
        unique.len() as f64 / self.words.len() as f64
    }

    pub fn mean_sentence_length(&self) -> f64 {
        mean(&self.sentence_lengths.iter().map(|&l| l as f64).collect::<Vec<_>>())
    }

    pub fn sentence_length_variance(&self) -> f64 {
        variance(&self.sentence_lengths.iter().map(|&l| l as f64).collect::<Vec<_>>())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

// ============================================================================
// Lexical analyzers
// ============================================================================

pub fn narrative_style(text: &str) -> NarrativeStyle {
    let c = NARRATIVE.classify(text);
    NarrativeStyle {
        kind: c.category,
        score: c.score,
    }
}

/// Emotional expression from indicator words, reinforced by the peak of the
/// emotion score map when one is supplied.
pub fn emotional_expression(text: &str, emotions: &BTreeMap<String, f64>) -> EmotionalExpression {
    let peak = emotions.values().copied().fold(0.0_f64, f64::max).clamp(0.0, 1.0);
    let extra = if peak > 0.0 {
        let bucket = if peak >= 0.7 {
            EmotionLevel::Intense
        } else if peak >= 0.4 {
            EmotionLevel::Expressive
        } else {
            EmotionLevel::Reserved
        };
        vec![(bucket, peak * 2.0)]
    } else {
        Vec::new()
    };

    let c = EMOTION.classify_with(text, &extra);
    EmotionalExpression {
        level: c.category,
        intensity: c.score,
    }
}

pub fn temporal_orientation(text: &str) -> TemporalFocus {
    let c = TEMPORAL.classify(text);
    TemporalFocus {
        orientation: c.category,
        score: c.score,
    }
}

pub fn self_reference(text: &str) -> SelfReference {
    let c = SELF_REFERENCE.classify(text);
    SelfReference {
        level: c.category,
        score: c.score,
    }
}

pub fn authenticity(text: &str) -> Authenticity {
    let c = AUTHENTICITY.classify(text);
    Authenticity {
        style: c.category,
        score: c.score,
    }
}

pub fn expression_mode(text: &str) -> Expression {
    let c = EXPRESSION.classify(text);
    Expression {
        mode: c.category,
        score: c.score,
    }
}

// ============================================================================
// Numeric analyzers
// ============================================================================

/// Blend of sentence length, sentence-length variance, lexical diversity and
/// embedding magnitude.
pub fn complexity(stats: &TextStats<'_>, embedding: &[f64]) -> Complexity {
    if stats.words.is_empty() {
        return Complexity {
            level: ComplexityLevel::Moderate,
            score: 0.5,
        };
    }

    let length_term = (stats.mean_sentence_length() / 100.0).min(1.0);
    let variance_term = (stats.sentence_length_variance() / 1000.0).min(1.0);
    let diversity_term = stats.lexical_diversity();
    let head: Vec<f64> = embedding
        .iter()
        .take(COMPLEXITY_EMBEDDING_DIMS)
        .map(|v| v.abs())
        .collect();
    let embedding_term = mean(&head).min(1.0);

    let score = (0.3 * length_term + 0.2 * variance_term + 0.3 * diversity_term
        + 0.2 * embedding_term)
        .clamp(0.0, 1.0);

    let level = if score >= 0.7 {
        ComplexityLevel::Complex
    } else if score >= 0.4 {
        ComplexityLevel::Moderate
    } else {
        ComplexityLevel::Simple
    };

    Complexity { level, score }
}

/// Variability of sentence lengths relative to their mean.
pub fn rhythm(stats: &TextStats<'_>) -> f64 {
    if stats.sentence_lengths.len() < 2 {
        return 0.5;
    }
    let m = stats.mean_sentence_length();
    if m <= 0.0 {
        return 0.5;
    }
    (stats.sentence_length_variance() / (m * m)).min(1.0)
}

/// Density of reflective phrases, questions and conditionals per 50 words.
pub fn reflection_depth(text: &str, stats: &TextStats<'_>) -> f64 {
    let word_count = stats.word_count();
    if word_count == 0 {
        return 0.0;
    }
    let phrase_hits = lexicon::count_phrases(&REFLECTION_PHRASES, text) as f64;
    let questions = text.matches('?').count() as f64;
    let conditionals = lexicon::count_phrases(&CONDITIONALS, text) as f64;

    let raw = phrase_hits * 2.0 + questions * 0.5 + conditionals;
    (raw / (word_count as f64 / 50.0)).min(1.0)
}

/// How far a subject's vectors and vocabulary stray from flat, repetitive input.
pub fn uniqueness(
    stats: &TextStats<'_>,
    embedding: &[f64],
    emotions: &BTreeMap<String, f64>,
) -> f64 {
    let emotion_values: Vec<f64> = emotions.values().copied().collect();
    let embedding_term = (std_dev(embedding) / UNIQUENESS_STD_SCALE).clamp(0.0, 1.0);
    let emotion_term = (std_dev(&emotion_values) / UNIQUENESS_STD_SCALE).clamp(0.0, 1.0);

    0.4 * embedding_term + 0.3 * emotion_term + 0.3 * stats.lexical_diversity()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subjectivity::profile::{
        AuthenticityStyle, ExpressionMode, NarrativeType, SelfReferenceLevel,
        TemporalOrientation,
    };

    #[test]
    fn test_text_stats() {
        let stats = TextStats::new("one two. three four five! six?");
        assert_eq!(stats.word_count(), 6);
        assert_eq!(stats.sentence_lengths, vec![7, 15, 3]);
        assert_eq!(stats.lexical_diversity(), 1.0);
    }

    #[test]
    fn test_rhythm_needs_two_sentences() {
        assert_eq!(rhythm(&TextStats::new("")), 0.5);
        assert_eq!(rhythm(&TextStats::new("just one sentence here")), 0.5);
    }

    #[test]
    fn test_rhythm_even_sentences_is_flat() {
        let stats = TextStats::new("abc. abc. abc.");
        assert_eq!(rhythm(&stats), 0.0);
    }

    #[test]
    fn test_reflection_depth_saturates() {
        let text = "i think i realize i wonder";
        let stats = TextStats::new(text);
        assert_eq!(reflection_depth(text, &stats), 1.0);
    }

    #[test]
    fn test_reflection_depth_scales_with_length() {
        // one conditional over 100 words: 1 / (100 / 50) = 0.5
        let mut text = String::from("maybe");
        for _ in 0..99 {
            text.push_str(" word");
        }
        let stats = TextStats::new(&text);
        assert!((reflection_depth(&text, &stats) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_complexity_levels() {
        let simple = TextStats::new("go go go go go go go go. go go.");
        assert_eq!(complexity(&simple, &[]).level, ComplexityLevel::Simple);

        let empty = TextStats::new("");
        let c = complexity(&empty, &[0.9; 20]);
        assert_eq!(c.level, ComplexityLevel::Moderate);
        assert_eq!(c.score, 0.5);
    }

    #[test]
    fn test_complexity_uses_embedding_head() {
        let stats = TextStats::new("alpha beta gamma");
        let low = complexity(&stats, &[0.0; 20]).score;
        let high = complexity(&stats, &[1.0; 20]).score;
        assert!((high - low - 0.2).abs() < 1e-12);

        // dimensions beyond the first twenty are ignored
        let mut tail = vec![0.0; 20];
        tail.extend(vec![1.0; 30]);
        assert_eq!(complexity(&stats, &tail).score, low);
    }

    #[test]
    fn test_emotion_map_reinforces_level() {
        let mut emotions = BTreeMap::new();
        emotions.insert("joy".to_string(), 0.9);
        let e = emotional_expression("", &emotions);
        assert_eq!(e.level, EmotionLevel::Intense);
        assert_eq!(e.intensity, 1.0);

        let neutral = emotional_expression("", &BTreeMap::new());
        assert_eq!(neutral.level, EmotionLevel::Moderate);
        assert_eq!(neutral.intensity, 0.5);
    }

    #[test]
    fn test_lexical_analyzers() {
        assert_eq!(
            narrative_style("obviously, clearly it was so").kind,
            NarrativeType::Direct
        );
        assert_eq!(
            temporal_orientation("someday i will travel").orientation,
            TemporalOrientation::Future
        );
        assert_eq!(
            self_reference("we did it, our team and us").level,
            SelfReferenceLevel::Collective
        );
        assert_eq!(
            authenticity("however, regarding the matter").style,
            AuthenticityStyle::Formal
        );
        assert_eq!(
            expression_mode("it seems sort of odd").mode,
            ExpressionMode::Indirect
        );
    }

    #[test]
    fn test_uniqueness_components() {
        let stats = TextStats::new("");
        assert_eq!(uniqueness(&stats, &[], &BTreeMap::new()), 0.0);

        // std of [0, 1] is 0.5, clamps to a full embedding contribution
        let u = uniqueness(&stats, &[0.0, 1.0], &BTreeMap::new());
        assert!((u - 0.4).abs() < 1e-12);

        let words = TextStats::new("a b c d");
        assert!((uniqueness(&words, &[], &BTreeMap::new()) - 0.3).abs() < 1e-12);
    }
}
