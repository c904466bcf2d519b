//! Subjectivity extraction — interview text and vectors to a normalized
//! [`SubjectivityProfile`].
//!
//! ```text
//! raw text ─ lowercase ─┬─ lexical analyzers (narrative, emotion, tense,
//!                       │   self-reference, register, expression mode)
//!                       └─ TextStats ─ complexity, rhythm, reflection, uniqueness
//! embedding ────────────── complexity, uniqueness
//! emotion scores ───────── emotional expression, uniqueness
//! ```
//!
//! Extraction never fails. Empty text, an empty embedding and an empty
//! emotion map yield [`DEFAULT_PROFILE`].

pub mod analyzers;
pub mod lexicon;
pub mod profile;

use std::collections::BTreeMap;

pub use profile::{
    Authenticity, AuthenticityStyle, Complexity, ComplexityLevel, EmotionLevel,
    EmotionalExpression, Expression, ExpressionMode, NarrativeStyle, NarrativeType,
    SelfReference, SelfReferenceLevel, SubjectivityProfile, TemporalFocus, TemporalOrientation,
    DEFAULT_PROFILE, PROFILE_VECTOR_NAMES,
};

use analyzers::TextStats;

/// Derive the subjectivity profile of one subject.
pub fn extract(
    text: &str,
    embedding: &[f64],
    emotions: &BTreeMap<String, f64>,
) -> SubjectivityProfile {
    let lowered = text.to_lowercase();
    let stats = TextStats::new(&lowered);

    SubjectivityProfile {
        narrative_style: analyzers::narrative_style(&lowered),
        emotional_expression: analyzers::emotional_expression(&lowered, emotions),
        temporal_orientation: analyzers::temporal_orientation(&lowered),
        self_reference: analyzers::self_reference(&lowered),
        complexity: analyzers::complexity(&stats, embedding),
        authenticity: analyzers::authenticity(&lowered),
        rhythm: analyzers::rhythm(&stats),
        reflection_depth: analyzers::reflection_depth(&lowered, &stats),
        expression_mode: analyzers::expression_mode(&lowered),
        uniqueness: analyzers::uniqueness(&stats, embedding, emotions),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_default_profile() {
        let profile = extract("", &[], &BTreeMap::new());
        assert_eq!(profile, DEFAULT_PROFILE);
        assert_eq!(profile.narrative_style.kind, NarrativeType::Conversational);
        assert_eq!(profile.narrative_style.score, 0.5);
    }

    #[test]
    fn test_reflective_interview_excerpt() {
        let profile = extract(
            "A: I think I understand now. A: I realize this changed me.",
            &[],
            &BTreeMap::new(),
        );
        assert!(profile.reflection_depth > 0.0);
        assert_eq!(profile.narrative_style.kind, NarrativeType::Reflective);
        assert_eq!(profile.narrative_style.score, 1.0);
        assert_eq!(profile.self_reference.level, SelfReferenceLevel::High);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let mut emotions = BTreeMap::new();
        emotions.insert("sadness".to_string(), 0.6);
        emotions.insert("joy".to_string(), 0.2);
        let embedding: Vec<f64> = (0..64).map(|i| (i as f64 * 0.37).sin() * 0.2).collect();
        let text = "Honestly, I was devastated. Looking back, maybe it made me stronger?";

        let a = extract(text, &embedding, &emotions);
        let b = extract(text, &embedding, &emotions);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scores_are_normalized() {
        let text = "Well, you know, we used to go there. Now I will go alone. \
                    It feels like a dream, honestly. However, I am fine.";
        let profile = extract(text, &[0.5, -0.5, 0.1], &BTreeMap::new());
        for value in profile.to_vector() {
            assert!((0.0..=1.0).contains(&value), "{} out of range", value);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let upper = extract("OBVIOUSLY. CLEARLY.", &[], &BTreeMap::new());
        assert_eq!(upper.narrative_style.kind, NarrativeType::Direct);
    }
}
