//! Subjectivity profile types and the fallback profile.

use serde::{Deserialize, Serialize};

// ============================================================================
// Categories
// ============================================================================

/// How a subject tells their story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeType {
    Conversational,
    Direct,
    Reflective,
    Metaphorical,
}

/// Strength of emotional language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLevel {
    Intense,
    Expressive,
    Moderate,
    Reserved,
}

/// Dominant tense of the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalOrientation {
    Past,
    Present,
    Future,
}

/// Whom the subject talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfReferenceLevel {
    /// First-person singular dominates.
    High,
    /// First-person plural dominates.
    Collective,
    /// Other people and impersonal forms dominate.
    Low,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

/// Register of the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticityStyle {
    Casual,
    Formal,
    Intimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionMode {
    Balanced,
    Direct,
    Indirect,
}

// ============================================================================
// Scored fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrativeStyle {
    #[serde(rename = "type")]
    pub kind: NarrativeType,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalExpression {
    pub level: EmotionLevel,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemporalFocus {
    pub orientation: TemporalOrientation,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfReference {
    pub level: SelfReferenceLevel,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    pub level: ComplexityLevel,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Authenticity {
    pub style: AuthenticityStyle,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub mode: ExpressionMode,
    pub score: f64,
}

// ============================================================================
// SubjectivityProfile
// ============================================================================

/// Normalized subjectivity features of one subject.
///
/// Every categorical field's score is the maximum of the category
/// distribution it was picked from. Scalars are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectivityProfile {
    pub narrative_style: NarrativeStyle,
    pub emotional_expression: EmotionalExpression,
    pub temporal_orientation: TemporalFocus,
    pub self_reference: SelfReference,
    pub complexity: Complexity,
    pub authenticity: Authenticity,
    pub rhythm: f64,
    pub reflection_depth: f64,
    pub expression_mode: Expression,
    pub uniqueness: f64,
}

/// Names of the entries of [`SubjectivityProfile::to_vector`], in order.
pub const PROFILE_VECTOR_NAMES: [&str; 10] = [
    "narrative_style",
    "emotional_intensity",
    "temporal_orientation",
    "self_reference",
    "complexity",
    "authenticity",
    "rhythm",
    "reflection_depth",
    "expression_mode",
    "uniqueness",
];

impl SubjectivityProfile {
    /// The scalar features as a fixed-length vector for similarity search.
    pub fn to_vector(&self) -> [f64; 10] {
        [
            self.narrative_style.score,
            self.emotional_expression.intensity,
            self.temporal_orientation.score,
            self.self_reference.score,
            self.complexity.score,
            self.authenticity.score,
            self.rhythm,
            self.reflection_depth,
            self.expression_mode.score,
            self.uniqueness,
        ]
    }
}

impl Default for SubjectivityProfile {
    fn default() -> Self {
        DEFAULT_PROFILE
    }
}

/// Profile of a subject with no text, no embedding and no emotion scores.
pub const DEFAULT_PROFILE: SubjectivityProfile = SubjectivityProfile {
    narrative_style: NarrativeStyle {
        kind: NarrativeType::Conversational,
        score: 0.5,
    },
    emotional_expression: EmotionalExpression {
        level: EmotionLevel::Moderate,
        intensity: 0.5,
    },
    temporal_orientation: TemporalFocus {
        orientation: TemporalOrientation::Present,
        score: 0.5,
    },
    self_reference: SelfReference {
        level: SelfReferenceLevel::Moderate,
        score: 0.5,
    },
    complexity: Complexity {
        level: ComplexityLevel::Moderate,
        score: 0.5,
    },
    authenticity: Authenticity {
        style: AuthenticityStyle::Casual,
        score: 0.5,
    },
    rhythm: 0.5,
    reflection_depth: 0.0,
    expression_mode: Expression {
        mode: ExpressionMode::Balanced,
        score: 0.5,
    },
    uniqueness: 0.0,
};
