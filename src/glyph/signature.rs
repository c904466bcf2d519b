//! Mapping from subjectivity features to visual glyph parameters.

use serde::{Deserialize, Serialize};

use crate::color::ColorAdjustment;
use crate::subject::Subject;
use crate::subjectivity::{
    AuthenticityStyle, ComplexityLevel, EmotionLevel, ExpressionMode, NarrativeType,
    SubjectivityProfile,
};

/// Every glyph starts from the same base shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseShape {
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Simple,
    Moderate,
    Layered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDeformation {
    pub regularity: f64,
    pub deformation: f64,
    pub asymmetry: f64,
}

/// Parameters for the renderer's internal texture. The engine never draws it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalPattern {
    pub density: f64,
    pub pattern_type: PatternType,
    pub complexity: f64,
    pub reflection_depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeCharacteristics {
    pub sharpness: f64,
    pub regularity: f64,
    pub thickness: f64,
}

/// Visual parameters of one subject's glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphSignature {
    pub base_shape: BaseShape,
    pub base_size: f64,
    pub seed: u64,
    pub shape_deformation: ShapeDeformation,
    pub internal_pattern: InternalPattern,
    pub edge_characteristics: EdgeCharacteristics,
    pub color_adjustment: ColorAdjustment,
}

/// Signature of a subject. Pure: same subject, same signature.
pub fn signature(subject: &Subject) -> GlyphSignature {
    from_profile(&subject.profile, subject.base_size, subject.seed)
}

pub fn from_profile(profile: &SubjectivityProfile, base_size: f64, seed: u64) -> GlyphSignature {
    GlyphSignature {
        base_shape: BaseShape::Circle,
        base_size,
        seed,
        shape_deformation: ShapeDeformation {
            regularity: regularity(profile.narrative_style.kind),
            deformation: deformation(profile.emotional_expression.level),
            asymmetry: 0.05 + profile.uniqueness * 0.1,
        },
        internal_pattern: InternalPattern {
            density: pattern_density(profile.complexity.level),
            pattern_type: pattern_type(profile.reflection_depth),
            complexity: profile.complexity.score,
            reflection_depth: profile.reflection_depth,
        },
        edge_characteristics: EdgeCharacteristics {
            sharpness: edge_sharpness(profile.authenticity.style),
            regularity: edge_regularity(profile.expression_mode.mode),
            thickness: 1.0 + profile.self_reference.score * 1.5,
        },
        color_adjustment: ColorAdjustment::with_opacity(opacity(
            profile.emotional_expression.intensity,
        )),
    }
}

fn regularity(kind: NarrativeType) -> f64 {
    match kind {
        NarrativeType::Direct => 0.9,
        NarrativeType::Reflective => 0.6,
        NarrativeType::Metaphorical => 0.5,
        NarrativeType::Conversational => 0.8,
    }
}

fn deformation(level: EmotionLevel) -> f64 {
    match level {
        EmotionLevel::Intense => 0.25,
        EmotionLevel::Expressive => 0.18,
        EmotionLevel::Reserved => 0.05,
        EmotionLevel::Moderate => 0.1,
    }
}

fn pattern_type(reflection_depth: f64) -> PatternType {
    if reflection_depth > 0.7 {
        PatternType::Layered
    } else if reflection_depth > 0.4 {
        PatternType::Moderate
    } else {
        PatternType::Simple
    }
}

fn pattern_density(level: ComplexityLevel) -> f64 {
    match level {
        ComplexityLevel::Complex => 0.6,
        ComplexityLevel::Moderate => 0.4,
        ComplexityLevel::Simple => 0.2,
    }
}

fn edge_sharpness(style: AuthenticityStyle) -> f64 {
    match style {
        AuthenticityStyle::Formal => 0.8,
        AuthenticityStyle::Intimate => 0.3,
        AuthenticityStyle::Casual => 0.5,
    }
}

fn edge_regularity(mode: ExpressionMode) -> f64 {
    match mode {
        ExpressionMode::Direct => 0.9,
        ExpressionMode::Indirect => 0.5,
        ExpressionMode::Balanced => 0.7,
    }
}

/// Opacity in [0.7, 0.95] by emotional intensity.
fn opacity(intensity: f64) -> f64 {
    0.7 + intensity.clamp(0.0, 1.0) * 0.25
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::subjectivity::{
        Authenticity, EmotionalExpression, Expression, NarrativeStyle, DEFAULT_PROFILE,
    };

    #[test]
    fn test_default_profile_signature() {
        let sig = from_profile(&DEFAULT_PROFILE, 10.0, 1);
        assert_eq!(sig.base_shape, BaseShape::Circle);
        assert_eq!(sig.shape_deformation.regularity, 0.8);
        assert_eq!(sig.shape_deformation.deformation, 0.1);
        assert_eq!(sig.internal_pattern.pattern_type, PatternType::Simple);
        assert_eq!(sig.internal_pattern.density, 0.4);
        assert_eq!(sig.edge_characteristics.sharpness, 0.5);
        assert_eq!(sig.edge_characteristics.regularity, 0.7);
        assert!((sig.color_adjustment.opacity - 0.825).abs() < 1e-12);
    }

    #[test]
    fn test_narrative_and_emotion_mapping() {
        let mut profile = DEFAULT_PROFILE;
        profile.narrative_style = NarrativeStyle {
            kind: NarrativeType::Direct,
            score: 1.0,
        };
        profile.emotional_expression = EmotionalExpression {
            level: EmotionLevel::Intense,
            intensity: 1.0,
        };
        profile.reflection_depth = 0.8;
        profile.authenticity = Authenticity {
            style: AuthenticityStyle::Formal,
            score: 1.0,
        };
        profile.expression_mode = Expression {
            mode: ExpressionMode::Direct,
            score: 1.0,
        };

        let sig = from_profile(&profile, 10.0, 1);
        assert_eq!(sig.shape_deformation.regularity, 0.9);
        assert_eq!(sig.shape_deformation.deformation, 0.25);
        assert_eq!(sig.internal_pattern.pattern_type, PatternType::Layered);
        assert_eq!(sig.edge_characteristics.sharpness, 0.8);
        assert_eq!(sig.edge_characteristics.regularity, 0.9);
        assert!((sig.color_adjustment.opacity - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_pattern_type_thresholds() {
        assert_eq!(pattern_type(0.4), PatternType::Simple);
        assert_eq!(pattern_type(0.41), PatternType::Moderate);
        assert_eq!(pattern_type(0.7), PatternType::Moderate);
        assert_eq!(pattern_type(0.71), PatternType::Layered);
    }

    #[test]
    fn test_intensity_only_changes_opacity() {
        let base = Rgb::new(0x9b, 0x59, 0xb6);
        let mut calm = DEFAULT_PROFILE;
        calm.emotional_expression.intensity = 0.1;
        let mut heated = DEFAULT_PROFILE;
        heated.emotional_expression.intensity = 0.9;

        let a = from_profile(&calm, 10.0, 3).color_adjustment;
        let b = from_profile(&heated, 10.0, 3).color_adjustment;
        assert_ne!(a.opacity, b.opacity);
        assert_eq!(a.hue_shift, b.hue_shift);
        assert_eq!(a.saturation_scale, b.saturation_scale);
        assert_eq!(a.brightness_scale, b.brightness_scale);
        assert_eq!(a.apply(base).rgb(), base);
        assert_eq!(b.apply(base).rgb(), base);
    }

    #[test]
    fn test_opacity_range() {
        assert_eq!(opacity(0.0), 0.7);
        assert!((opacity(1.0) - 0.95).abs() < 1e-12);
        assert_eq!(opacity(7.0), opacity(1.0));
    }
}
