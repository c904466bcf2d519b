//! Glyph geometry — subjectivity features to a per-subject signature and a
//! closed organic outline.
//!
//! ```text
//! Subject ─ signature() ─ GlyphSignature ─ outline(center, radius) ─ 32 points
//! ```
//!
//! Outlines are pure functions of the signature (which carries the subject
//! seed) and the caller-supplied center and radius.

pub mod outline;
pub mod signature;

pub use outline::OUTLINE_POINTS;
pub use signature::{
    BaseShape, EdgeCharacteristics, GlyphSignature, InternalPattern, PatternType,
    ShapeDeformation,
};

use crate::config::IsotypeConfig;
use crate::geometry::{OutlinePoint, Point};
use crate::noise::NoiseField;
use crate::subject::Subject;

/// Builds glyph signatures and outlines with a shared noise field.
#[derive(Debug, Clone, Copy)]
pub struct GlyphSynthesizer<'a> {
    noise: &'a NoiseField,
    octaves: u32,
    organic_noise: f64,
}

impl<'a> GlyphSynthesizer<'a> {
    pub fn new(noise: &'a NoiseField, config: &IsotypeConfig) -> Self {
        Self {
            noise,
            octaves: config.noise_octaves,
            organic_noise: config.organic_noise,
        }
    }

    pub fn signature(&self, subject: &Subject) -> GlyphSignature {
        signature::signature(subject)
    }

    pub fn outline(
        &self,
        center: Point,
        radius: f64,
        signature: &GlyphSignature,
    ) -> Vec<OutlinePoint> {
        outline::outline(
            self.noise,
            center,
            radius,
            signature,
            self.octaves,
            self.organic_noise,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::RawSubject;

    #[test]
    fn test_subject_to_outline_is_reproducible() {
        let config = IsotypeConfig::default();
        let raw = RawSubject {
            id: Some("P12".to_string()),
            text_content: Some(
                "Honestly I was terrified. Looking back, I think it made me who I am.".to_string(),
            ),
            embedding: Some(vec![0.12, -0.4, 0.33, 0.05]),
            ..Default::default()
        };

        let run = || {
            let subject = Subject::from_raw(raw.clone(), &config).unwrap();
            let synth = GlyphSynthesizer::new(NoiseField::shared(), &config);
            let sig = synth.signature(&subject);
            synth.outline(Point::new(100.0, 80.0), sig.base_size, &sig)
        };

        let a = run();
        let b = run();
        assert_eq!(a.len(), OUTLINE_POINTS);
        assert_eq!(a, b);
    }
}
