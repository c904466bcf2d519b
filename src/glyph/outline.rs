//! Closed glyph boundaries from a signature.

use std::f64::consts::{FRAC_PI_4, TAU};

use crate::geometry::{OutlinePoint, Point};
use crate::noise::NoiseField;

use super::signature::GlyphSignature;

/// Vertices per glyph outline.
pub const OUTLINE_POINTS: usize = 32;

/// Smallest radius factor any vertex may shrink to.
const MIN_RADIUS_FACTOR: f64 = 0.5;

/// Noise sampling radius on the unit circle.
const NOISE_SCALE: f64 = 1.5;

/// Boundary vertices at evenly spaced angles, in increasing angle order
/// starting at 0.
///
/// `organic_noise` scales a seeded noise term relative to the deformation;
/// with 0 the outline is purely sinusoidal.
pub fn outline(
    noise: &NoiseField,
    center: Point,
    radius: f64,
    signature: &GlyphSignature,
    octaves: u32,
    organic_noise: f64,
) -> Vec<OutlinePoint> {
    let shape = &signature.shape_deformation;

    (0..OUTLINE_POINTS)
        .map(|i| {
            let angle = i as f64 * TAU / OUTLINE_POINTS as f64;
            let (sin, cos) = angle.sin_cos();

            let regularity_term = (4.0 * angle).sin() * (1.0 - shape.regularity) * 0.1;
            let deformation_term = (3.0 * angle + FRAC_PI_4).sin() * shape.deformation;
            let asymmetry_term = (2.0 * angle).sin() * shape.asymmetry;
            let organic_term = if organic_noise != 0.0 {
                noise.sample(cos * NOISE_SCALE, sin * NOISE_SCALE, signature.seed, octaves)
                    * shape.deformation
                    * organic_noise
            } else {
                0.0
            };

            let factor = (1.0 + regularity_term + deformation_term + asymmetry_term + organic_term)
                .max(MIN_RADIUS_FACTOR);
            let distance = radius * factor;

            OutlinePoint {
                angle,
                x: center.x + cos * distance,
                y: center.y + sin * distance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::signature::from_profile;
    use crate::subjectivity::DEFAULT_PROFILE;

    #[test]
    fn test_point_count_and_order() {
        let sig = from_profile(&DEFAULT_PROFILE, 10.0, 99);
        let points = outline(&NoiseField::new(), Point::new(5.0, 5.0), 10.0, &sig, 3, 0.3);
        assert_eq!(points.len(), OUTLINE_POINTS);
        assert_eq!(points[0].angle, 0.0);
        for pair in points.windows(2) {
            assert!(pair[1].angle > pair[0].angle);
        }
        assert!(points[OUTLINE_POINTS - 1].angle < TAU);
    }

    #[test]
    fn test_sinusoidal_formula_without_noise() {
        let sig = from_profile(&DEFAULT_PROFILE, 10.0, 99);
        let points = outline(&NoiseField::new(), Point::new(0.0, 0.0), 10.0, &sig, 3, 0.0);
        let shape = sig.shape_deformation;
        for p in &points {
            let expected = 10.0
                * (1.0
                    + (4.0 * p.angle).sin() * (1.0 - shape.regularity) * 0.1
                    + (3.0 * p.angle + FRAC_PI_4).sin() * shape.deformation
                    + (2.0 * p.angle).sin() * shape.asymmetry);
            let actual = (p.x * p.x + p.y * p.y).sqrt();
            assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_undeformed_glyph_is_circle() {
        let mut sig = from_profile(&DEFAULT_PROFILE, 10.0, 1);
        sig.shape_deformation.regularity = 1.0;
        sig.shape_deformation.deformation = 0.0;
        sig.shape_deformation.asymmetry = 0.0;
        let points = outline(&NoiseField::new(), Point::new(2.0, -3.0), 4.0, &sig, 3, 0.3);
        for p in &points {
            let d = Point::new(p.x, p.y).distance(&Point::new(2.0, -3.0));
            assert!((d - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_outline_is_deterministic() {
        let sig = from_profile(&DEFAULT_PROFILE, 10.0, 4242);
        let a = outline(&NoiseField::new(), Point::new(1.0, 1.0), 12.0, &sig, 3, 0.3);
        let b = outline(NoiseField::shared(), Point::new(1.0, 1.0), 12.0, &sig, 3, 0.3);
        let bits = |pts: &[OutlinePoint]| -> Vec<(u64, u64)> {
            pts.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_extreme_deformation_is_floored() {
        let mut sig = from_profile(&DEFAULT_PROFILE, 10.0, 1);
        sig.shape_deformation.deformation = 5.0;
        let points = outline(&NoiseField::new(), Point::default(), 10.0, &sig, 3, 0.0);
        for p in &points {
            assert!((p.x * p.x + p.y * p.y).sqrt() >= 5.0 - 1e-9);
        }
    }
}
