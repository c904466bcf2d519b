//! Organic fusion shapes behind detected clusters.
//!
//! A fusion shape is the cluster circle perturbed by seeded noise, filled
//! with a radial gradient blended from the member colors.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::geometry::{OutlinePoint, Point};
use crate::noise::NoiseField;
use crate::subject::Subject;

use super::detect::Cluster;

/// Vertices per fusion outline.
pub const FUSION_POINTS: usize = 32;
/// Base radius multiplier before noise.
const RADIUS_BASE: f64 = 0.94;
const FUSION_OCTAVES: u32 = 3;
const MAX_STOPS: usize = 5;
const CENTER_OPACITY: f64 = 0.6;
const EDGE_OPACITY: f64 = 0.15;

/// What the fusion synthesizer needs to know about one cluster member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionMember {
    pub id_numeric: u64,
    pub semantic_sum: f64,
    pub max_emotion: f64,
    pub color: Rgb,
}

impl From<&Subject> for FusionMember {
    fn from(subject: &Subject) -> Self {
        Self {
            id_numeric: subject.id_numeric,
            semantic_sum: subject.semantic_sum(),
            max_emotion: subject.max_emotion(),
            color: subject.base_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// 0 at the center, 1 at the rim.
    pub offset: f64,
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionShape {
    pub center: Point,
    pub radius: f64,
    pub seed: u64,
    pub softness: f64,
    pub outline: Vec<OutlinePoint>,
    pub stops: Vec<GradientStop>,
}

/// Seed over the members: Σ (id×100 + ⌊semantic sum×100⌋) × (index+1).
pub fn fusion_seed(members: &[FusionMember]) -> u64 {
    members
        .iter()
        .enumerate()
        .fold(0i64, |acc, (index, m)| {
            let term = (m.id_numeric as i64)
                .wrapping_mul(100)
                .wrapping_add((m.semantic_sum * 100.0).floor() as i64);
            acc.wrapping_add(term.wrapping_mul(index as i64 + 1))
        }) as u64
}

/// `0.12 + mean(max emotion) × 0.1`.
pub fn softness(members: &[FusionMember]) -> f64 {
    if members.is_empty() {
        return 0.12;
    }
    let avg = members.iter().map(|m| m.max_emotion).sum::<f64>() / members.len() as f64;
    0.12 + avg * 0.1
}

/// Build the fusion shape of `cluster` from its members (in member order).
pub fn fuse(
    noise: &NoiseField,
    cluster: &Cluster,
    members: &[FusionMember],
    base_opacity: f64,
) -> FusionShape {
    let seed = fusion_seed(members);
    let softness = softness(members);
    let center = cluster.center;

    let outline = (0..FUSION_POINTS)
        .map(|i| {
            let angle = i as f64 * TAU / FUSION_POINTS as f64;
            let (sin, cos) = angle.sin_cos();
            let n = noise.sample(cos * 2.0, sin * 2.0, seed, FUSION_OCTAVES);
            let r = cluster.radius * (RADIUS_BASE + n * softness);
            OutlinePoint {
                angle,
                x: center.x + cos * r,
                y: center.y + sin * r,
            }
        })
        .collect();

    let colors: Vec<Rgb> = members.iter().map(|m| m.color).collect();

    FusionShape {
        center,
        radius: cluster.radius,
        seed,
        softness,
        outline,
        stops: gradient_stops(&colors, base_opacity),
    }
}

/// Radial gradient stops from the member colors, fading toward the rim.
pub fn gradient_stops(colors: &[Rgb], base_opacity: f64) -> Vec<GradientStop> {
    let opacity_at = |offset: f64| {
        base_opacity * (CENTER_OPACITY - (CENTER_OPACITY - EDGE_OPACITY) * offset)
    };

    match colors {
        [] => Vec::new(),
        [only] => [0.0, 0.5, 1.0]
            .iter()
            .map(|&offset| GradientStop {
                offset,
                color: *only,
                opacity: opacity_at(offset),
            })
            .collect(),
        [first, second] => vec![
            GradientStop {
                offset: 0.0,
                color: *first,
                opacity: opacity_at(0.0),
            },
            GradientStop {
                offset: 1.0,
                color: *second,
                opacity: opacity_at(1.0),
            },
        ],
        _ => {
            let count = colors.len().min(MAX_STOPS);
            let last = (count - 1) as f64;
            (0..count)
                .map(|s| {
                    let offset = s as f64 / last;
                    let index = (s as f64 * (colors.len() - 1) as f64 / last).round() as usize;
                    GradientStop {
                        offset,
                        color: colors[index],
                        opacity: opacity_at(offset),
                    }
                })
                .collect()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
