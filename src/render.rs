//! Render plan assembly.
//!
//! The interaction layer owns positions and transient flags; they arrive
//! here as plain [`RenderState`] values. Everything returned is derived
//! data for a canvas or SVG renderer to draw.

use serde::{Deserialize, Serialize};

use crate::cluster::{detect, fuse, Cluster, FusionMember, FusionShape};
use crate::color::Rgba;
use crate::config::IsotypeConfig;
use crate::error::IsotypeError;
use crate::geometry::{OutlinePoint, Point};
use crate::glyph::{GlyphSignature, GlyphSynthesizer};
use crate::noise::NoiseField;
use crate::similarity::{node_degrees, SimilarityEdge, SimilarityGraphBuilder};
use crate::subject::Subject;

/// Radius multiplier for highlighted glyphs.
const HIGHLIGHT_SCALE: f64 = 1.2;

fn default_progress() -> f64 {
    1.0
}

/// Per-subject state owned by the interaction layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub position: Point,
    #[serde(default)]
    pub highlighted: bool,
    /// 0 while a glyph is appearing, 1 when settled.
    #[serde(default = "default_progress")]
    pub animation_progress: f64,
}

impl RenderState {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            highlighted: false,
            animation_progress: 1.0,
        }
    }

    /// Drawn radius for a glyph of `base_size`.
    pub fn radius(&self, base_size: f64) -> f64 {
        let scale = if self.highlighted { HIGHLIGHT_SCALE } else { 1.0 };
        base_size * scale * self.animation_progress.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphPlan {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub highlighted: bool,
    pub color: Rgba,
    pub signature: GlyphSignature,
    pub outline: Vec<OutlinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPlan {
    pub cluster: Cluster,
    /// Subject ids in member order.
    pub member_ids: Vec<String>,
    pub fusion: FusionShape,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub glyphs: Vec<GlyphPlan>,
    pub edges: Vec<SimilarityEdge>,
    pub clusters: Vec<ClusterPlan>,
    /// Incident edge count per subject.
    pub degrees: Vec<usize>,
}

/// Build glyphs, edges, clusters and degrees for `subjects` at `states`.
///
/// `states[i]` belongs to `subjects[i]`. The graph is built once at the
/// relaxed cluster threshold; only edges at or above `similarity_threshold`
/// are returned and counted in `degrees`.
pub fn render_plan(
    subjects: &[Subject],
    states: &[RenderState],
    config: &IsotypeConfig,
    noise: &NoiseField,
) -> Result<RenderPlan, IsotypeError> {
    if subjects.len() != states.len() {
        return Err(IsotypeError::PositionMismatch {
            subjects: subjects.len(),
            positions: states.len(),
        });
    }

    let synth = GlyphSynthesizer::new(noise, config);
    let glyphs = subjects
        .iter()
        .zip(states)
        .map(|(subject, state)| {
            let signature = synth.signature(subject);
            let radius = state.radius(signature.base_size);
            GlyphPlan {
                id: subject.id.clone(),
                center: state.position,
                radius,
                highlighted: state.highlighted,
                color: signature.color_adjustment.apply(subject.base_color),
                outline: synth.outline(state.position, radius, &signature),
                signature,
            }
        })
        .collect();

    // clusters may reach below the display threshold by `cluster_relaxation`
    let cluster_threshold = config.cluster_threshold();
    let candidate_edges = SimilarityGraphBuilder::new(config)
        .with_threshold(cluster_threshold)
        .build(subjects);
    let edges: Vec<SimilarityEdge> = candidate_edges
        .iter()
        .filter(|e| e.similarity >= config.similarity_threshold)
        .copied()
        .collect();
    let degrees = node_degrees(subjects.len(), &edges);

    let positions: Vec<Point> = states.iter().map(|s| s.position).collect();
    let clusters = detect(&positions, &candidate_edges, cluster_threshold)
        .into_iter()
        .map(|cluster| {
            let members: Vec<FusionMember> = cluster
                .members
                .iter()
                .map(|&i| FusionMember::from(&subjects[i]))
                .collect();
            let fusion = fuse(noise, &cluster, &members, config.fusion_base_opacity);
            ClusterPlan {
                member_ids: cluster.members.iter().map(|&i| subjects[i].id.clone()).collect(),
                cluster,
                fusion,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        subjects = subjects.len(),
        edges = edges.len(),
        clusters = clusters.len(),
        "Assembled render plan"
    );

    Ok(RenderPlan {
        glyphs,
        edges,
        clusters,
        degrees,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{Dimension, RawSubject};

    fn subjects(embeddings: &[Vec<f64>]) -> Vec<Subject> {
        let config = IsotypeConfig::default();
        embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let raw = RawSubject {
                    id: Some(format!("P{}", i + 1)),
                    text_content: Some("I remember the harbor. It felt like home.".to_string()),
                    embedding: Some(e.clone()),
                    ..Default::default()
                };
                Subject::from_raw(raw, &config).unwrap()
            })
            .collect()
    }

    fn states(n: usize) -> Vec<RenderState> {
        (0..n)
            .map(|i| RenderState::at(Point::new(i as f64 * 40.0, 100.0)))
            .collect()
    }

    #[test]
    fn test_position_mismatch() {
        let subjects = subjects(&[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let err = render_plan(
            &subjects,
            &states(1),
            &IsotypeConfig::default(),
            NoiseField::shared(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IsotypeError::PositionMismatch {
                subjects: 2,
                positions: 1
            }
        ));
    }

    #[test]
    fn test_plan_contents() {
        let subjects = subjects(&[
            vec![0.5, 0.5, 0.1],
            vec![0.5, 0.5, 0.1],
            vec![-0.9, 0.2, 0.0],
        ]);
        let config = IsotypeConfig::default();
        let plan = render_plan(&subjects, &states(3), &config, NoiseField::shared()).unwrap();

        assert_eq!(plan.glyphs.len(), 3);
        assert_eq!(plan.degrees.len(), 3);
        assert_eq!(plan.glyphs[1].center, Point::new(40.0, 100.0));
        assert!(plan.glyphs.iter().all(|g| g.outline.len() == 32));

        // the first two subjects are identical in every dimension
        assert_eq!(plan.clusters.len(), 1);
        assert_eq!(plan.clusters[0].member_ids, vec!["P1", "P2"]);
        assert!(plan.degrees[0] >= 1);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let subjects = subjects(&[vec![0.1, 0.9], vec![0.2, 0.8], vec![0.9, 0.1], vec![0.3, 0.7]]);
        let config = IsotypeConfig::default();
        let a = render_plan(&subjects, &states(4), &config, &NoiseField::new()).unwrap();
        let b = render_plan(&subjects, &states(4), &config, NoiseField::shared()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_state_radius() {
        let mut state = RenderState::at(Point::new(0.0, 0.0));
        assert_eq!(state.radius(10.0), 10.0);
        state.highlighted = true;
        assert!((state.radius(10.0) - 12.0).abs() < 1e-12);
        state.animation_progress = 0.5;
        assert!((state.radius(10.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_render_state_defaults_from_json() {
        let state: RenderState =
            serde_json::from_str(r#"{"position": {"x": 3.0, "y": 4.0}}"#).unwrap();
        assert!(!state.highlighted);
        assert_eq!(state.animation_progress, 1.0);
    }

    #[test]
    fn test_cluster_relaxation_admits_near_threshold_pairs() {
        // cosine of the first two is 0.68: below 0.7 but above 0.65
        let subjects = subjects(&[
            vec![1.0, 0.0],
            vec![0.68, (1.0f64 - 0.68 * 0.68).sqrt()],
            vec![-1.0, 0.0],
        ]);
        let relaxed = IsotypeConfig {
            dimension: Dimension::Semantic,
            ..IsotypeConfig::default()
        };
        let strict = IsotypeConfig {
            cluster_relaxation: 0.0,
            ..relaxed.clone()
        };

        let plan = render_plan(&subjects, &states(3), &relaxed, NoiseField::shared()).unwrap();
        assert!(plan.edges.is_empty());
        assert_eq!(plan.degrees, vec![0, 0, 0]);
        assert_eq!(plan.clusters.len(), 1);
        assert_eq!(plan.clusters[0].member_ids, vec!["P1", "P2"]);

        let plan = render_plan(&subjects, &states(3), &strict, NoiseField::shared()).unwrap();
        assert!(plan.clusters.is_empty());
    }
}
