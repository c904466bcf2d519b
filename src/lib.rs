//! # isotype
//!
//! Glyph generation and layout engine for interview-subject isotypes.
//!
//! Every participant becomes a circular glyph individualized by features
//! extracted from their interview text, embedding and emotion scores.
//! Similar participants are linked by a sparse similarity graph, and
//! connected groups are drawn together behind an organic fusion shape.
//!
//! ```text
//! records ─ dataset ─ Subject ─ subjectivity ─ glyph ─ outline
//!                        │
//!                        └─ similarity ─ edges ─ cluster ─ fusion shape
//! ```
//!
//! All geometry is seeded: the same input always produces the same plan.

pub mod cluster;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod noise;
pub mod render;
pub mod server;
pub mod similarity;
pub mod subject;
pub mod subjectivity;

pub use cluster::{Cluster, FusionShape};
pub use config::IsotypeConfig;
pub use error::IsotypeError;
pub use geometry::{OutlinePoint, Point};
pub use glyph::{GlyphSignature, GlyphSynthesizer};
pub use noise::NoiseField;
pub use render::{render_plan, RenderPlan, RenderState};
pub use similarity::{SimilarityEdge, SimilarityGraphBuilder};
pub use subject::{Dimension, RawSubject, Subject};
pub use subjectivity::SubjectivityProfile;

/// Library version.
pub const VERSION: &str = "0.4.0";
