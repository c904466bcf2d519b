//! Cluster detection over the similarity graph and the fusion shapes drawn
//! behind each cluster.

pub mod detect;
pub mod fusion;

pub use detect::{bounds, components, detect, Cluster, RADIUS_PADDING};
pub use fusion::{fuse, gradient_stops, FusionMember, FusionShape, GradientStop};
