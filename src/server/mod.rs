//! HTTP surface over the isotype engine.
//!
//! External renderers post participants and positions and get back glyph
//! outlines, similarity edges and cluster fusion shapes.
//!
//! # Endpoints
//!
//! - `GET  /health`  — Liveness probe
//! - `GET  /config`  — Active configuration
//! - `POST /profile` — Profile and glyph signature for one text
//! - `POST /render`  — Render plan for a frame

pub mod routes;

pub use routes::{app_router, AppState};
