//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.

pub mod field_pipeline;

pub use field_pipeline::{FieldRenderState, FieldUniform};

use crate::sim::GeometryState;

/// Anything that can draw a frame of the match.
///
/// Called once per frame before the simulation step. Failures are the sink's
/// own business; the simulation never sees them.
pub trait RenderSink {
    fn render(&mut self, state: &GeometryState);
}
