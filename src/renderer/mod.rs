//! WebGPU rendering module
//!
//! The sim hands over screen-space quads; this module colors, tessellates and
//! draws them in order with a flat-color pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
