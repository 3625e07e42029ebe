//! Road simulation module
//!
//! Track generation, kinematics and projection. No rendering backend or
//! platform dependencies: the render pass emits screen-space quads only.

pub mod project;
pub mod state;
pub mod tick;
pub mod track;

pub use project::{CameraOffset, DrawList, Quad, QuadKind, project, render, render_into};
pub use state::{ProjectedPoint, Segment, SegmentPoint, Stripe, Viewport, WorldState};
pub use tick::{Keys, update};
pub use track::{Track, TrackBuilder};
