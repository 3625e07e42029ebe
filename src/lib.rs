//! Retro Racer - a pseudo-3D scanline road racer
//!
//! Core modules:
//! - `sim`: Track, kinematics and road projection (no platform dependencies)
//! - `frame_loop`: Clocked update-then-render driver with an active flag
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven calibration constants
//! - `settings`: Player preferences
//! - `hud`: Speed / distance / time readout

pub mod frame_loop;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(not(target_arch = "wasm32"))]
pub use frame_loop::InstantClock;
pub use frame_loop::{Clock, FrameLoop, FrameReport, ManualClock};
pub use hud::HudReadout;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the update step (seconds).
    /// A backgrounded tab can hand back a multi-second gap.
    pub const MAX_FRAME_DT: f32 = 1.0;

    /// Rumble strip width as a fraction of the road half-width
    pub const RUMBLE_WIDTH_FRACTION: f32 = 0.15;
    /// Center lane marking width as a fraction of the road half-width
    pub const LANE_WIDTH_FRACTION: f32 = 0.05;

    /// Player car footprint as fractions of the viewport
    pub const PLAYER_WIDTH_FRACTION: f32 = 0.16;
    pub const PLAYER_HEIGHT_FRACTION: f32 = 0.09;
    /// Gap between the car's bottom edge and the bottom of the viewport
    pub const PLAYER_BOTTOM_MARGIN_FRACTION: f32 = 0.04;
}

/// Wrap a (possibly negative) index onto a ring of `len` slots
#[inline]
pub fn ring_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as isize) as usize
}

/// Wrap a track position into [0, length)
#[inline]
pub fn wrap_position(position: f32, length: f32) -> f32 {
    let wrapped = position.rem_euclid(length);
    // rem_euclid can round up to `length` for tiny negative inputs
    if wrapped >= length { 0.0 } else { wrapped }
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_index_negative() {
        assert_eq!(ring_index(-1, 10), 9);
        assert_eq!(ring_index(-21, 10), 9);
        assert_eq!(ring_index(25, 10), 5);
        assert_eq!(ring_index(0, 10), 0);
    }

    #[test]
    fn test_wrap_position() {
        assert_eq!(wrap_position(1050.0, 1000.0), 50.0);
        assert_eq!(wrap_position(-50.0, 1000.0), 950.0);
        assert_eq!(wrap_position(3000.0, 1000.0), 0.0);
        let tiny = wrap_position(-1.0e-9, 1000.0);
        assert!((0.0..1000.0).contains(&tiny));
    }
}
