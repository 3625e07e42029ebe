//! World state and core track types
//!
//! Everything the update and render passes touch lives in one owned
//! `WorldState`. Projection fields on segment points are scratch space,
//! overwritten every render.

use glam::Vec3;

use super::track::Track;
use crate::tuning::Tuning;
use crate::{lerp, ring_index, wrap_position};

/// A segment edge after perspective projection (screen pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Perspective divide factor (camera_depth / camera.z)
    pub scale: f32,
    /// Road half-width at this depth
    pub w: f32,
}

/// One edge of a segment in all three coordinate spaces
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentPoint {
    pub world: Vec3,
    /// World minus camera offset (recomputed per frame)
    pub camera: Vec3,
    /// Projected screen position (recomputed per frame)
    pub screen: ProjectedPoint,
}

impl SegmentPoint {
    pub fn at(z: f32, y: f32) -> Self {
        Self {
            world: Vec3::new(0.0, y, z),
            ..Default::default()
        }
    }
}

/// Alternating color band, switches every `rumble_length` segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stripe {
    Light,
    Dark,
}

/// One fixed-length slice of track
#[derive(Debug, Clone)]
pub struct Segment {
    pub index: usize,
    /// Bend contributed by this segment (accumulated into horizontal offset)
    pub curve: f32,
    /// Near edge
    pub p1: SegmentPoint,
    /// Far edge
    pub p2: SegmentPoint,
}

impl Segment {
    pub fn stripe(&self, rumble_length: usize) -> Stripe {
        if (self.index / rumble_length.max(1)) % 2 == 0 {
            Stripe::Light
        } else {
            Stripe::Dark
        }
    }
}

/// Drawing surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct WorldState {
    pub tuning: Tuning,
    pub segments: Vec<Segment>,
    /// Camera Z along the track, in [0, track_length)
    pub position: f32,
    /// Forward speed, in [0, max_speed]
    pub speed: f32,
    /// Lateral offset; the road spans [-1, 1]
    pub player_x: f32,
    /// Seconds driven this run
    pub elapsed: f32,
    /// Total distance driven, ignoring lap wraparound
    pub odometer: f32,
}

impl WorldState {
    /// Fresh run on the default looped track
    pub fn new(tuning: Tuning) -> Self {
        let track = Track::default_loop(&tuning);
        Self::with_track(tuning, track)
    }

    /// Fresh run on a caller-built track
    pub fn with_track(tuning: Tuning, track: Track) -> Self {
        let segments = track.into_segments();
        debug_assert!(!segments.is_empty(), "track must have at least one segment");
        log::info!(
            "Track ready: {} segments, length {}",
            segments.len(),
            segments.len() as f32 * tuning.segment_length
        );
        Self {
            tuning,
            segments,
            position: 0.0,
            speed: 0.0,
            player_x: 0.0,
            elapsed: 0.0,
            odometer: 0.0,
        }
    }

    /// Throw away the run and start over on the same track
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.speed = 0.0;
        self.player_x = 0.0;
        self.elapsed = 0.0;
        self.odometer = 0.0;
    }

    #[inline]
    pub fn track_length(&self) -> f32 {
        self.segments.len() as f32 * self.tuning.segment_length
    }

    /// Index of the segment containing a track position (wraps both ways)
    pub fn segment_index_at(&self, position: f32) -> usize {
        let index = (position / self.tuning.segment_length).floor() as isize;
        ring_index(index, self.segments.len())
    }

    pub fn segment_at(&self, position: f32) -> &Segment {
        &self.segments[self.segment_index_at(position)]
    }

    /// Road elevation under a track position, interpolated inside its segment
    pub fn elevation_at(&self, position: f32) -> f32 {
        let position = wrap_position(position, self.track_length());
        let segment = self.segment_at(position);
        let percent = (position % self.tuning.segment_length) / self.tuning.segment_length;
        lerp(segment.p1.world.y, segment.p2.world.y, percent)
    }

    /// Fraction of max speed, used by steering and centrifugal force
    #[inline]
    pub fn speed_percent(&self) -> f32 {
        self.speed / self.tuning.max_speed
    }

    #[inline]
    pub fn is_off_road(&self) -> bool {
        self.player_x.abs() > 1.0
    }
}
