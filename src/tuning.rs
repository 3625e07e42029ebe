//! Data-driven calibration constants
//!
//! The steering and centrifugal factors are tuned by feel. Keep them as
//! calibration values rather than deriving them from physics.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Every tunable number the simulation and projector read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World length of one track segment
    pub segment_length: f32,
    /// Segments per stripe (road/rumble coloring alternates at this cadence)
    pub rumble_length: usize,
    /// Road half-width in world units
    pub road_width: f32,
    /// Camera height above the road surface
    pub camera_height: f32,
    /// Horizontal field of view (degrees)
    pub field_of_view: f32,
    /// Segments projected ahead of the camera
    pub draw_distance: usize,

    /// Top speed (world units / second)
    pub max_speed: f32,
    /// Throttle acceleration (units / s²)
    pub accel: f32,
    /// Brake deceleration (units / s²)
    pub braking: f32,
    /// Coasting deceleration (units / s²)
    pub decel: f32,
    /// Flat per-frame speed loss while off the road
    pub off_road_decel: f32,

    /// Lateral steering authority at full speed (road widths / s)
    pub steer_authority: f32,
    /// Pull toward the outside of a bend
    pub centrifugal: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        let max_speed = 12_000.0;
        Self {
            segment_length: 200.0,
            rumble_length: 3,
            road_width: 2000.0,
            camera_height: 1000.0,
            field_of_view: 100.0,
            draw_distance: 300,

            max_speed,
            accel: max_speed / 5.0,
            braking: max_speed,
            decel: max_speed / 5.0,
            off_road_decel: 300.0,

            steer_authority: 2.0,
            centrifugal: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("malformed tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the projector or kinematics cannot work with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.segment_length > 0.0,
            "segment_length must be positive (got {})",
            self.segment_length
        );
        ensure!(self.rumble_length > 0, "rumble_length must be at least 1");
        ensure!(self.road_width > 0.0, "road_width must be positive");
        ensure!(
            self.camera_height > 0.0,
            "camera_height must be positive (got {})",
            self.camera_height
        );
        ensure!(
            self.field_of_view > 0.0 && self.field_of_view < 180.0,
            "field_of_view must be in (0, 180) degrees (got {})",
            self.field_of_view
        );
        ensure!(self.draw_distance > 0, "draw_distance must be at least 1");
        ensure!(
            self.max_speed.is_finite() && self.max_speed > 0.0,
            "max_speed must be positive and finite"
        );
        ensure!(
            self.accel >= 0.0 && self.braking >= 0.0 && self.decel >= 0.0,
            "accel, braking and decel must not be negative"
        );
        ensure!(self.off_road_decel >= 0.0, "off_road_decel must not be negative");
        Ok(())
    }

    /// Focal depth of the pinhole camera: 1 / tan(fov / 2)
    pub fn camera_depth(&self) -> f32 {
        1.0 / (self.field_of_view.to_radians() / 2.0).tan()
    }
}
