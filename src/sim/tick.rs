//! Per-frame camera and player kinematics
//!
//! Variable timestep: the caller hands in wall-clock `dt`, clamped here.

use super::state::WorldState;
use crate::consts::MAX_FRAME_DT;
use crate::wrap_position;

bitflags::bitflags! {
    /// Held direction keys, sampled once per update
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Keys {
    /// Map a browser `KeyboardEvent.key` value to a direction
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Keys::UP),
            "ArrowDown" | "s" | "S" => Some(Keys::DOWN),
            "ArrowLeft" | "a" | "A" => Some(Keys::LEFT),
            "ArrowRight" | "d" | "D" => Some(Keys::RIGHT),
            _ => None,
        }
    }
}

/// Advance the world by one frame of `dt` seconds
pub fn update(state: &mut WorldState, keys: Keys, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let tuning = &state.tuning;

    // Throttle
    if keys.contains(Keys::UP) {
        state.speed += tuning.accel * dt;
    } else if keys.contains(Keys::DOWN) {
        state.speed -= tuning.braking * dt;
    } else {
        state.speed -= tuning.decel * dt;
    }
    state.speed = state.speed.clamp(0.0, tuning.max_speed);

    // Advance along the ring
    let track_length = state.track_length();
    state.position = wrap_position(state.position + state.speed * dt, track_length);
    let curve = state.segment_at(state.position).curve;

    // Steering authority scales with speed
    let speed_percent = state.speed_percent();
    let dx = dt * state.tuning.steer_authority * speed_percent;
    if keys.contains(Keys::LEFT) {
        state.player_x -= dx;
    } else if keys.contains(Keys::RIGHT) {
        state.player_x += dx;
    }

    // Bends fling the car toward the outside
    state.player_x -= dx * speed_percent * curve * state.tuning.centrifugal;

    // Grass drag
    if state.is_off_road() && state.speed > state.tuning.off_road_decel {
        state.speed -= state.tuning.off_road_decel;
    }

    state.elapsed += dt;
    state.odometer += state.speed * dt;
}
