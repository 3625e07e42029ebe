//! HUD readout
//!
//! Presentation only; nothing here feeds back into the simulation.

use std::fmt;

use crate::sim::WorldState;

/// Scale from world speed to the displayed (arbitrary) speed unit
const SPEED_DISPLAY_DIVISOR: f32 = 100.0;

/// The three HUD values, ready to display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout {
    /// Displayed speed
    pub speed: u32,
    /// Segments driven this run
    pub distance: u32,
    /// Seconds driven this run
    pub elapsed: f32,
}

impl HudReadout {
    pub fn from_state(state: &WorldState) -> Self {
        Self {
            speed: (state.speed / SPEED_DISPLAY_DIVISOR).round() as u32,
            distance: (state.odometer / state.tuning.segment_length).round() as u32,
            elapsed: state.elapsed,
        }
    }

    pub fn speed_text(&self) -> String {
        self.speed.to_string()
    }

    pub fn distance_text(&self) -> String {
        self.distance.to_string()
    }

    pub fn time_text(&self) -> String {
        format!("{:.2}", self.elapsed)
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed {} | distance {} | time {}",
            self.speed_text(),
            self.distance_text(),
            self.time_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_readout_scaling() {
        let mut state = WorldState::new(Tuning::default());
        state.speed = 6049.0;
        state.odometer = 1030.0;
        state.elapsed = 7.256;
        let hud = HudReadout::from_state(&state);
        assert_eq!(hud.speed, 60);
        assert_eq!(hud.distance, 5);
        assert_eq!(hud.time_text(), "7.26");
    }

    #[test]
    fn test_display_line() {
        let hud = HudReadout {
            speed: 120,
            distance: 42,
            elapsed: 7.0,
        };
        assert_eq!(hud.to_string(), "speed 120 | distance 42 | time 7.00");
    }
}
