//! Frame driver
//!
//! One `step` is one host frame: exactly one update followed by one render.
//! The host (requestAnimationFrame, a native timer, a test) decides when to
//! call it; the loop only measures time and honours the `active` flag.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::consts::MAX_FRAME_DT;
use crate::sim::{DrawList, Keys, Viewport, WorldState, render_into, update};

/// Monotonic time source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by `std::time::Instant` (unavailable in the browser,
/// where rAF timestamps feed a [`ManualClock`] instead)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock fed by the host (rAF timestamps, fixed steps in tests)
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: Cell<f64>,
}

impl ManualClock {
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds: Cell::new(seconds),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}

/// Summary of one stepped frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Delta fed to the update, after clamping
    pub dt: f32,
    /// Segments that survived clipping
    pub visible_segments: usize,
}

/// Update-then-render driver with a run flag
#[derive(Debug, Default)]
pub struct FrameLoop {
    active: bool,
    last_time: Option<f64>,
    draw_list: DrawList,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start (or resume) stepping. The first frame after this sees dt = 0.
    pub fn start(&mut self) {
        if !self.active {
            log::info!("Frame loop started");
        }
        self.active = true;
        self.last_time = None;
    }

    /// Stop stepping; the host should stop re-arming its frame callback
    pub fn stop(&mut self) {
        if self.active {
            log::info!("Frame loop stopped");
        }
        self.active = false;
        self.last_time = None;
    }

    pub fn toggle(&mut self) {
        if self.active { self.stop() } else { self.start() }
    }

    /// Quads produced by the most recent step
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Run one frame. Returns `None` without touching the world when stopped.
    pub fn step(
        &mut self,
        clock: &impl Clock,
        world: &mut WorldState,
        keys: Keys,
        viewport: Viewport,
    ) -> Option<FrameReport> {
        if !self.active {
            return None;
        }

        let now = clock.now();
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now);

        update(world, keys, dt);
        render_into(world, viewport, &mut self.draw_list);

        Some(FrameReport {
            dt,
            visible_segments: self.draw_list.visible.len(),
        })
    }
}
