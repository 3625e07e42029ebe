//! Track generation
//!
//! A track is a fixed ring of equal-length segments built once from a plan of
//! straights, curves and hills. Each new segment starts at the previous
//! segment's far edge, so the sequence is continuous in Z and elevation.

use std::f32::consts::FRAC_PI_2;

use super::state::{Segment, SegmentPoint};
use crate::tuning::Tuning;

/// Default plan piece lengths (segments)
const PLAN_STRAIGHT: usize = 50;
const PLAN_CURVE: usize = 60;
const PLAN_HILL: usize = 60;
/// Default plan bend sharpness
const PLAN_CURVE_AMOUNT: f32 = 3.0;
/// Default plan hill height, in segment lengths
const PLAN_HILL_HEIGHT: f32 = 20.0;

/// An immutable, generated segment ring
#[derive(Debug, Clone)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Track {
    pub fn builder(segment_length: f32) -> TrackBuilder {
        TrackBuilder {
            segments: Vec::new(),
            segment_length,
        }
    }

    /// straight → curve → hill → curve → hill → straight; the two hills cancel
    /// so the loop closes in elevation
    pub fn default_loop(tuning: &Tuning) -> Self {
        let hill = PLAN_HILL_HEIGHT * tuning.segment_length;
        Self::builder(tuning.segment_length)
            .add_straight(PLAN_STRAIGHT)
            .add_curve(PLAN_CURVE, PLAN_CURVE_AMOUNT)
            .add_hill(PLAN_HILL, hill)
            .add_curve(PLAN_CURVE, -PLAN_CURVE_AMOUNT)
            .add_hill(PLAN_HILL, -hill)
            .add_straight(PLAN_STRAIGHT)
            .build()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Appends plan pieces in order
#[derive(Debug)]
pub struct TrackBuilder {
    segments: Vec<Segment>,
    segment_length: f32,
}

impl TrackBuilder {
    /// Elevation of the last far edge (0 for an empty track)
    fn last_y(&self) -> f32 {
        self.segments.last().map(|s| s.p2.world.y).unwrap_or(0.0)
    }

    fn push(&mut self, curve: f32, far_y: f32) {
        let index = self.segments.len();
        let near_z = index as f32 * self.segment_length;
        let far_z = (index + 1) as f32 * self.segment_length;
        let near_y = self.last_y();
        self.segments.push(Segment {
            index,
            curve,
            p1: SegmentPoint::at(near_z, near_y),
            p2: SegmentPoint::at(far_z, far_y),
        });
    }

    /// `n` flat, unbent segments
    pub fn add_straight(mut self, n: usize) -> Self {
        let y = self.last_y();
        for _ in 0..n {
            self.push(0.0, y);
        }
        self
    }

    /// `n` segments bending by `curve` each (positive bends right)
    pub fn add_curve(mut self, n: usize, curve: f32) -> Self {
        let y = self.last_y();
        for _ in 0..n {
            self.push(curve, y);
        }
        self
    }

    /// `n` segments climbing (or dropping) by `delta` along a half-cosine ease.
    ///
    /// Step `i` rises in proportion to `cos(i/n · π/2)`: steepest at the start,
    /// flattening into the crest. The steps are normalized so the last far edge
    /// lands exactly on `start + delta`.
    pub fn add_hill(mut self, n: usize, delta: f32) -> Self {
        if n == 0 {
            return self;
        }
        let start = self.last_y();
        let weights: Vec<f32> = (0..n)
            .map(|i| (i as f32 / n as f32 * FRAC_PI_2).cos())
            .collect();
        let total: f32 = weights.iter().sum();

        let mut y = start;
        for (i, weight) in weights.iter().enumerate() {
            y = if i + 1 == n {
                start + delta
            } else {
                y + delta * weight / total
            };
            self.push(0.0, y);
        }
        self
    }

    pub fn build(self) -> Track {
        Track {
            segments: self.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_ys(track: &Track) -> Vec<f32> {
        track.segments().iter().map(|s| s.p2.world.y).collect()
    }

    #[test]
    fn test_edges_are_continuous() {
        let track = Track::default_loop(&Tuning::default());
        for pair in track.segments().windows(2) {
            assert_eq!(pair[0].p2.world.z, pair[1].p1.world.z);
            assert_eq!(pair[0].p2.world.y, pair[1].p1.world.y);
            assert_eq!(pair[0].index + 1, pair[1].index);
        }
    }

    #[test]
    fn test_default_loop_closes_in_elevation() {
        let track = Track::default_loop(&Tuning::default());
        let first = &track.segments()[0];
        let last = track.segments().last().unwrap();
        assert!((last.p2.world.y - first.p1.world.y).abs() < 1e-3);
        assert_eq!(
            track.len(),
            PLAN_STRAIGHT * 2 + PLAN_CURVE * 2 + PLAN_HILL * 2
        );
    }

    #[test]
    fn test_straight_and_curve_hold_elevation() {
        let track = Track::builder(100.0)
            .add_hill(4, 300.0)
            .add_straight(3)
            .add_curve(3, -2.0)
            .build();
        let ys = far_ys(&track);
        assert!(ys[4..].iter().all(|&y| (y - 300.0).abs() < 1e-4));
        assert!(track.segments()[7..].iter().all(|s| s.curve == -2.0));
        assert!(track.segments()[4..7].iter().all(|s| s.curve == 0.0));
    }

    #[test]
    fn test_hill_half_cosine_ease() {
        let n = 20;
        let y0 = 50.0;
        let delta = 1000.0;
        // A one-segment hill lifts the start off zero so the ease is checked as relative
        let track = Track::builder(200.0)
            .add_hill(1, y0)
            .add_hill(n, delta)
            .build();
        let ys: Vec<f32> = far_ys(&track)[1..].to_vec();

        // Steps are normalized so the hill ends exactly on y0 + delta, which makes
        // the first step about π/2 · delta/n rather than delta/n
        let first_step = ys[0] - y0;
        assert!(first_step > delta / n as f32);
        assert!(first_step < delta / n as f32 * std::f32::consts::FRAC_PI_2);

        // Monotonic climb with shrinking steps, no overshoot
        let mut prev = y0;
        let mut prev_step = f32::INFINITY;
        for &y in &ys {
            let step = y - prev;
            assert!(step > 0.0);
            assert!(step <= prev_step + 1e-3);
            assert!(y <= y0 + delta + 1e-3);
            prev_step = step;
            prev = y;
        }
        assert!((ys[n - 1] - (y0 + delta)).abs() < 1e-3);
    }

    #[test]
    fn test_downhill_mirrors_uphill() {
        let up = far_ys(&Track::builder(200.0).add_hill(10, 500.0).build());
        let down = far_ys(&Track::builder(200.0).add_hill(10, -500.0).build());
        for (u, d) in up.iter().zip(&down) {
            assert!((u + d).abs() < 1e-3);
        }
    }

    #[test]
    fn test_empty_hill_is_noop() {
        let track = Track::builder(200.0).add_hill(0, 500.0).build();
        assert!(track.is_empty());
    }
}
