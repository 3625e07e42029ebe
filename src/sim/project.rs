//! Perspective projection and the road render pass
//!
//! Curves are faked: instead of rotating the camera, each segment's screen X is
//! shifted by the running sum of curvature scanned so far. Hills are occluded
//! with a single near-to-far scan against a `max_y` watermark rather than a
//! depth buffer, so segments must be visited in strictly increasing distance.

use glam::{Vec2, Vec3};

use super::state::{ProjectedPoint, SegmentPoint, Stripe, Viewport, WorldState};
use crate::consts::{
    LANE_WIDTH_FRACTION, PLAYER_BOTTOM_MARGIN_FRACTION, PLAYER_HEIGHT_FRACTION,
    PLAYER_WIDTH_FRACTION, RUMBLE_WIDTH_FRACTION,
};
use crate::ring_index;

/// What a quad depicts; the renderer resolves the color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadKind {
    Grass(Stripe),
    Road(Stripe),
    Rumble(Stripe),
    Lane,
    PlayerBody,
    PlayerCabin,
}

/// A screen-space quadrilateral, corners in drawing order
/// (near-left, near-right, far-right, far-left for road pieces)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub kind: QuadKind,
    pub corners: [Vec2; 4],
}

impl Quad {
    /// Horizontal trapezoid between two scanlines
    pub fn trapezoid(
        kind: QuadKind,
        x1: f32,
        y1: f32,
        w1: f32,
        x2: f32,
        y2: f32,
        w2: f32,
    ) -> Self {
        Self {
            kind,
            corners: [
                Vec2::new(x1 - w1, y1),
                Vec2::new(x1 + w1, y1),
                Vec2::new(x2 + w2, y2),
                Vec2::new(x2 - w2, y2),
            ],
        }
    }

    /// Axis-aligned rectangle from its top-left corner
    pub fn rect(kind: QuadKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind,
            corners: [
                Vec2::new(x, y + h),
                Vec2::new(x + w, y + h),
                Vec2::new(x + w, y),
                Vec2::new(x, y),
            ],
        }
    }
}

/// One frame's quads, back-to-front
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub quads: Vec<Quad>,
    /// Segment indices that survived the clip, far-to-near
    pub visible: Vec<usize>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.quads.clear();
        self.visible.clear();
    }
}

/// Camera-space offset applied to every world point
#[derive(Debug, Clone, Copy)]
pub struct CameraOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Translate a point into camera space and perspective-divide it onto the screen
pub fn project(
    point: &mut SegmentPoint,
    offset: CameraOffset,
    camera_depth: f32,
    viewport: Viewport,
    road_width: f32,
) {
    point.camera = point.world - Vec3::new(offset.x, offset.y, offset.z);
    let scale = camera_depth / point.camera.z;
    let hw = viewport.half_width();
    let hh = viewport.half_height();
    point.screen = ProjectedPoint {
        x: hw + scale * point.camera.x * hw,
        y: hh - scale * point.camera.y * hh,
        scale,
        w: scale * road_width * hw,
    };
}

/// Project the segments ahead of the camera and build this frame's draw list
pub fn render(state: &mut WorldState, viewport: Viewport) -> DrawList {
    let mut list = DrawList::default();
    render_into(state, viewport, &mut list);
    list
}

/// Like [`render`], reusing the list's allocations
pub fn render_into(state: &mut WorldState, viewport: Viewport, list: &mut DrawList) {
    list.clear();

    let tuning = state.tuning.clone();
    let camera_depth = tuning.camera_depth();
    let track_length = state.track_length();
    let segment_count = state.segments.len();

    let position = state.position;
    let base_index = state.segment_index_at(position);
    let base_percent = (position % tuning.segment_length) / tuning.segment_length;
    let camera_x = state.player_x * tuning.road_width;
    // Ride the hills: the camera sits a fixed height above the road under it
    let camera_y = tuning.camera_height + state.elevation_at(position);

    let mut x = 0.0;
    let mut dx = -(state.segments[base_index].curve * base_percent);
    let mut max_y = viewport.height;

    for n in 0..tuning.draw_distance.min(segment_count) {
        let index = ring_index((base_index + n) as isize, segment_count);
        let segment = &mut state.segments[index];
        let looped = segment.index < base_index;
        let camera_z = position - if looped { track_length } else { 0.0 };

        project(
            &mut segment.p1,
            CameraOffset { x: camera_x - x, y: camera_y, z: camera_z },
            camera_depth,
            viewport,
            tuning.road_width,
        );
        project(
            &mut segment.p2,
            CameraOffset { x: camera_x - x - dx, y: camera_y, z: camera_z },
            camera_depth,
            viewport,
            tuning.road_width,
        );

        x += dx;
        dx += segment.curve;

        // Already passed (or too close to divide safely)
        if segment.p1.camera.z <= camera_depth {
            continue;
        }
        // Hidden behind a nearer crest
        if segment.p2.screen.y >= max_y {
            continue;
        }
        max_y = segment.p2.screen.y;
        list.visible.push(index);
    }

    // Painter's order: farthest first
    list.visible.reverse();
    for &index in &list.visible {
        let segment = &state.segments[index];
        push_segment_quads(
            &mut list.quads,
            segment.p1.screen,
            segment.p2.screen,
            segment.stripe(tuning.rumble_length),
            viewport,
        );
    }

    push_player_quads(&mut list.quads, viewport);
}

fn push_segment_quads(
    quads: &mut Vec<Quad>,
    near: ProjectedPoint,
    far: ProjectedPoint,
    stripe: Stripe,
    viewport: Viewport,
) {
    let hw = viewport.half_width();
    quads.push(Quad::trapezoid(
        QuadKind::Grass(stripe),
        hw,
        near.y,
        hw,
        hw,
        far.y,
        hw,
    ));
    quads.push(Quad::trapezoid(
        QuadKind::Road(stripe),
        near.x,
        near.y,
        near.w,
        far.x,
        far.y,
        far.w,
    ));

    let r1 = near.w * RUMBLE_WIDTH_FRACTION;
    let r2 = far.w * RUMBLE_WIDTH_FRACTION;
    quads.push(Quad::trapezoid(
        QuadKind::Rumble(stripe),
        near.x - near.w - r1 / 2.0,
        near.y,
        r1 / 2.0,
        far.x - far.w - r2 / 2.0,
        far.y,
        r2 / 2.0,
    ));
    quads.push(Quad::trapezoid(
        QuadKind::Rumble(stripe),
        near.x + near.w + r1 / 2.0,
        near.y,
        r1 / 2.0,
        far.x + far.w + r2 / 2.0,
        far.y,
        r2 / 2.0,
    ));

    if stripe == Stripe::Light {
        let l1 = near.w * LANE_WIDTH_FRACTION;
        let l2 = far.w * LANE_WIDTH_FRACTION;
        quads.push(Quad::trapezoid(
            QuadKind::Lane,
            near.x,
            near.y,
            l1 / 2.0,
            far.x,
            far.y,
            l2 / 2.0,
        ));
    }
}

/// The car never moves on screen; the road scrolls beneath it
fn push_player_quads(quads: &mut Vec<Quad>, viewport: Viewport) {
    let w = viewport.width * PLAYER_WIDTH_FRACTION;
    let h = viewport.height * PLAYER_HEIGHT_FRACTION;
    let x = viewport.half_width() - w / 2.0;
    let y = viewport.height * (1.0 - PLAYER_BOTTOM_MARGIN_FRACTION) - h;
    quads.push(Quad::rect(QuadKind::PlayerBody, x, y, w, h));

    let cabin_w = w * 0.6;
    let cabin_h = h * 0.45;
    quads.push(Quad::rect(
        QuadKind::PlayerCabin,
        viewport.half_width() - cabin_w / 2.0,
        y - cabin_h * 0.6,
        cabin_w,
        cabin_h,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::track::Track;
    use crate::tuning::Tuning;

    const VIEW: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    fn world(track: Track) -> WorldState {
        WorldState::with_track(Tuning::default(), track)
    }

    /// Camera low enough that segments right ahead land on screen
    fn low_camera_world(track: Track) -> WorldState {
        let tuning = Tuning {
            camera_height: 100.0,
            ..Default::default()
        };
        WorldState::with_track(tuning, track)
    }

    #[test]
    fn test_centerline_projects_to_screen_center() {
        let tuning = Tuning::default();
        let mut point = SegmentPoint::at(5000.0, 1000.0);
        project(
            &mut point,
            CameraOffset { x: 0.0, y: 1000.0, z: 0.0 },
            tuning.camera_depth(),
            VIEW,
            tuning.road_width,
        );
        assert!((point.screen.x - VIEW.half_width()).abs() < 1e-3);
        assert!((point.screen.y - VIEW.half_height()).abs() < 1e-3);
        assert!((point.screen.scale - tuning.camera_depth() / 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_road_width_shrinks_with_distance() {
        let tuning = Tuning::default();
        let offset = CameraOffset { x: 0.0, y: 1000.0, z: 0.0 };
        let mut near = SegmentPoint::at(1000.0, 0.0);
        let mut far = SegmentPoint::at(4000.0, 0.0);
        project(&mut near, offset, tuning.camera_depth(), VIEW, tuning.road_width);
        project(&mut far, offset, tuning.camera_depth(), VIEW, tuning.road_width);
        assert!(near.screen.w > far.screen.w);
        // Ground is below the camera, so nearer ground is lower on screen
        assert!(near.screen.y > far.screen.y);
        assert!(far.screen.y > VIEW.half_height());
    }

    #[test]
    fn test_flat_straight_road_visible_and_centered() {
        let mut state = world(Track::builder(200.0).add_straight(400).build());
        state.position = 1000.0;
        let list = render(&mut state, VIEW);

        // Segment 5 is under the camera; 6..=8 end below the bottom edge
        assert_eq!(list.visible.len(), 296);
        assert_eq!(list.visible.first(), Some(&304));
        assert_eq!(list.visible.last(), Some(&9));
        for &index in &list.visible {
            let seg = &state.segments[index];
            assert!((seg.p2.screen.x - VIEW.half_width()).abs() < 1e-2);
        }
    }

    #[test]
    fn test_passed_segment_is_near_clipped() {
        let mut state = low_camera_world(Track::builder(200.0).add_straight(400).build());
        state.position = 1050.0;
        let list = render(&mut state, VIEW);
        assert!(state.segments[5].p1.camera.z < 0.0);
        assert!(!list.visible.contains(&5));
        assert!(list.visible.contains(&6));
    }

    #[test]
    fn test_hill_crest_hides_far_road() {
        // Climb then drop: the road beyond the crest falls below the crest line
        let track = Track::builder(200.0)
            .add_straight(10)
            .add_hill(20, 3000.0)
            .add_hill(20, -6000.0)
            .add_straight(400)
            .build();
        let mut state = world(track);
        let list = render(&mut state, VIEW);

        // Every kept segment sits strictly above the next nearer kept one
        let mut prev_y = f32::INFINITY;
        for &index in list.visible.iter().rev() {
            let y = state.segments[index].p2.screen.y;
            assert!(y < prev_y);
            prev_y = y;
        }
        assert!(list.visible.contains(&10));
        assert!(!list.visible.contains(&30));
        assert!(!list.visible.contains(&31));
    }

    #[test]
    fn test_horizon_clip_drops_lower_far_segment() {
        let mut state = low_camera_world(Track::builder(200.0).add_straight(400).build());
        // Segment 2's far edge dips far below the road
        state.segments[2].p2.world.y = -5000.0;
        state.segments[3].p1.world.y = -5000.0;
        let list = render(&mut state, VIEW);

        let near_y = state.segments[1].p2.screen.y;
        let far_y = state.segments[2].p2.screen.y;
        assert!(far_y >= near_y);
        assert!(list.visible.contains(&1));
        assert!(!list.visible.contains(&2));
        assert!(list.visible.contains(&3));
    }

    #[test]
    fn test_curve_offset_accumulates() {
        let track = Track::builder(200.0)
            .add_straight(5)
            .add_curve(100, 2.0)
            .add_straight(400)
            .build();
        let mut state = world(track);
        render(&mut state, VIEW);

        // Along the bend, the horizontal step between far edges keeps growing
        let xs: Vec<f32> = (6..12).map(|i| state.segments[i].p2.camera.x).collect();
        assert_eq!(xs[0], 2.0);
        let steps: Vec<f32> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        for pair in steps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_track_wrap_keeps_depth_continuous() {
        let mut state = low_camera_world(Track::builder(200.0).add_straight(50).build());
        let length = state.track_length();
        state.position = length - 300.0;
        let list = render(&mut state, VIEW);
        // Segment 0 lies just past the seam, ahead of the camera
        assert!(list.visible.contains(&0));
        let z = state.segments[0].p1.camera.z;
        assert!((z - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_quads_per_segment() {
        let mut state = world(Track::builder(200.0).add_straight(400).build());
        state.position = 1000.0;
        let list = render(&mut state, VIEW);
        let lanes = list.quads.iter().filter(|q| q.kind == QuadKind::Lane).count();
        let light = list
            .visible
            .iter()
            .filter(|&&i| state.segments[i].stripe(3) == Stripe::Light)
            .count();
        assert_eq!(lanes, light);
        assert_eq!(list.quads.len(), list.visible.len() * 4 + light + 2);
        assert_eq!(list.quads[0].kind, QuadKind::Grass(state.segments[304].stripe(3)));
        assert_eq!(list.quads.last().unwrap().kind, QuadKind::PlayerCabin);
    }

    #[test]
    fn test_rumble_width_fraction() {
        let near = ProjectedPoint { x: 500.0, y: 700.0, scale: 1.0, w: 200.0 };
        let far = ProjectedPoint { x: 500.0, y: 600.0, scale: 0.5, w: 100.0 };
        let mut quads = Vec::new();
        push_segment_quads(&mut quads, near, far, Stripe::Dark, VIEW);
        let left = quads[2];
        assert_eq!(left.kind, QuadKind::Rumble(Stripe::Dark));
        assert!((left.corners[1].x - 300.0).abs() < 1e-4);
        assert!((left.corners[0].x - 270.0).abs() < 1e-4);
        assert_eq!(quads.len(), 4);
    }

    #[test]
    fn test_viewport_change_rederives_screen_geometry() {
        let mut state = world(Track::builder(200.0).add_straight(400).build());
        state.position = 1000.0;
        let mut list = DrawList::default();
        render_into(&mut state, VIEW, &mut list);
        let visible_before = list.visible.clone();

        let small = Viewport::new(640.0, 480.0);
        render_into(&mut state, small, &mut list);

        // Clipping depends only on the camera, not on pixel dimensions
        assert_eq!(list.visible, visible_before);
        for &index in &list.visible {
            let seg = &state.segments[index];
            assert!((seg.p2.screen.x - small.half_width()).abs() < 1e-2);
            assert!(seg.p2.screen.y < small.height);
        }

        let n = list.quads.len();
        let body = list.quads[n - 2];
        assert_eq!(body.kind, QuadKind::PlayerBody);
        let body_w = small.width * PLAYER_WIDTH_FRACTION;
        assert!((body.corners[0].x - (small.half_width() - body_w / 2.0)).abs() < 1e-3);
        assert!(
            (body.corners[0].y - small.height * (1.0 - PLAYER_BOTTOM_MARGIN_FRACTION)).abs() < 1e-3
        );
        assert_eq!(list.quads[n - 1].kind, QuadKind::PlayerCabin);
    }

    #[test]
    fn test_render_into_reuses_list() {
        let mut state = world(Track::builder(200.0).add_straight(400).build());
        let mut list = DrawList::default();
        render_into(&mut state, VIEW, &mut list);
        let first = list.quads.len();
        render_into(&mut state, VIEW, &mut list);
        assert_eq!(list.quads.len(), first);
    }
}
