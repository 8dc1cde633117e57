//! Advance-one-frame composition
//!
//! One detection frame flows one way: hands -> pointer -> smoothing ->
//! ray -> intersection -> selection/gesture update -> camera target.
//! All carried state lives here so the whole pipeline is testable without
//! a browser.

use crate::interaction::camera::{CameraRig, ViewParams};
use crate::interaction::gestures::{Mode, PinchAction, PinchDrag, SpreadZoom};
use crate::interaction::pointer::{inter_hand_span, Hand};
use crate::interaction::projector::{pointer_ray, reproject_to_depth_plane, to_ndc};
use crate::interaction::selection::{SelectionEvent, SelectionMachine};
use crate::interaction::smoothing::OneEuroFilter2D;
use crate::scene::bodies::{BodyId, BodySet};
use crate::scene::raycast;

/// Everything the detector delivered for one frame
pub struct FrameInput {
    /// Zero, one, or two hands; order is the detector's, not tracked
    pub hands: Vec<Hand>,
    /// Timestamp in seconds (drives the pointer filter)
    pub time_s: f64,
}

/// Snapshot the overlay renderer reads; presentation-only
#[derive(Clone, Copy, Default)]
pub struct OverlayState {
    /// Pointer position in clip space, `None` when no hand is present
    pub pointer_clip: Option<(f32, f32)>,
    /// A body is under the pointer (hovering or committed)
    pub hovering: bool,
    /// Dwell progress in [0, 1]
    pub dwell_fraction: f32,
}

/// The session's interaction core: one gesture mode, one selection machine,
/// one camera rig
pub struct InteractionCore {
    mode: Mode,
    selection: SelectionMachine,
    pinch: PinchDrag,
    zoom: SpreadZoom,
    smoother: OneEuroFilter2D,
    pub camera: CameraRig,
    overlay: OverlayState,
}

impl InteractionCore {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            selection: SelectionMachine::new(),
            pinch: PinchDrag::new(),
            zoom: SpreadZoom::new(),
            smoother: OneEuroFilter2D::new(),
            camera: CameraRig::overview(),
            overlay: OverlayState::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch interpreter between runs; all mode-local state unwinds and
    /// the camera heads back to overview
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.selection.reset();
        self.pinch.reset();
        self.zoom.reset();
        self.smoother.reset();
        self.camera.release();
        self.overlay = OverlayState::default();
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn grabbed(&self) -> Option<BodyId> {
        self.pinch.grabbed()
    }

    /// Process one detection frame
    pub fn advance(&mut self, input: &FrameInput, bodies: &mut BodySet, view: &ViewParams) {
        let Some(hand) = input.hands.first() else {
            self.unwind();
            return;
        };

        let pointer = self.smoother.filter(input.time_s, hand.pointer());
        let ray = pointer_ray(pointer, &self.camera, view);
        let nearest = ray.as_ref().and_then(|r| raycast::nearest(r, bodies));
        let hovered = nearest.map(|hit| hit.body);

        let event = self.selection.observe(hovered);

        match self.mode {
            Mode::Dwell => self.apply_selection_event(event, bodies),
            Mode::PinchDrag => {
                let action = self.pinch.update(hand.pinch_span(), hovered);
                if let (PinchAction::Grabbed(body) | PinchAction::Dragging(body), Some(ray)) =
                    (action, ray.as_ref())
                {
                    self.drag_body(body, ray, bodies);
                }
            }
            Mode::TwoHandZoom => {
                let span = match input.hands.as_slice() {
                    [a, b] => inter_hand_span(a, b),
                    _ => None,
                };
                if let Some(delta) = self.zoom.update(span) {
                    self.camera.apply_zoom_delta(delta);
                }
            }
        }

        self.overlay = OverlayState {
            pointer_clip: Some(to_ndc(pointer)),
            hovering: self.selection.hovered().is_some(),
            dwell_fraction: self.selection.dwell_fraction(),
        };
    }

    /// No hand this frame: all gesture state unwinds, nothing lingers
    fn unwind(&mut self) {
        // A miss can only ever release, never commit
        if let Some(SelectionEvent::Released) = self.selection.observe(None) {
            if self.mode == Mode::Dwell {
                self.camera.release();
            }
        }
        self.pinch.update(None, None);
        self.zoom.update(None);
        self.smoother.reset();
        self.overlay = OverlayState::default();
    }

    fn apply_selection_event(&mut self, event: Option<SelectionEvent>, bodies: &BodySet) {
        match event {
            Some(SelectionEvent::Committed(body)) => {
                if let Some(b) = bodies.get(body) {
                    self.camera.focus_on(b.position);
                }
            }
            Some(SelectionEvent::Released) => self.camera.release(),
            None => {}
        }
    }

    /// Move a grabbed body to the pointer ray's intersection with the
    /// camera-facing plane at the body's current depth
    fn drag_body(&self, body: BodyId, ray: &raycast::Ray, bodies: &mut BodySet) {
        let Some(forward) = self.camera.forward() else {
            return;
        };
        let Some(b) = bodies.get(body) else { return };
        let depth = (b.position - self.camera.position).dot(&forward);
        if let Some(point) = reproject_to_depth_plane(ray, &self.camera, depth) {
            if let Some(b) = bodies.get_mut(body) {
                b.position = point;
            }
        }
    }
}

impl Default for InteractionCore {
    fn default() -> Self {
        Self::new(Mode::Dwell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::pointer::{Landmark, INDEX_TIP, PALM_CENTER, THUMB_TIP};
    use crate::interaction::selection::{Phase, DWELL_THRESHOLD};
    use nalgebra::Point3;

    const TERRA: BodyId = BodyId(1);

    fn hand_pointing(x: f32, y: f32) -> Hand {
        let mut hand = Hand::default();
        hand.landmarks[INDEX_TIP] = Landmark { x, y, z: 0.0 };
        // Thumb far from the index tip: pinch open
        hand.landmarks[THUMB_TIP] = Landmark { x: x - 0.3, y, z: 0.0 };
        hand.landmarks[PALM_CENTER] = Landmark { x, y: y + 0.1, z: 0.0 };
        hand
    }

    fn hand_pinching(x: f32, y: f32) -> Hand {
        let mut hand = hand_pointing(x, y);
        hand.landmarks[THUMB_TIP] = Landmark { x: x + 0.01, y, z: 0.0 };
        hand
    }

    /// Terra parked on the camera axis so the screen-center pointer hits it
    fn centered_scene() -> (BodySet, ViewParams) {
        let mut bodies = BodySet::solar_system();
        bodies.get_mut(BodyId(0)).unwrap().position = Point3::new(0.0, 1e6, 0.0);
        bodies.get_mut(BodyId(2)).unwrap().position = Point3::new(0.0, 1e6, 0.0);
        bodies.get_mut(BodyId(3)).unwrap().position = Point3::new(0.0, 1e6, 0.0);
        let terra = bodies.get_mut(TERRA).unwrap();
        terra.position = Point3::origin();
        terra.radius = 0.5;
        (bodies, ViewParams::new(16.0 / 9.0))
    }

    fn input(hands: Vec<Hand>, frame: u32) -> FrameInput {
        FrameInput {
            hands,
            time_s: frame as f64 / 60.0,
        }
    }

    #[test]
    fn dwell_scenario_commits_then_reverts_in_single_frames() {
        let (mut bodies, view) = centered_scene();
        let mut core = InteractionCore::new(Mode::Dwell);
        let overview_distance = core.camera.distance();

        // 89 steady frames on Terra: still hovering, camera untouched
        for frame in 0..DWELL_THRESHOLD - 1 {
            core.advance(&input(vec![hand_pointing(0.5, 0.5)], frame), &mut bodies, &view);
        }
        assert!(matches!(core.selection().phase(), Phase::Hovering { .. }));

        // Frame 90: commit, focus target published
        core.advance(
            &input(vec![hand_pointing(0.5, 0.5)], DWELL_THRESHOLD),
            &mut bodies,
            &view,
        );
        assert_eq!(core.selection().phase(), Phase::Committed { body: TERRA });
        for _ in 0..2000 {
            core.camera.step();
        }
        let terra_pos = bodies.get(TERRA).unwrap().position;
        assert!((core.camera.look_target - terra_pos).norm() < 0.01);
        assert!(core.camera.distance() < overview_distance);

        // Frame 91: pointer leaps off-target -> Idle and overview, same frame
        core.advance(
            &input(vec![hand_pointing(0.95, 0.95)], DWELL_THRESHOLD + 1),
            &mut bodies,
            &view,
        );
        assert_eq!(core.selection().phase(), Phase::Idle);
        for _ in 0..2000 {
            core.camera.step();
        }
        assert!((core.camera.position - Point3::new(0.0, 5.0, 30.0)).norm() < 0.01);
    }

    #[test]
    fn hand_loss_unwinds_everything() {
        let (mut bodies, view) = centered_scene();
        let mut core = InteractionCore::new(Mode::PinchDrag);

        core.advance(&input(vec![hand_pointing(0.5, 0.5)], 0), &mut bodies, &view);
        core.advance(&input(vec![hand_pinching(0.5, 0.5)], 1), &mut bodies, &view);
        assert_eq!(core.grabbed(), Some(TERRA));

        core.advance(&input(vec![], 2), &mut bodies, &view);
        assert_eq!(core.grabbed(), None);
        assert!(core.overlay().pointer_clip.is_none());
        assert_eq!(core.selection().phase(), Phase::Idle);
    }

    #[test]
    fn pinch_drag_moves_terra_with_the_pointer() {
        let (mut bodies, view) = centered_scene();
        let mut core = InteractionCore::new(Mode::PinchDrag);
        let start = bodies.get(TERRA).unwrap().position;

        core.advance(&input(vec![hand_pinching(0.5, 0.5)], 0), &mut bodies, &view);
        assert_eq!(core.grabbed(), Some(TERRA));

        // Drag toward screen right over a stretch of frames
        for frame in 1..40 {
            let x = 0.5 + 0.005 * frame as f32;
            core.advance(&input(vec![hand_pinching(x, 0.5)], frame as u32), &mut bodies, &view);
        }
        let moved = bodies.get(TERRA).unwrap().position;
        assert!(moved.x > start.x + 0.5);

        // Opening the pinch releases; the body stays where it was dropped
        core.advance(&input(vec![hand_pointing(0.7, 0.5)], 41), &mut bodies, &view);
        assert_eq!(core.grabbed(), None);
        let dropped = bodies.get(TERRA).unwrap().position;
        assert_eq!(dropped, moved);
    }

    #[test]
    fn two_hand_zoom_tracks_span_and_clears_on_hand_loss() {
        let (mut bodies, view) = centered_scene();
        let mut core = InteractionCore::new(Mode::TwoHandZoom);
        let start = core.camera.distance();

        let pair = |s: f32| {
            let mut a = hand_pointing(0.5, 0.5);
            let mut b = hand_pointing(0.5, 0.5);
            a.landmarks[PALM_CENTER] = Landmark { x: 0.5 - s / 2.0, y: 0.5, z: 0.0 };
            b.landmarks[PALM_CENTER] = Landmark { x: 0.5 + s / 2.0, y: 0.5, z: 0.0 };
            vec![a, b]
        };

        core.advance(&input(pair(0.2), 0), &mut bodies, &view);
        assert!((core.camera.distance() - start).abs() < 1e-4); // baseline frame

        core.advance(&input(pair(0.3), 1), &mut bodies, &view);
        let zoomed = core.camera.distance();
        assert!(zoomed < start); // hands spread -> closer

        // Drop to one hand: baseline clears
        core.advance(&input(pair(0.5)[..1].to_vec(), 2), &mut bodies, &view);
        // Re-acquire with a very different span: no jump allowed
        core.advance(&input(pair(0.05), 3), &mut bodies, &view);
        assert!((core.camera.distance() - zoomed).abs() < 1e-4);
    }

    #[test]
    fn mode_switch_resets_state_and_camera_target() {
        let (mut bodies, view) = centered_scene();
        let mut core = InteractionCore::new(Mode::Dwell);
        for frame in 0..=DWELL_THRESHOLD {
            core.advance(&input(vec![hand_pointing(0.5, 0.5)], frame), &mut bodies, &view);
        }
        assert!(matches!(core.selection().phase(), Phase::Committed { .. }));

        core.set_mode(Mode::PinchDrag);
        assert_eq!(core.selection().phase(), Phase::Idle);
        for _ in 0..2000 {
            core.camera.step();
        }
        assert!((core.camera.position - Point3::new(0.0, 5.0, 30.0)).norm() < 0.01);
    }
}
