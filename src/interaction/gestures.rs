//! Gesture interpreters - pinch-drag and two-hand spread zoom
//!
//! Exactly one interpreter runs per session; the dwell variant needs no
//! state of its own beyond the selection machine.

use crate::scene::bodies::BodyId;

/// Pinch closes below this thumb-index span (normalized coordinate space)
pub const PINCH_CLOSE_SPAN: f32 = 0.05;

/// World units of camera distance per unit of inter-hand span change
pub const ZOOM_SENSITIVITY: f32 = 30.0;

/// Which interpreter this run uses
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Dwell,
    PinchDrag,
    TwoHandZoom,
}

impl Mode {
    pub fn parse(name: &str) -> Option<Mode> {
        match name {
            "dwell" => Some(Mode::Dwell),
            "pinch" => Some(Mode::PinchDrag),
            "zoom" => Some(Mode::TwoHandZoom),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Dwell => "dwell",
            Mode::PinchDrag => "pinch",
            Mode::TwoHandZoom => "zoom",
        }
    }
}

/// What the pinch interpreter decided this frame
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PinchAction {
    /// Open pinch, nothing held
    None,
    /// Pinch closed over a hovered body this frame
    Grabbed(BodyId),
    /// Pinch still closed; keep moving the held body
    Dragging(BodyId),
    /// Pinch opened (or the hand vanished); grip cleared
    Released,
}

/// Single-hand pinch-drag: close over a hovered body to grab it,
/// open to let go
pub struct PinchDrag {
    grabbed: Option<BodyId>,
}

impl PinchDrag {
    pub fn new() -> Self {
        Self { grabbed: None }
    }

    pub fn grabbed(&self) -> Option<BodyId> {
        self.grabbed
    }

    /// Advance one frame. `span` is the thumb-index distance (`None` when
    /// no hand or degenerate landmarks); `hovered` is this frame's ray hit.
    pub fn update(&mut self, span: Option<f32>, hovered: Option<BodyId>) -> PinchAction {
        let closed = matches!(span, Some(s) if s < PINCH_CLOSE_SPAN);

        if !closed {
            return if self.grabbed.take().is_some() {
                PinchAction::Released
            } else {
                PinchAction::None
            };
        }

        match self.grabbed {
            // Already holding: re-grab attempts are a no-op
            Some(body) => PinchAction::Dragging(body),
            None => match hovered {
                Some(body) => {
                    self.grabbed = Some(body);
                    PinchAction::Grabbed(body)
                }
                None => PinchAction::None,
            },
        }
    }

    pub fn reset(&mut self) {
        self.grabbed = None;
    }
}

impl Default for PinchDrag {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-hand spread/pinch zoom: camera distance follows the frame-to-frame
/// change of the palm-to-palm span
pub struct SpreadZoom {
    last_span: Option<f32>,
}

impl SpreadZoom {
    pub fn new() -> Self {
        Self { last_span: None }
    }

    /// Advance one frame. `span` must be `None` whenever fewer than two
    /// hands are present; that clears the baseline so re-acquiring two
    /// hands never produces a jump from a stale distance.
    ///
    /// Returns the camera-distance delta to apply, if any.
    pub fn update(&mut self, span: Option<f32>) -> Option<f32> {
        match span {
            None => {
                self.last_span = None;
                None
            }
            Some(current) => {
                let delta = self
                    .last_span
                    .map(|last| -(current - last) * ZOOM_SENSITIVITY);
                self.last_span = Some(current);
                delta
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_span = None;
    }
}

impl Default for SpreadZoom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERRA: BodyId = BodyId(1);
    const MARTE: BodyId = BodyId(2);

    #[test]
    fn grab_requires_closed_pinch_over_hover() {
        let mut pinch = PinchDrag::new();
        // Closed but nothing hovered
        assert_eq!(pinch.update(Some(0.02), None), PinchAction::None);
        // Hovered but open
        assert_eq!(pinch.update(Some(0.2), Some(TERRA)), PinchAction::None);
        // Closed over a hover: grab
        assert_eq!(
            pinch.update(Some(0.02), Some(TERRA)),
            PinchAction::Grabbed(TERRA)
        );
        assert_eq!(pinch.grabbed(), Some(TERRA));
    }

    #[test]
    fn regrab_while_holding_is_a_noop() {
        let mut pinch = PinchDrag::new();
        pinch.update(Some(0.02), Some(TERRA));
        // Hover moves to another body while still closed; grip must not jump
        assert_eq!(
            pinch.update(Some(0.02), Some(MARTE)),
            PinchAction::Dragging(TERRA)
        );
        assert_eq!(pinch.grabbed(), Some(TERRA));
    }

    #[test]
    fn opening_always_releases() {
        let mut pinch = PinchDrag::new();
        pinch.update(Some(0.02), Some(TERRA));
        assert_eq!(pinch.update(Some(0.08), Some(TERRA)), PinchAction::Released);
        assert_eq!(pinch.grabbed(), None);
    }

    #[test]
    fn hand_loss_releases() {
        let mut pinch = PinchDrag::new();
        pinch.update(Some(0.02), Some(TERRA));
        assert_eq!(pinch.update(None, None), PinchAction::Released);
        assert_eq!(pinch.grabbed(), None);
    }

    #[test]
    fn spreading_hands_zooms_in() {
        let mut zoom = SpreadZoom::new();
        assert_eq!(zoom.update(Some(0.3)), None); // first frame: baseline only
        let delta = zoom.update(Some(0.4)).unwrap();
        assert!(delta < 0.0); // distance shrinks, camera closes in
        let delta = zoom.update(Some(0.35)).unwrap();
        assert!(delta > 0.0); // hands closing backs the camera out
    }

    #[test]
    fn hand_loss_clears_the_baseline() {
        let mut zoom = SpreadZoom::new();
        zoom.update(Some(0.3));
        zoom.update(None);
        // Re-acquiring two hands must not produce a delta from the old 0.3
        assert_eq!(zoom.update(Some(0.6)), None);
        assert!(zoom.update(Some(0.61)).is_some());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(Mode::parse("dwell"), Some(Mode::Dwell));
        assert_eq!(Mode::parse("pinch"), Some(Mode::PinchDrag));
        assert_eq!(Mode::parse("zoom"), Some(Mode::TwoHandZoom));
        assert_eq!(Mode::parse("wave"), None);
        assert_eq!(Mode::PinchDrag.name(), "pinch");
    }
}
