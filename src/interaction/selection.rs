//! Dwell selection - hover a body long enough and it commits
//!
//! Fed once per detection frame with the nearest ray hit. The dwell counter
//! carries no partial credit: any change of target, including a one-frame
//! flicker to "no hit", restarts the count from zero.

use crate::scene::bodies::BodyId;

/// Consecutive frames of steady hover required to commit (~1.5s at 60fps)
pub const DWELL_THRESHOLD: u32 = 90;

/// Where the machine currently stands
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Hovering { body: BodyId, dwell: u32 },
    Committed { body: BodyId },
}

/// Published on the frame a transition happens, never repeated
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectionEvent {
    /// Dwell threshold reached; the camera should focus this body
    Committed(BodyId),
    /// A committed focus ended; the camera should return to overview
    Released,
}

pub struct SelectionMachine {
    phase: Phase,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The body under the pointer, hovering or committed
    pub fn hovered(&self) -> Option<BodyId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Hovering { body, .. } | Phase::Committed { body } => Some(body),
        }
    }

    /// Dwell progress in [0, 1]; 1.0 once committed
    pub fn dwell_fraction(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Hovering { dwell, .. } => (dwell as f32 / DWELL_THRESHOLD as f32).min(1.0),
            Phase::Committed { .. } => 1.0,
        }
    }

    /// Advance one frame with this frame's nearest intersection
    pub fn observe(&mut self, nearest: Option<BodyId>) -> Option<SelectionEvent> {
        let (next, event) = match (self.phase, nearest) {
            (Phase::Idle, None) => (Phase::Idle, None),
            (Phase::Idle, Some(body)) => (Phase::Hovering { body, dwell: 1 }, None),

            (Phase::Hovering { .. }, None) => (Phase::Idle, None),
            (Phase::Hovering { body, dwell }, Some(hit)) if hit == body => {
                if dwell + 1 >= DWELL_THRESHOLD {
                    (Phase::Committed { body }, Some(SelectionEvent::Committed(body)))
                } else {
                    (Phase::Hovering { body, dwell: dwell + 1 }, None)
                }
            }
            // Target changed: full reset, count restarts at 1 on the new body
            (Phase::Hovering { .. }, Some(hit)) => (Phase::Hovering { body: hit, dwell: 1 }, None),

            (Phase::Committed { .. }, None) => (Phase::Idle, Some(SelectionEvent::Released)),
            (Phase::Committed { body }, Some(hit)) if hit == body => {
                (Phase::Committed { body }, None)
            }
            // Ray left the committed body for another: focus ends, fresh hover
            (Phase::Committed { .. }, Some(hit)) => (
                Phase::Hovering { body: hit, dwell: 1 },
                Some(SelectionEvent::Released),
            ),
        };
        self.phase = next;
        event
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}
