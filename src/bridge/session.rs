//! Session storage and detection-side entry points
//!
//! The detector callback and the animation tick are independent JS-driven
//! entry points; they meet in one thread-local session (WASM is
//! single-threaded, so a RefCell is all the locking there is).

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::hands;
use crate::interaction::{FrameInput, InteractionCore, Mode, ViewParams};
use crate::scene::BodySet;

/// Everything a run carries between frames
pub struct Session {
    pub core: InteractionCore,
    pub bodies: BodySet,
    pub view: ViewParams,
}

impl Session {
    fn new() -> Self {
        Self {
            core: InteractionCore::new(Mode::Dwell),
            bodies: BodySet::solar_system(),
            view: ViewParams::new(16.0 / 9.0),
        }
    }

    /// One animation tick: presentation spin plus the camera damping step
    pub fn tick(&mut self) {
        self.bodies.advance_spin();
        self.core.camera.step();
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new());
}

pub(crate) fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> R {
    SESSION.with(|cell| f(&mut cell.borrow_mut()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Detector callback: flat Float32Array of `num_hands x 21 x 3` values.
/// Zero hands is a normal frame and unwinds gesture state.
#[wasm_bindgen]
pub fn on_hand_frame(data: &[f32], num_hands: usize) {
    let hands = match hands::parse_hands(data, num_hands) {
        Ok(hands) => hands,
        Err(msg) => {
            web_sys::console::warn_1(&msg.into());
            return;
        }
    };

    let time_s = js_sys::Date::now() / 1000.0;
    with_session(|session| {
        let view = session.view;
        session
            .core
            .advance(&FrameInput { hands, time_s }, &mut session.bodies, &view);
    });
}

/// Select the gesture interpreter for this run: "dwell", "pinch" or "zoom"
#[wasm_bindgen]
pub fn set_mode(mode: &str) {
    match Mode::parse(mode) {
        Some(mode) => with_session(|session| session.core.set_mode(mode)),
        None => web_sys::console::warn_1(&format!("Unknown interaction mode: {mode}").into()),
    }
}

/// Keep the projection in step with the canvas
pub fn set_viewport(width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    with_session(|session| session.view.aspect = width / height);
}
