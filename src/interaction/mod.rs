//! Interaction module - the per-frame gesture and selection core
//!
//! Re-exports only. All logic in submodules; nothing here touches wasm,
//! so the whole pipeline tests natively.

mod camera;
mod frame;
mod gestures;
mod pointer;
mod projector;
mod selection;
mod smoothing;

pub use camera::{CameraRig, ViewParams, DAMPING, FOCUS_STANDOFF, MAX_DISTANCE, MIN_DISTANCE};
pub use frame::{FrameInput, InteractionCore, OverlayState};
pub use gestures::{Mode, PinchAction, PinchDrag, SpreadZoom, PINCH_CLOSE_SPAN, ZOOM_SENSITIVITY};
pub use pointer::{inter_hand_span, Hand, Landmark, INDEX_TIP, PALM_CENTER, THUMB_TIP};
pub use projector::{pointer_ray, reproject_to_depth_plane, to_ndc};
pub use selection::{Phase, SelectionEvent, SelectionMachine, DWELL_THRESHOLD};
pub use smoothing::{OneEuroFilter, OneEuroFilter2D};
