//! Bridge module - JS <-> Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hands;
mod session;

pub use hands::{parse_hands, FLOATS_PER_HAND, LANDMARKS_PER_HAND, MAX_HANDS};
pub use session::{on_hand_frame, set_mode, set_viewport, Session};

pub(crate) use session::with_session;
