//! Scene module - the body set and ray picking
//!
//! Re-exports only. All logic in submodules.

pub mod bodies;
pub mod raycast;

pub use bodies::{Body, BodyId, BodySet};
pub use raycast::{intersect, nearest, Hit, Ray};
