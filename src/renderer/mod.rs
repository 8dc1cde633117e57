//! Renderer module - WebGPU rendering for the scene and the crosshair
//!
//! Re-exports only. All logic in submodules. Vertex building is plain CPU
//! code and tests natively; surface and draw code only exists on wasm32,
//! so headless `cargo test` never needs a GPU.

#[cfg(target_arch = "wasm32")]
mod draw;
mod hud;
mod mesh;
mod overlay;
#[cfg(target_arch = "wasm32")]
mod state;

#[cfg(target_arch = "wasm32")]
pub use draw::render_frame;
pub use hud::{hud_text, set_frame_metrics};
pub use mesh::{build_scene_vertices, SceneVertex, SphereTemplate};
pub use overlay::{arc_vertices, build_overlay_vertices, OverlayVertex};
#[cfg(target_arch = "wasm32")]
pub use state::{initialize_gpu, resize_surface, GpuStateError};
