//! Session HUD - frame timing and interaction state for the page footer

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::bridge::with_session;
use crate::interaction::Phase;

/// Frame timing metrics, smoothed for readable display
#[derive(Default)]
struct Metrics {
    fps: f32,
    frame_time_ms: f32,
}

thread_local! {
    static METRICS: RefCell<Metrics> = RefCell::new(Metrics::default());
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Set frame timing (called from JS each frame)
#[wasm_bindgen]
pub fn set_frame_metrics(fps: f32, frame_time_ms: f32) {
    // Sanity check: ignore invalid times (tab backgrounded or first frame)
    if frame_time_ms < 1.0 || frame_time_ms > 200.0 {
        return;
    }

    METRICS.with(|m| {
        let mut metrics = m.borrow_mut();
        // Exponential moving average for smooth display
        metrics.fps = metrics.fps * 0.9 + fps * 0.1;
        metrics.frame_time_ms = metrics.frame_time_ms * 0.9 + frame_time_ms * 0.1;
    });
}

/// Get the formatted HUD line (called from JS to update HTML)
#[wasm_bindgen]
pub fn hud_text() -> String {
    let (fps, frame_time_ms) = METRICS.with(|m| {
        let metrics = m.borrow();
        (metrics.fps, metrics.frame_time_ms)
    });

    with_session(|session| {
        let name_of = |body| session.bodies.get(body).map(|b| b.name).unwrap_or("?");
        let target = if let Some(body) = session.core.grabbed() {
            format!("{} held", name_of(body))
        } else {
            match session.core.selection().phase() {
                Phase::Idle => "-".to_string(),
                Phase::Hovering { body, .. } => {
                    let percent = (session.core.selection().dwell_fraction() * 100.0) as u32;
                    format!("{} {}%", name_of(body), percent)
                }
                Phase::Committed { body } => format!("{} locked", name_of(body)),
            }
        };
        format!(
            "FPS: {:.0} | Frame: {:.1}ms | Mode: {} | Cam: {:.1} | Target: {}",
            fps,
            frame_time_ms,
            session.core.mode().name(),
            session.core.camera.distance(),
            target,
        )
    })
}
