//! Overlay drawing - crosshair ring and dwell progress arc
//!
//! Built in clip space every frame from the interaction core's snapshot.
//! The crosshair sits exactly where the selection ray pierces the screen,
//! so what the ring circles is what the ray can hit.

use crate::interaction::OverlayState;

/// Vertex structure for the 2D overlay pass
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Colors for the crosshair states
mod colors {
    /// Pointer with nothing under it
    pub const IDLE: [f32; 4] = [0.0, 1.0, 1.0, 0.9];
    /// Pointer over a selectable body
    pub const HOVER: [f32; 4] = [1.0, 0.0, 0.0, 0.9];
    /// Dwell progress arc
    pub const PROGRESS: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
}

const RING_RADIUS: f32 = 0.035;
const PROGRESS_RADIUS: f32 = 0.05;
const RING_THICKNESS: f32 = 0.008;
const SEGMENTS: u32 = 32;

/// Annular arc as a triangle list. `sweep` in [0, 1] covers that fraction
/// of the full circle, starting from 3 o'clock. The x radius is divided by
/// the aspect ratio so the ring stays circular on a wide canvas.
pub fn arc_vertices(
    cx: f32,
    cy: f32,
    radius: f32,
    sweep: f32,
    aspect: f32,
    color: [f32; 4],
) -> Vec<OverlayVertex> {
    let sweep = sweep.clamp(0.0, 1.0);
    let segments = (SEGMENTS as f32 * sweep).ceil() as u32;
    if segments == 0 {
        return vec![];
    }

    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    let inner = radius - RING_THICKNESS / 2.0;
    let outer = radius + RING_THICKNESS / 2.0;
    let step = sweep * std::f32::consts::TAU / segments as f32;

    let at = |r: f32, angle: f32| [cx + angle.cos() * r / aspect, cy + angle.sin() * r];

    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        let a0 = i as f32 * step;
        let a1 = (i + 1) as f32 * step;
        let i0 = at(inner, a0);
        let i1 = at(inner, a1);
        let o0 = at(outer, a0);
        let o1 = at(outer, a1);
        vertices.extend([
            OverlayVertex { position: i0, color },
            OverlayVertex { position: o0, color },
            OverlayVertex { position: o1, color },
            OverlayVertex { position: i0, color },
            OverlayVertex { position: o1, color },
            OverlayVertex { position: i1, color },
        ]);
    }
    vertices
}

/// Build the whole overlay for this frame's interaction snapshot
pub fn build_overlay_vertices(overlay: &OverlayState, aspect: f32) -> Vec<OverlayVertex> {
    let Some((cx, cy)) = overlay.pointer_clip else {
        return vec![];
    };

    let ring_color = if overlay.hovering {
        colors::HOVER
    } else {
        colors::IDLE
    };
    let mut vertices = arc_vertices(cx, cy, RING_RADIUS, 1.0, aspect, ring_color);

    if overlay.hovering {
        vertices.extend(arc_vertices(
            cx,
            cy,
            PROGRESS_RADIUS,
            overlay.dwell_fraction,
            aspect,
            colors::PROGRESS,
        ));
    }

    vertices
}
