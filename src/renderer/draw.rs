//! Frame drawing - advance the animation tick and draw scene plus overlay
//!
//! The render loop never waits on the detector: it redraws from whatever
//! the session holds right now, stepping only the presentation state
//! (spin, camera damping) itself.

use super::mesh;
use super::overlay;
use super::state::{SceneUniforms, GPU_STATE, OVERLAY_VERTEX_CAPACITY, SCENE_VERTEX_CAPACITY};
use crate::bridge::with_session;
use crate::scene::BodyId;

/// Deep-space clear color
const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.012,
    g: 0.012,
    b: 0.024,
    a: 1.0,
};

/// Render one frame with the current session state
pub fn render_frame() {
    GPU_STATE.with(|state_cell| {
        let state_ref = state_cell.borrow();
        let state = match state_ref.as_ref() {
            Some(s) => s,
            None => return,
        };

        let aspect = state.config.width as f32 / state.config.height.max(1) as f32;

        let (uniforms, mut scene_vertices, mut overlay_vertices) = with_session(|session| {
            session.view.aspect = aspect;
            session.tick();

            let camera = &session.core.camera;
            let light = session
                .bodies
                .get(BodyId(0))
                .map(|sun| sun.position)
                .unwrap_or_else(nalgebra::Point3::origin);
            let uniforms = SceneUniforms {
                view_proj: camera.view_proj(&session.view).into(),
                camera_pos: [camera.position.x, camera.position.y, camera.position.z, 1.0],
                light_pos: [light.x, light.y, light.z, 1.0],
            };

            (
                uniforms,
                mesh::build_scene_vertices(&state.sphere, &session.bodies),
                overlay::build_overlay_vertices(&session.core.overlay(), aspect),
            )
        });

        scene_vertices.truncate(SCENE_VERTEX_CAPACITY);
        overlay_vertices.truncate(OVERLAY_VERTEX_CAPACITY);

        state
            .queue
            .write_buffer(&state.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        if !scene_vertices.is_empty() {
            state.queue.write_buffer(
                &state.scene_vertex_buffer,
                0,
                bytemuck::cast_slice(&scene_vertices),
            );
        }
        if !overlay_vertices.is_empty() {
            state.queue.write_buffer(
                &state.overlay_vertex_buffer,
                0,
                bytemuck::cast_slice(&overlay_vertices),
            );
        }

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Orrery Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !scene_vertices.is_empty() {
                pass.set_pipeline(&state.scene_pipeline);
                pass.set_bind_group(0, &state.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, state.scene_vertex_buffer.slice(..));
                pass.draw(0..scene_vertices.len() as u32, 0..1);
            }

            if !overlay_vertices.is_empty() {
                pass.set_pipeline(&state.overlay_pipeline);
                pass.set_vertex_buffer(0, state.overlay_vertex_buffer.slice(..));
                pass.draw(0..overlay_vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}
