//! Sphere mesh building - per-frame lit vertices for every body
//!
//! One unit sphere is tessellated once at init; each frame it is scaled,
//! spun and translated per body on the CPU and the whole scene goes into
//! a single vertex buffer write.

use crate::scene::BodySet;

/// Vertex structure for the lit 3D pass
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl SceneVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// A unit sphere as a triangle list; position doubles as the normal
pub struct SphereTemplate {
    points: Vec<[f32; 3]>,
}

impl SphereTemplate {
    pub fn new(stacks: u32, slices: u32) -> Self {
        let point = |stack: u32, slice: u32| -> [f32; 3] {
            let theta = std::f32::consts::PI * stack as f32 / stacks as f32;
            let phi = std::f32::consts::TAU * slice as f32 / slices as f32;
            [
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ]
        };

        let mut points = Vec::with_capacity((stacks * slices * 6) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let p00 = point(stack, slice);
                let p01 = point(stack, slice + 1);
                let p10 = point(stack + 1, slice);
                let p11 = point(stack + 1, slice + 1);
                // Counter-clockwise winding, viewed from outside
                points.extend([p00, p11, p10]);
                points.extend([p00, p01, p11]);
            }
        }
        Self { points }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }
}

/// Build the full scene's vertex data for this frame
pub fn build_scene_vertices(template: &SphereTemplate, bodies: &BodySet) -> Vec<SceneVertex> {
    let mut vertices = Vec::with_capacity(template.vertex_count() * bodies.iter().count());

    for body in bodies.iter() {
        let (sin, cos) = body.spin.sin_cos();
        for p in &template.points {
            // Spin about Y, scale to radius, translate to the body
            let rx = p[0] * cos + p[2] * sin;
            let rz = -p[0] * sin + p[2] * cos;
            let normal = [rx, p[1], rz];
            vertices.push(SceneVertex {
                position: [
                    body.position.x + rx * body.radius,
                    body.position.y + p[1] * body.radius,
                    body.position.z + rz * body.radius,
                ],
                normal,
                color: body.color,
            });
        }
    }

    vertices
}
