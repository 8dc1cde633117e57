//! Camera rig - exponentially damped motion toward a published target
//!
//! The pose is never set directly by selection events; events only move the
//! target, and every animation tick pulls the pose a fixed fraction closer.
//! Two-hand zoom is the one exception: it shifts the distance additively
//! and drags the target along so damping does not fight it.

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Damping factor per tick: larger = snappier, smaller = smoother
pub const DAMPING: f32 = 0.05;

/// Camera standoff from a focused body, along the camera-to-body axis
pub const FOCUS_STANDOFF: f32 = 6.0;

/// Zoom distance clamp (world units from the look target)
pub const MIN_DISTANCE: f32 = 8.0;
pub const MAX_DISTANCE: f32 = 60.0;

const OVERVIEW_EYE: (f32, f32, f32) = (0.0, 5.0, 30.0);

/// Guard against zero-length axes when the camera sits on its target
const AXIS_EPSILON: f32 = 1e-4;

/// Projection parameters for the scene camera
#[derive(Clone, Copy, Debug)]
pub struct ViewParams {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl ViewParams {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Perspective matrix remapped from GL depth (-1..1) to wgpu depth (0..1)
    pub fn projection(&self) -> Matrix4<f32> {
        let gl_to_wgpu = Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.5, 0.5, //
            0.0, 0.0, 0.0, 1.0,
        );
        gl_to_wgpu * Perspective3::new(self.aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }
}

/// Camera pose plus the target pose it is being damped toward
pub struct CameraRig {
    pub position: Point3<f32>,
    pub look_target: Point3<f32>,
    target_position: Point3<f32>,
    target_look: Point3<f32>,
}

impl CameraRig {
    /// Start at the overview pose, already settled (no initial drift)
    pub fn overview() -> Self {
        let eye = Point3::new(OVERVIEW_EYE.0, OVERVIEW_EYE.1, OVERVIEW_EYE.2);
        Self {
            position: eye,
            look_target: Point3::origin(),
            target_position: eye,
            target_look: Point3::origin(),
        }
    }

    /// Publish a focus target: standoff from the body along the current
    /// camera-to-body axis, looking at the body
    pub fn focus_on(&mut self, body_pos: Point3<f32>) {
        let axis = self.position - body_pos;
        let dir = if axis.norm() > AXIS_EPSILON {
            axis.normalize()
        } else {
            Vector3::z()
        };
        self.target_position = body_pos + dir * FOCUS_STANDOFF;
        self.target_look = body_pos;
    }

    /// Publish the overview target
    pub fn release(&mut self) {
        self.target_position = Point3::new(OVERVIEW_EYE.0, OVERVIEW_EYE.1, OVERVIEW_EYE.2);
        self.target_look = Point3::origin();
    }

    /// One damping step: `pos <- lerp(pos, target, DAMPING)`
    pub fn step(&mut self) {
        self.position += (self.target_position - self.position) * DAMPING;
        self.look_target += (self.target_look - self.look_target) * DAMPING;
    }

    /// Additive zoom along the view axis, clamped to the distance range.
    /// Moves the target pose with it so the damper holds the new distance.
    pub fn apply_zoom_delta(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let offset = self.position - self.look_target;
        let dist = offset.norm();
        if dist <= AXIS_EPSILON {
            return;
        }
        let new_dist = (dist + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.look_target + offset * (new_dist / dist);
        self.target_position = self.position;
        self.target_look = self.look_target;
    }

    /// Current distance from the look target
    pub fn distance(&self) -> f32 {
        (self.position - self.look_target).norm()
    }

    /// Forward unit vector (camera toward look target)
    pub fn forward(&self) -> Option<Vector3<f32>> {
        let v = self.look_target - self.position;
        (v.norm() > AXIS_EPSILON).then(|| v.normalize())
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.look_target, &Vector3::y())
    }

    pub fn view_proj(&self, view: &ViewParams) -> Matrix4<f32> {
        view.projection() * self.view_matrix()
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::overview()
    }
}
