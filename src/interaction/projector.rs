//! Pointer projector - normalized landmark coordinate to world-space ray
//!
//! The camera preview is displayed mirrored (selfie view), and MediaPipe
//! reports x in raw camera space. Passing x through unnegated is what makes
//! aiming line up with the mirrored preview: `ndc = (x*2-1, -(y*2-1))`.
//! Negating x here would silently swap left/right selection.

use nalgebra::{Point3, Vector4};

use crate::interaction::camera::{CameraRig, ViewParams};
use crate::scene::raycast::Ray;

const W_EPSILON: f32 = 1e-6;
const DIR_EPSILON: f32 = 1e-6;

/// Landmark coordinate to normalized device coordinates.
/// Y flips because landmark space runs top-down, NDC bottom-up.
pub fn to_ndc(pointer: (f32, f32)) -> (f32, f32) {
    (pointer.0 * 2.0 - 1.0, -(pointer.1 * 2.0 - 1.0))
}

/// Unproject one NDC point at the given depth through the inverse
/// view-projection matrix
fn unproject(
    inv_view_proj: &nalgebra::Matrix4<f32>,
    ndc: (f32, f32),
    depth: f32,
) -> Option<Point3<f32>> {
    let clip = Vector4::new(ndc.0, ndc.1, depth, 1.0);
    let h = inv_view_proj * clip;
    if !h.w.is_finite() || h.w.abs() < W_EPSILON {
        return None;
    }
    let p = Point3::new(h.x / h.w, h.y / h.w, h.z / h.w);
    (p.x.is_finite() && p.y.is_finite() && p.z.is_finite()).then_some(p)
}

/// Build the world-space pointer ray for a normalized landmark coordinate.
///
/// The ray runs from the near plane through the far plane. Returns `None`
/// on degenerate camera geometry; the caller skips the frame.
pub fn pointer_ray(pointer: (f32, f32), rig: &CameraRig, view: &ViewParams) -> Option<Ray> {
    let inv = rig.view_proj(view).try_inverse()?;
    let ndc = to_ndc(pointer);
    let near = unproject(&inv, ndc, 0.0)?;
    let far = unproject(&inv, ndc, 1.0)?;
    let dir = far - near;
    let len = dir.norm();
    if len < DIR_EPSILON {
        return None;
    }
    Some(Ray {
        origin: near,
        direction: dir / len,
    })
}

/// Intersect a pointer ray with the camera-facing plane at `plane_depth`
/// along the camera forward axis. Used by pinch-drag to keep a grabbed
/// body at its current distance from the camera.
pub fn reproject_to_depth_plane(ray: &Ray, rig: &CameraRig, plane_depth: f32) -> Option<Point3<f32>> {
    let forward = rig.forward()?;
    let denom = ray.direction.dot(&forward);
    if denom.abs() < DIR_EPSILON {
        // Ray parallel to the drag plane; skip this frame's move
        return None;
    }
    let t = (plane_depth - (ray.origin - rig.position).dot(&forward)) / denom;
    if t <= 0.0 || !t.is_finite() {
        return None;
    }
    let p = ray.origin + ray.direction * t;
    (p.x.is_finite() && p.y.is_finite() && p.z.is_finite()).then_some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn rig_and_view() -> (CameraRig, ViewParams) {
        (CameraRig::overview(), ViewParams::new(16.0 / 9.0))
    }

    #[test]
    fn center_pointer_aims_at_look_target() {
        let (rig, view) = rig_and_view();
        let ray = pointer_ray((0.5, 0.5), &rig, &view).unwrap();
        let to_target = (rig.look_target - rig.position).normalize();
        assert!(ray.direction.dot(&to_target) > 0.9999);
    }

    #[test]
    fn mirror_convention_keeps_raw_x() {
        // Landmark x > 0.5 (camera-space right) must land in +x NDC
        assert!(to_ndc((0.75, 0.5)).0 > 0.0);
        assert!(to_ndc((0.25, 0.5)).0 < 0.0);
        // Landmark y grows downward; NDC y grows upward
        assert!(to_ndc((0.5, 0.25)).1 > 0.0);
    }

    #[test]
    fn off_center_pointer_deviates_in_world_x() {
        let (rig, view) = rig_and_view();
        let right = pointer_ray((0.9, 0.5), &rig, &view).unwrap();
        let left = pointer_ray((0.1, 0.5), &rig, &view).unwrap();
        assert!(right.direction.x > 0.05);
        assert!(left.direction.x < -0.05);
    }

    #[test]
    fn ray_origin_sits_near_the_camera() {
        let (rig, view) = rig_and_view();
        let ray = pointer_ray((0.5, 0.5), &rig, &view).unwrap();
        assert!((ray.origin - rig.position).norm() < view.near * 2.0 + 0.05);
    }

    #[test]
    fn depth_plane_reprojection_preserves_distance() {
        let (rig, view) = rig_and_view();
        let ray = pointer_ray((0.6, 0.45), &rig, &view).unwrap();
        let forward = rig.forward().unwrap();
        let p = reproject_to_depth_plane(&ray, &rig, 20.0).unwrap();
        let depth = (p - rig.position).dot(&forward);
        assert!((depth - 20.0).abs() < 1e-3);
    }

    #[test]
    fn parallel_ray_skips_reprojection() {
        let (rig, _) = rig_and_view();
        let forward = rig.forward().unwrap();
        // A direction orthogonal to forward is parallel to the drag plane
        let sideways = forward.cross(&Vector3::y()).normalize();
        let ray = Ray {
            origin: rig.position,
            direction: sideways,
        };
        assert!(reproject_to_depth_plane(&ray, &rig, 10.0).is_none());
    }
}
