//! Ray-vs-sphere picking
//!
//! The selection machine only ever consumes the nearest positive hit;
//! hits behind the ray origin are discarded.

use nalgebra::{Point3, Vector3};

use super::bodies::{BodyId, BodySet};

/// Minimum hit distance: anything closer is treated as behind/at the origin
const HIT_EPSILON: f32 = 1e-4;

/// A world-space ray with unit direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

/// One ray-body intersection, at `distance` along the ray from its origin
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub body: BodyId,
    pub distance: f32,
}

/// Smallest positive distance at which `ray` meets the sphere, if any
fn sphere_hit(ray: &Ray, center: Point3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(&ray.direction);
    let c = oc.dot(&oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    // Near root first; fall back to the far root when the origin is inside
    let near = -b - sqrt_d;
    if near > HIT_EPSILON {
        return Some(near);
    }
    let far = -b + sqrt_d;
    (far > HIT_EPSILON).then_some(far)
}

/// All selectable bodies the ray meets, ordered nearest-first
pub fn intersect(ray: &Ray, bodies: &BodySet) -> Vec<Hit> {
    let mut hits: Vec<Hit> = bodies
        .selectable()
        .filter_map(|body| {
            sphere_hit(ray, body.position, body.radius).map(|distance| Hit {
                body: body.id,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest selectable body along the ray, if any
pub fn nearest(ray: &Ray, bodies: &BodySet) -> Option<Hit> {
    intersect(ray, bodies).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::bodies::Body;

    fn single_sphere(center: (f32, f32, f32), radius: f32) -> BodySet {
        let mut set = BodySet::solar_system();
        // Repurpose Terra; push the others far away
        for id in [0usize, 2, 3] {
            set.get_mut(BodyId(id)).unwrap().position = Point3::new(0.0, 1e6, 0.0);
        }
        let terra: &mut Body = set.get_mut(BodyId(1)).unwrap();
        terra.position = Point3::new(center.0, center.1, center.2);
        terra.radius = radius;
        set
    }

    fn ray(origin: (f32, f32, f32), dir: (f32, f32, f32)) -> Ray {
        Ray {
            origin: Point3::new(origin.0, origin.1, origin.2),
            direction: Vector3::new(dir.0, dir.1, dir.2).normalize(),
        }
    }

    #[test]
    fn direct_hit_reports_entry_distance() {
        let set = single_sphere((0.0, 0.0, -10.0), 2.0);
        let hit = nearest(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)), &set).unwrap();
        assert_eq!(hit.body, BodyId(1));
        assert!((hit.distance - 8.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let set = single_sphere((0.0, 0.0, 10.0), 2.0);
        assert!(nearest(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)), &set).is_none());
    }

    #[test]
    fn miss_reports_nothing() {
        let set = single_sphere((5.0, 0.0, -10.0), 1.0);
        assert!(nearest(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)), &set).is_none());
    }

    #[test]
    fn nearest_wins_when_spheres_stack() {
        let mut set = BodySet::solar_system();
        set.get_mut(BodyId(0)).unwrap().position = Point3::new(0.0, 1e6, 0.0);
        set.get_mut(BodyId(1)).unwrap().position = Point3::new(0.0, 0.0, -20.0);
        set.get_mut(BodyId(2)).unwrap().position = Point3::new(0.0, 0.0, -10.0);
        set.get_mut(BodyId(3)).unwrap().position = Point3::new(0.0, 1e6, 0.0);

        let hits = intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)), &set);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].body, BodyId(2));
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn unselectable_sun_never_hits() {
        let set = BodySet::solar_system();
        // Aim straight at the sun from the overview direction
        let r = ray((0.0, 0.0, 30.0), (0.0, 0.0, -1.0));
        assert!(nearest(&r, &set).into_iter().all(|h| h.body != BodyId(0)));
    }

    #[test]
    fn origin_inside_sphere_uses_far_root() {
        let set = single_sphere((0.0, 0.0, 0.0), 5.0);
        let hit = nearest(&ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0)), &set).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-4);
    }
}
