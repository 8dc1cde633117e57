//! The body set - a fixed roster of spheres created once at startup
//!
//! Positions only change through pinch-drag; everything else is constant
//! for the life of the session. Spin is presentation-only.

use nalgebra::Point3;

/// Identity of a body within the session's fixed set
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BodyId(pub usize);

/// A sphere in the scene. `selectable` gates ray picking: the central sun
/// is scenery, not a target.
pub struct Body {
    pub id: BodyId,
    pub name: &'static str,
    pub position: Point3<f32>,
    pub radius: f32,
    /// RGB base color; alpha carries the emissive weight for shading
    pub color: [f32; 4],
    pub selectable: bool,
    /// Current rotation about the Y axis (radians)
    pub spin: f32,
    /// Rotation advance per animation tick
    pub spin_rate: f32,
}

pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// The solar-system roster: an unselectable sun plus three planets
    pub fn solar_system() -> Self {
        let make = |id, name, pos: (f32, f32, f32), radius, color, selectable| Body {
            id: BodyId(id),
            name,
            position: Point3::new(pos.0, pos.1, pos.2),
            radius,
            color,
            selectable,
            spin: 0.0,
            spin_rate: 0.005,
        };
        Self {
            bodies: vec![
                make(0, "Sol", (0.0, 0.0, 0.0), 4.0, [1.0, 0.8, 0.0, 1.0], false),
                make(1, "Terra", (12.0, 0.0, 0.0), 1.2, [0.0, 0.67, 1.0, 0.2], true),
                make(2, "Marte", (-12.0, 0.0, 0.0), 1.0, [1.0, 0.27, 0.0, 0.2], true),
                make(3, "Venus", (5.0, 0.0, 9.0), 1.1, [0.9, 0.75, 0.5, 0.2], true),
            ],
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn selectable(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.selectable)
    }

    /// Advance presentation spin by one animation tick
    pub fn advance_spin(&mut self) {
        for body in &mut self.bodies {
            body.spin += body.spin_rate;
        }
    }
}
