//! N-body orbital dynamics around the central black hole.
//!
//! Each [`Dynamics::step`] runs velocity Verlet in four phases:
//!
//! 1. accelerations at the current positions
//! 2. `x += v dt + ½ a dt²`
//! 3. accelerations at the new positions
//! 4. `v += ½ (a_old + a_new) dt`
//!
//! Forces are Newtonian point-mass gravity from the primary and from every
//! other body, O(N²) per evaluation. Intended for tens of bodies, not
//! thousands. Coincident pairs contribute nothing; there is no collision
//! handling.

use crate::black_hole::BlackHole;
use crate::constants::G;
use crate::guarded::{Degeneracy, Guarded};
use glam::DVec3;

/// A point mass orbiting the black hole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Acceleration from the most recent force evaluation.
    pub acceleration: DVec3,
    /// Mass in kilograms.
    pub mass: f64,
    /// Display radius (m). Has no physical effect.
    pub radius: f64,
}

impl Body {
    /// Create a body with zero acceleration and unit display radius.
    pub fn new(position: DVec3, velocity: DVec3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration: DVec3::ZERO,
            mass,
            radius: 1.0,
        }
    }

    /// Set the display radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// A body on a circular orbit of `orbit_radius` around `primary`.
    ///
    /// The orbit lies in the primary's XZ plane (the disk plane), starting
    /// at angle `phase` from +X, with speed `sqrt(GM / r)` perpendicular to
    /// the radius.
    pub fn circular_orbit(primary: &BlackHole, orbit_radius: f64, phase: f64, mass: f64) -> Self {
        let offset = DVec3::new(phase.cos(), 0.0, phase.sin()) * orbit_radius;
        let speed = if orbit_radius > 0.0 {
            (G * primary.mass_kg() / orbit_radius).sqrt()
        } else {
            0.0
        };
        let tangent = DVec3::new(offset.z, 0.0, -offset.x).normalize_or_zero();
        Self::new(primary.position() + offset, tangent * speed, mass)
    }

    /// Pack position and radius for instanced rendering.
    pub fn instance(&self) -> BodyInstance {
        BodyInstance {
            position: self.position.as_vec3().to_array(),
            radius: self.radius as f32,
        }
    }
}

/// GPU-ready per-body instance data (16 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
}

/// The orbital integrator.
///
/// Borrows its primary: the scene owns the [`BlackHole`], the engine only
/// reads its mass and position.
#[derive(Clone, Debug, Default)]
pub struct Dynamics<'a> {
    primary: Option<&'a BlackHole>,
    bodies: Vec<Body>,
}

impl<'a> Dynamics<'a> {
    /// An engine with no primary and no bodies.
    pub fn new() -> Self {
        Self {
            primary: None,
            bodies: Vec::new(),
        }
    }

    /// Set the central body.
    pub fn set_primary(&mut self, primary: &'a BlackHole) {
        self.primary = Some(primary);
    }

    /// The central body, if any.
    #[inline]
    pub fn primary(&self) -> Option<&'a BlackHole> {
        self.primary
    }

    /// Add a body. Bodies are never removed.
    ///
    /// # Panics
    ///
    /// Panics if the body's mass is not positive.
    pub fn add_body(&mut self, body: Body) {
        assert!(body.mass > 0.0, "Body mass must be positive, got {}", body.mass);
        self.bodies.push(body);
    }

    /// All bodies in insertion order.
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advance every body by `delta_time` seconds.
    pub fn step(&mut self, delta_time: f64) {
        self.compute_accelerations();
        let previous: Vec<DVec3> = self.bodies.iter().map(|b| b.acceleration).collect();

        self.advance_positions(delta_time);
        self.compute_accelerations();
        self.advance_velocities(&previous, delta_time);
    }

    /// Tidal acceleration at `position`, reporting missing primary or
    /// zero distance.
    pub fn tidal(&self, position: DVec3) -> Guarded<DVec3> {
        let Some(primary) = self.primary else {
            return Guarded::Degenerate(Degeneracy::NoPrimary);
        };
        let to_primary = primary.position() - position;
        let distance = to_primary.length();
        if distance == 0.0 {
            return Guarded::Degenerate(Degeneracy::ZeroDistance);
        }
        let gradient = 2.0 * G * primary.mass_kg() / (distance * distance * distance);
        Guarded::Computed(to_primary / distance * gradient)
    }

    /// Radial tidal acceleration `2GM/d³` toward the primary; zero when
    /// there is no primary or `position` coincides with it.
    #[inline]
    pub fn tidal_acceleration(&self, position: DVec3) -> DVec3 {
        self.tidal(position).value_or_default()
    }

    /// Recompute every body's acceleration from the current positions.
    fn compute_accelerations(&mut self) {
        let primary = self.primary.map(|p| (p.position(), p.mass_kg()));

        for i in 0..self.bodies.len() {
            let position = self.bodies[i].position;
            let mut acceleration = DVec3::ZERO;

            if let Some((center, mass)) = primary {
                acceleration += pull(position, center, mass);
            }
            for (j, other) in self.bodies.iter().enumerate() {
                if i != j {
                    acceleration += pull(position, other.position, other.mass);
                }
            }

            self.bodies[i].acceleration = acceleration;
        }
    }

    fn advance_positions(&mut self, dt: f64) {
        for body in &mut self.bodies {
            body.position += body.velocity * dt + 0.5 * body.acceleration * dt * dt;
        }
    }

    fn advance_velocities(&mut self, previous: &[DVec3], dt: f64) {
        for (body, old) in self.bodies.iter_mut().zip(previous) {
            body.velocity += 0.5 * (*old + body.acceleration) * dt;
        }
    }
}

/// Newtonian acceleration at `from` toward a point mass at `to`.
#[inline]
fn pull(from: DVec3, to: DVec3, mass: f64) -> DVec3 {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        delta / distance * (G * mass / (distance * distance))
    } else {
        DVec3::ZERO
    }
}
