//! The central compact body and its Schwarzschild geometry.
//!
//! [`BlackHole`] is the authority for every radius the rest of the crate
//! uses. All derived quantities are pure functions of [`BlackHoleParams`].
//!
//! # Example
//!
//! ```ignore
//! use gargantua::prelude::*;
//!
//! let bh = BlackHole::new(BlackHoleParams::default());
//! let rs = bh.event_horizon_radius();
//!
//! // Clocks at 3 r_s tick at ~82% of the far-away rate
//! let factor = bh.time_dilation(DVec3::new(3.0 * rs, 0.0, 0.0));
//! ```

use crate::constants::{
    C, DISK_HALF_THICKNESS, G, LENSING_CUTOFF, LENSING_MIN_ALIGNMENT, PHOTON_SPHERE_FACTOR,
    SOLAR_MASS,
};
use crate::disk::DiskSampler;
use crate::error::ConfigError;
use crate::guarded::{Degeneracy, Guarded};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Event-horizon radius (m) of a non-rotating body of `mass_solar` solar masses.
#[inline]
pub fn schwarzschild_radius(mass_solar: f64) -> f64 {
    2.0 * G * mass_solar * SOLAR_MASS / (C * C)
}

/// Schwarzschild time-dilation factor at radial distance `r` from a body
/// whose horizon radius is `rs`.
///
/// Distances at or inside the horizon are degenerate; callers normally
/// collapse that to `0.0`.
pub fn dilation_factor(rs: f64, r: f64) -> Guarded<f64> {
    if r <= rs {
        return Guarded::Degenerate(Degeneracy::InsideHorizon);
    }
    Guarded::Computed((1.0 - rs / r).max(0.0).sqrt())
}

/// Physical parameters of the central mass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlackHoleParams {
    /// Mass in solar masses.
    pub mass: f64,
    /// Dimensionless spin in `[0, 1)`. Carried for consumers, unused by the
    /// Schwarzschild derivations.
    pub spin: f64,
    /// Accretion disk inner edge, in event-horizon radii.
    pub disk_inner: f64,
    /// Accretion disk outer edge, in event-horizon radii.
    pub disk_outer: f64,
    /// World position (m).
    pub position: DVec3,
}

impl Default for BlackHoleParams {
    /// A supermassive body of 10⁸ solar masses with a wide disk.
    fn default() -> Self {
        Self {
            mass: 1.0e8,
            spin: 0.6,
            disk_inner: 1.5,
            disk_outer: 40.0,
            position: DVec3::ZERO,
        }
    }
}

impl BlackHoleParams {
    /// Parameters for a body of the given mass, other values default.
    pub fn new(mass: f64) -> Self {
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Set the spin parameter.
    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    /// Set the accretion disk edges in event-horizon radii.
    pub fn with_disk(mut self, inner: f64, outer: f64) -> Self {
        self.disk_inner = inner;
        self.disk_outer = outer;
        self
    }

    /// Set the world position.
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Check the parameter contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "black hole mass must be positive, got {}",
                self.mass
            )));
        }
        if !(0.0..1.0).contains(&self.spin) {
            return Err(ConfigError::invalid(format!(
                "spin must be in [0, 1), got {}",
                self.spin
            )));
        }
        if !(self.disk_inner > 0.0 && self.disk_inner < self.disk_outer) {
            return Err(ConfigError::invalid(format!(
                "disk radii must satisfy 0 < inner < outer, got {} and {}",
                self.disk_inner, self.disk_outer
            )));
        }
        if !self.position.is_finite() {
            return Err(ConfigError::invalid("black hole position must be finite"));
        }
        Ok(())
    }
}

/// A Schwarzschild black hole.
///
/// Immutable once built; reconfigure with [`BlackHole::reconfigure`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlackHole {
    params: BlackHoleParams,
}

impl BlackHole {
    /// Create a black hole from validated parameters.
    ///
    /// # Panics
    ///
    /// Panics if the parameters break their contract (see
    /// [`BlackHoleParams::validate`]).
    pub fn new(params: BlackHoleParams) -> Self {
        if let Err(e) = params.validate() {
            panic!("Invalid black hole parameters: {}", e);
        }
        Self { params }
    }

    /// Replace the parameters.
    ///
    /// # Panics
    ///
    /// Panics on invalid parameters, like [`BlackHole::new`].
    pub fn reconfigure(&mut self, params: BlackHoleParams) {
        *self = Self::new(params);
    }

    /// The configured parameters.
    #[inline]
    pub fn params(&self) -> &BlackHoleParams {
        &self.params
    }

    /// World position (m).
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.params.position
    }

    /// Mass in kilograms.
    #[inline]
    pub fn mass_kg(&self) -> f64 {
        self.params.mass * SOLAR_MASS
    }

    /// Event-horizon (Schwarzschild) radius, `2GM/c²`.
    #[inline]
    pub fn event_horizon_radius(&self) -> f64 {
        schwarzschild_radius(self.params.mass)
    }

    /// Photon-sphere radius, `1.5 r_s`.
    #[inline]
    pub fn photon_sphere_radius(&self) -> f64 {
        PHOTON_SPHERE_FACTOR * self.event_horizon_radius()
    }

    /// Inner and outer accretion disk radii in metres.
    pub fn disk_radii(&self) -> (f64, f64) {
        let rs = self.event_horizon_radius();
        (self.params.disk_inner * rs, self.params.disk_outer * rs)
    }

    /// Time-dilation factor at `position`, reporting the horizon guard.
    pub fn dilation(&self, position: DVec3) -> Guarded<f64> {
        let r = position.distance(self.params.position);
        dilation_factor(self.event_horizon_radius(), r)
    }

    /// Time-dilation factor at `position`: `0` at or inside the horizon,
    /// approaching `1` far away.
    #[inline]
    pub fn time_dilation(&self, position: DVec3) -> f64 {
        self.dilation(position).value_or(0.0)
    }

    /// Bend a ray toward the body, reporting degenerate geometry.
    ///
    /// Rays whose line passes farther than 10 r_s are returned as given. Closer
    /// rays are pulled toward the body by `(r_s / b) * (1 - cos θ)`, but only
    /// when they are heading toward it (`cos θ > 0.1`); others are returned
    /// as given too.
    pub fn deflect_ray(&self, ray_origin: DVec3, ray_direction: DVec3) -> Guarded<DVec3> {
        let dir = ray_direction.normalize_or_zero();
        if dir == DVec3::ZERO {
            return Guarded::Degenerate(Degeneracy::ZeroDistance);
        }

        let rs = self.event_horizon_radius();
        let relative = ray_origin - self.params.position;
        let impact = (relative - relative.dot(dir) * dir).length();

        if impact >= LENSING_CUTOFF * rs {
            return Guarded::Computed(ray_direction);
        }
        if impact <= 0.0 {
            return Guarded::Degenerate(Degeneracy::ZeroImpactParameter);
        }

        // impact > 0 means the origin is off the body
        let to_body = (self.params.position - ray_origin).normalize();
        let alignment = dir.dot(to_body);
        if alignment <= LENSING_MIN_ALIGNMENT {
            return Guarded::Computed(ray_direction);
        }

        let distortion = rs / impact * (1.0 - alignment);
        Guarded::Computed((dir + to_body * distortion).normalize())
    }

    /// Lensed direction of a ray; degenerate rays come back unchanged.
    #[inline]
    pub fn lensing_deflection(&self, ray_origin: DVec3, ray_direction: DVec3) -> DVec3 {
        self.deflect_ray(ray_origin, ray_direction)
            .value_or(ray_direction)
    }

    /// Draw `count` points from the accretion disk.
    ///
    /// Radii are the square of a uniform draw over `[√inner, √outer]`, which
    /// favours the inner edge. Angles are uniform, heights uniform within
    /// ±10% of the outer radius. Points are in world
    /// space with the disk in the body's XZ plane.
    pub fn sample_accretion_disk(&self, count: usize, sampler: &mut DiskSampler) -> Vec<DVec3> {
        let (inner, outer) = self.disk_radii();
        let half_height = DISK_HALF_THICKNESS * outer;
        (0..count)
            .map(|_| self.params.position + sampler.annulus_point(inner, outer, half_height))
            .collect()
    }
}

impl Default for BlackHole {
    fn default() -> Self {
        Self::new(BlackHoleParams::default())
    }
}
