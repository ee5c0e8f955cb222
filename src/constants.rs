//! Physical constants (SI units).
//!
//! World positions are expressed in metres, so every radius derived from
//! these constants can be compared directly against scene coordinates.

/// Gravitational constant (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.674_30e-11;

/// Speed of light in vacuum (m/s).
pub const C: f64 = 299_792_458.0;

/// One solar mass (kg).
pub const SOLAR_MASS: f64 = 1.989e30;

/// Photon sphere radius as a multiple of the event horizon (Schwarzschild).
pub const PHOTON_SPHERE_FACTOR: f64 = 1.5;

/// Rays passing farther than this many horizon radii are left unbent.
pub const LENSING_CUTOFF: f64 = 10.0;

/// Minimum alignment with the body before a ray is bent at all.
pub const LENSING_MIN_ALIGNMENT: f64 = 0.1;

/// Half-thickness of the accretion disk as a fraction of its outer radius.
pub const DISK_HALF_THICKNESS: f64 = 0.1;
