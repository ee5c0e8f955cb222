//! # Gargantua - Schwarzschild black hole simulation core
//!
//! The physics behind a black hole visualization: horizon geometry, time
//! dilation, gravitational lensing, accretion disk sampling and Newtonian
//! orbital dynamics around a central mass.
//!
//! Gargantua does no drawing. A renderer reads positions, lens maps and
//! per-body instances from it each frame and uploads them however it likes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gargantua::prelude::*;
//!
//! fn main() {
//!     let scene = Scene::from_config(&SceneConfig::default()).unwrap();
//!     let mut session = scene.session();
//!
//!     for _ in 0..1000 {
//!         session.tick();
//!     }
//!     println!("{}", session.status());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Black hole
//!
//! [`BlackHole`] wraps a set of [`BlackHoleParams`] (mass in solar masses,
//! spin, disk radii in horizon units, position in metres) and derives every
//! length from the Schwarzschild radius `r_s = 2GM/c²`:
//!
//! ```ignore
//! let bh = BlackHole::new(BlackHoleParams::new(4.0e6).with_disk(3.0, 20.0));
//!
//! let rs = bh.event_horizon_radius();
//! let photon_sphere = bh.photon_sphere_radius();   // 1.5 r_s
//! let factor = bh.time_dilation(DVec3::new(4.0 * rs, 0.0, 0.0)); // √0.75
//! ```
//!
//! ### Degenerate inputs
//!
//! Quantities that blow up at the singularity or at zero separation come back
//! as a [`Guarded`] value. `Guarded::Degenerate` says *why* no value exists;
//! the plain accessors (`time_dilation`, `lensing_deflection`,
//! `tidal_acceleration`) collapse it to a documented fallback.
//!
//! ### Lensing
//!
//! [`LensMap`] precomputes screen-space deflection and magnification for one
//! camera position on an N×N grid. [`LensMap::texels`] packs it for upload.
//!
//! ### Dynamics
//!
//! [`Dynamics`] integrates bodies under the black hole's pull and their
//! mutual gravity with velocity Verlet. It borrows the black hole, so the
//! black hole must outlive it; [`Scene`] and [`Session`] arrange that.
//!
//! ### Time
//!
//! [`ProperTime`] accumulates proper and coordinate time for an observer from
//! wall-clock frame times and keeps a bounded history.

pub mod black_hole;
pub mod config;
pub mod constants;
pub mod disk;
pub mod dynamics;
pub mod error;
pub mod guarded;
pub mod lensing;
pub mod scene;
pub mod time;

pub use black_hole::{dilation_factor, schwarzschild_radius, BlackHole, BlackHoleParams};
pub use bytemuck;
pub use config::{BodyConfig, SceneConfig};
pub use disk::DiskSampler;
pub use dynamics::{Body, BodyInstance, Dynamics};
pub use error::ConfigError;
pub use glam::{DVec2, DVec3};
pub use guarded::{Degeneracy, Guarded};
pub use lensing::{LensMap, LensSample, LensTexel, DEFAULT_LENS_RESOLUTION};
pub use scene::{Scene, Session, Status};
pub use time::{DilationSample, ProperTime};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use gargantua::prelude::*;
/// ```
pub mod prelude {
    pub use crate::black_hole::{BlackHole, BlackHoleParams};
    pub use crate::config::{BodyConfig, SceneConfig};
    pub use crate::constants::{C, G, SOLAR_MASS};
    pub use crate::disk::DiskSampler;
    pub use crate::dynamics::{Body, Dynamics};
    pub use crate::error::ConfigError;
    pub use crate::guarded::{Degeneracy, Guarded};
    pub use crate::lensing::LensMap;
    pub use crate::scene::{Scene, Session};
    pub use crate::time::ProperTime;
    pub use crate::{DVec2, DVec3};
}
