//! Random sampling of accretion disk points.
//!
//! The sampler owns its RNG so results are reproducible when seeded and
//! independent across samplers otherwise.

use glam::DVec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Random source for accretion disk sampling.
///
/// ```ignore
/// let mut sampler = DiskSampler::seeded(42);
/// let points = black_hole.sample_accretion_disk(10_000, &mut sampler);
/// ```
#[derive(Clone, Debug)]
pub struct DiskSampler {
    rng: SmallRng,
}

impl DiskSampler {
    /// A deterministic sampler. Same seed, same points.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// A sampler seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Random point in a thick annulus centered at the origin.
    ///
    /// The annulus lies in the XZ plane between `inner` and `outer`, with Y
    /// uniform in `[-half_height, half_height]`.
    pub fn annulus_point(&mut self, inner: f64, outer: f64, half_height: f64) -> DVec3 {
        // Uniform in sqrt(r), then squared
        let root = self.rng.gen_range(inner.sqrt()..=outer.sqrt());
        let r = (root * root).clamp(inner, outer);
        let theta = self.rng.gen_range(0.0..TAU);
        let height = if half_height > 0.0 {
            self.rng.gen_range(-half_height..=half_height)
        } else {
            0.0
        };

        DVec3::new(r * theta.cos(), height, r * theta.sin())
    }
}

impl Default for DiskSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}
