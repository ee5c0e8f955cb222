//! Precomputed gravitational lensing map.
//!
//! Bending every pixel's ray each frame is expensive, so [`LensMap`] does it
//! once per camera/scene configuration and stores the result in a square
//! grid covering normalized screen space `[-1, 1]²`. Lookups are O(1) and
//! always land on a valid cell.
//!
//! # Example
//!
//! ```ignore
//! let mut lens = LensMap::new();
//! lens.build_for(&black_hole, camera_position, 256);
//!
//! // Per pixel, per frame
//! let offset = lens.deflection_at(DVec2::new(u, v));
//! let gain = lens.magnification_at(DVec2::new(u, v));
//! ```
//!
//! The deflection uses the weak-field point-mass angle `4GM / (c² b)`, which
//! is only meaningful well outside the photon sphere. Close to the body the
//! values are a visual approximation.

use crate::black_hole::{schwarzschild_radius, BlackHole};
use crate::constants::{C, G, SOLAR_MASS};
use glam::{DVec2, DVec3};
use std::time::Instant;

/// Resolution used when none is configured.
pub const DEFAULT_LENS_RESOLUTION: u32 = 512;

/// Empirical scale from deflection angle (radians) to screen units.
const DEFLECTION_SCALE: f64 = 0.1;

/// Floor on the Jacobian proxy so magnification stays finite.
const MIN_JACOBIAN: f64 = 0.001;

/// One cell of the lens map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensSample {
    /// Screen coordinate of the cell corner, in `[-1, 1]²`.
    pub screen_pos: DVec2,
    /// Screen-space deflection of the ray through this cell.
    pub deflection: DVec2,
    /// Approximate magnification, always `> 0`.
    pub magnification: f64,
    /// Closest approach of the undeflected ray to the body (m).
    pub impact_parameter: f64,
}

impl LensSample {
    /// Sample for an unlensed sky: no deflection, unit magnification.
    pub const IDENTITY: LensSample = LensSample {
        screen_pos: DVec2::ZERO,
        deflection: DVec2::ZERO,
        magnification: 1.0,
        impact_parameter: f64::INFINITY,
    };
}

/// GPU-ready packing of one lens cell.
///
/// Layout: `deflection.xy`, `magnification`, impact parameter in horizon
/// radii. 16 bytes, matches a WGSL `vec4<f32>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LensTexel {
    pub deflection: [f32; 2],
    pub magnification: f32,
    pub impact: f32,
}

/// Grid of per-pixel deflection and magnification values.
#[derive(Clone, Debug, Default)]
pub struct LensMap {
    samples: Vec<LensSample>,
    resolution: u32,
    horizon_radius: f64,
}

impl LensMap {
    /// Create an empty map. Lookups return [`LensSample::IDENTITY`] values
    /// until the first build.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map for a body and camera.
    ///
    /// `black_hole_mass` is in solar masses. The camera looks down `-Z`; the
    /// ray through screen point `(x, y)` has direction `normalize(x, y, -1)`.
    /// Cells are laid out row-major with `x` as the outer index. Identical
    /// inputs always produce an identical map.
    pub fn build(
        &mut self,
        black_hole_position: DVec3,
        black_hole_mass: f64,
        camera_position: DVec3,
        resolution: u32,
    ) {
        let started = Instant::now();
        let resolution = if resolution == 0 {
            log::warn!("Lens map resolution 0 requested, using 1");
            1
        } else {
            resolution
        };

        self.samples.clear();
        self.samples.reserve((resolution as usize).pow(2));
        self.resolution = resolution;
        self.horizon_radius = schwarzschild_radius(black_hole_mass);

        let mass_kg = black_hole_mass * SOLAR_MASS;
        let res = resolution as f64;
        for i in 0..resolution {
            for j in 0..resolution {
                let screen_pos = DVec2::new(2.0 * i as f64 / res - 1.0, 2.0 * j as f64 / res - 1.0);
                let (deflection, impact_parameter) =
                    trace_ray(screen_pos, black_hole_position, camera_position, mass_kg);

                self.samples.push(LensSample {
                    screen_pos,
                    deflection,
                    magnification: magnification(deflection),
                    impact_parameter,
                });
            }
        }

        log::debug!(
            "Built {}x{} lens map in {:.2?}",
            resolution,
            resolution,
            started.elapsed()
        );
    }

    /// Rebuild the map for `black_hole` seen from `camera_position`.
    pub fn build_for(&mut self, black_hole: &BlackHole, camera_position: DVec3, resolution: u32) {
        self.build(
            black_hole.position(),
            black_hole.params().mass,
            camera_position,
            resolution,
        );
    }

    /// Cells per axis (0 before the first build).
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Whether the map has been built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All cells in storage order (`i * resolution + j`).
    #[inline]
    pub fn samples(&self) -> &[LensSample] {
        &self.samples
    }

    /// The cell nearest to `screen_pos`. Coordinates outside `[-1, 1]`
    /// resolve to the edge cell.
    pub fn sample_at(&self, screen_pos: DVec2) -> Option<&LensSample> {
        if self.resolution == 0 {
            return None;
        }
        let res = self.resolution as f64;
        let max = self.resolution as i64 - 1;
        // `as` saturates and maps NaN to 0
        let i = (((screen_pos.x + 1.0) * 0.5 * res) as i64).clamp(0, max);
        let j = (((screen_pos.y + 1.0) * 0.5 * res) as i64).clamp(0, max);
        self.samples.get((i * (max + 1) + j) as usize)
    }

    /// Screen-space deflection at `screen_pos`.
    pub fn deflection_at(&self, screen_pos: DVec2) -> DVec2 {
        self.sample_at(screen_pos)
            .map_or(LensSample::IDENTITY.deflection, |s| s.deflection)
    }

    /// Magnification at `screen_pos`.
    pub fn magnification_at(&self, screen_pos: DVec2) -> f64 {
        self.sample_at(screen_pos)
            .map_or(LensSample::IDENTITY.magnification, |s| s.magnification)
    }

    /// Pack the grid for upload as a `resolution × resolution` texture.
    pub fn texels(&self) -> Vec<LensTexel> {
        let rs = self.horizon_radius;
        self.samples
            .iter()
            .map(|s| LensTexel {
                deflection: [s.deflection.x as f32, s.deflection.y as f32],
                magnification: s.magnification as f32,
                impact: if rs > 0.0 {
                    (s.impact_parameter / rs) as f32
                } else {
                    f32::INFINITY
                },
            })
            .collect()
    }
}

/// Deflection and impact parameter of the ray through `screen_pos`.
fn trace_ray(screen_pos: DVec2, black_hole: DVec3, camera: DVec3, mass_kg: f64) -> (DVec2, f64) {
    let dir = DVec3::new(screen_pos.x, screen_pos.y, -1.0).normalize();

    // Closest approach of the straight ray to the body
    let t = (black_hole - camera).dot(dir);
    let closest = camera + dir * t;
    let impact = black_hole - closest;
    let b = impact.length();

    if b <= 0.0 {
        return (DVec2::ZERO, b);
    }

    let angle = 4.0 * G * mass_kg / (C * C * b);
    if !angle.is_finite() {
        return (DVec2::ZERO, b);
    }

    let lateral = DVec2::new(impact.x, impact.y).normalize_or_zero();
    (lateral * angle * DEFLECTION_SCALE, b)
}

/// Inverse of a 2×2 Jacobian-determinant proxy built from the deflection.
fn magnification(deflection: DVec2) -> f64 {
    let (dx, dy) = (deflection.x, deflection.y);
    let jacobian = ((1.0 + dx) * (1.0 + dy) - dx * dy).abs();
    (1.0 / jacobian.max(MIN_JACOBIAN)).max(f64::MIN_POSITIVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASS: f64 = 1.0e8;

    fn camera() -> DVec3 {
        DVec3::new(0.0, 0.0, 100.0 * schwarzschild_radius(MASS))
    }

    fn built(resolution: u32) -> LensMap {
        let mut lens = LensMap::new();
        lens.build(DVec3::ZERO, MASS, camera(), resolution);
        lens
    }

    // ========== Build ==========

    #[test]
    fn test_build_fills_grid() {
        let lens = built(32);
        assert_eq!(lens.resolution(), 32);
        assert_eq!(lens.samples().len(), 32 * 32);
        assert!(lens.samples().iter().all(|s| s.magnification > 0.0));
        assert!(lens.samples().iter().all(|s| s.deflection.is_finite()));
    }

    #[test]
    fn test_row_major_layout() {
        let lens = built(4);
        let s = &lens.samples()[1 * 4 + 2];
        assert_eq!(s.screen_pos, DVec2::new(-0.5, 0.0));
        assert_eq!(lens.samples()[0].screen_pos, DVec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = built(48);
        let mut b = built(16);
        b.build(DVec3::ZERO, MASS, camera(), 48);
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_rebuild_replaces_previous_map() {
        let mut lens = built(32);
        lens.build(DVec3::ZERO, MASS, camera(), 8);
        assert_eq!(lens.samples().len(), 64);
    }

    #[test]
    fn test_zero_resolution_raised_to_one() {
        let lens = built(0);
        assert_eq!(lens.resolution(), 1);
        assert_eq!(lens.samples().len(), 1);
    }

    // ========== Physics ==========

    #[test]
    fn test_center_ray_hits_body_without_deflection() {
        let lens = built(64);
        assert_eq!(lens.deflection_at(DVec2::ZERO), DVec2::ZERO);
        assert!((lens.magnification_at(DVec2::ZERO) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_deflection_points_toward_body() {
        let lens = built(64);
        let right = lens.deflection_at(DVec2::new(0.5, 0.0));
        assert!(right.x < 0.0);
        let up = lens.deflection_at(DVec2::new(0.0, 0.5));
        assert!(up.y < 0.0);
    }

    #[test]
    fn test_deflection_weakens_with_distance() {
        let lens = built(64);
        let near = lens.deflection_at(DVec2::new(0.1, 0.0)).length();
        let far = lens.deflection_at(DVec2::new(0.9, 0.0)).length();
        assert!(near > far);
    }

    #[test]
    fn test_magnification_floor() {
        // Jacobian proxy of zero is floored at 0.001
        let m = magnification(DVec2::new(-0.5, -0.5));
        assert!((m - 1000.0).abs() < 1e-9);
        assert!(magnification(DVec2::splat(1.0e200)) > 0.0);
    }

    // ========== Lookup ==========

    #[test]
    fn test_lookup_clamps_out_of_range() {
        let lens = built(16);
        let corner = lens.samples()[0];
        assert_eq!(lens.deflection_at(DVec2::new(-5.0, -5.0)), corner.deflection);
        let last = lens.samples()[16 * 16 - 1];
        assert_eq!(lens.magnification_at(DVec2::new(7.0, 1.0)), last.magnification);
        assert_eq!(lens.magnification_at(DVec2::new(1.0, 1.0)), last.magnification);
    }

    #[test]
    fn test_lookup_never_fails() {
        let lens = built(8);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0e300, 1.0e300, 0.0] {
            let d = lens.deflection_at(DVec2::new(v, -v));
            assert!(d.is_finite());
            assert!(lens.magnification_at(DVec2::new(v, v)) > 0.0);
        }
    }

    #[test]
    fn test_empty_map_lookup() {
        let lens = LensMap::new();
        assert!(lens.is_empty());
        assert_eq!(lens.deflection_at(DVec2::new(0.3, 0.3)), DVec2::ZERO);
        assert_eq!(lens.magnification_at(DVec2::ZERO), 1.0);
    }

    #[test]
    fn test_texels_match_samples() {
        let lens = built(8);
        let texels = lens.texels();
        assert_eq!(texels.len(), 64);
        let bytes: &[u8] = bytemuck::cast_slice(&texels);
        assert_eq!(bytes.len(), 64 * 16);
        let s = lens.samples()[9];
        assert!((texels[9].magnification - s.magnification as f32).abs() < 1e-6);
    }
}
