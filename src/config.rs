//! Scene configuration.
//!
//! A [`SceneConfig`] describes one simulation run: the black hole, the
//! bodies orbiting it, the viewpoint and a few run settings. It serializes to
//! JSON and is loaded by the `gargantua` runner.
//!
//! ```json
//! {
//!   "name": "Binary stars",
//!   "black_hole": { "mass": 4.0e6, "spin": 0.0, "disk_inner": 3.0,
//!                   "disk_outer": 20.0, "position": [0.0, 0.0, 0.0] },
//!   "bodies": [
//!     { "kind": "circular", "orbit_radius": 80.0, "mass": 2.0e30 },
//!     { "kind": "circular", "orbit_radius": 80.0, "phase": 3.14159, "mass": 2.0e30 }
//!   ],
//!   "time_step": 600.0
//! }
//! ```

use crate::black_hole::{schwarzschild_radius, BlackHole, BlackHoleParams};
use crate::constants::SOLAR_MASS;
use crate::dynamics::Body;
use crate::error::ConfigError;
use crate::lensing::DEFAULT_LENS_RESOLUTION;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Camera offset from the black hole, in horizon radii.
const DEFAULT_CAMERA_OFFSET: DVec3 = DVec3::new(0.0, 5.0, 30.0);

fn default_name() -> String {
    "Untitled".into()
}

fn default_lens_resolution() -> u32 {
    DEFAULT_LENS_RESOLUTION
}

fn default_disk_samples() -> usize {
    10_000
}

fn default_time_step() -> f64 {
    3600.0
}

fn default_steps() -> u32 {
    1000
}

fn default_body_radius() -> f64 {
    1.0
}

/// How a body enters the scene.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyConfig {
    /// Full initial state in world units.
    Explicit {
        position: DVec3,
        velocity: DVec3,
        /// Mass (kg).
        mass: f64,
        /// Display radius (m).
        #[serde(default = "default_body_radius")]
        radius: f64,
    },
    /// Circular orbit in the disk plane.
    Circular {
        /// Orbit radius in horizon radii.
        orbit_radius: f64,
        /// Starting angle from +X (radians).
        #[serde(default)]
        phase: f64,
        /// Mass (kg).
        mass: f64,
        /// Display radius in horizon radii.
        #[serde(default = "default_body_radius")]
        radius: f64,
    },
}

impl BodyConfig {
    /// Build the body around `black_hole`.
    pub fn to_body(&self, black_hole: &BlackHole) -> Body {
        match *self {
            BodyConfig::Explicit {
                position,
                velocity,
                mass,
                radius,
            } => Body::new(position, velocity, mass).with_radius(radius),
            BodyConfig::Circular {
                orbit_radius,
                phase,
                mass,
                radius,
            } => {
                let rs = black_hole.event_horizon_radius();
                Body::circular_orbit(black_hole, orbit_radius * rs, phase, mass)
                    .with_radius(radius * rs)
            }
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let mass = match self {
            BodyConfig::Explicit {
                position,
                velocity,
                mass,
                ..
            } => {
                if !position.is_finite() || !velocity.is_finite() {
                    return Err(ConfigError::invalid(format!(
                        "body {} has a non-finite position or velocity",
                        index
                    )));
                }
                *mass
            }
            BodyConfig::Circular {
                orbit_radius, mass, ..
            } => {
                if !(*orbit_radius > 0.0 && orbit_radius.is_finite()) {
                    return Err(ConfigError::invalid(format!(
                        "body {} orbit radius must be positive, got {}",
                        index, orbit_radius
                    )));
                }
                *mass
            }
        };
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "body {} mass must be positive, got {}",
                index, mass
            )));
        }
        Ok(())
    }
}

/// Complete scene configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub black_hole: BlackHoleParams,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    /// Camera (and observer) position in metres. Defaults to a point
    /// 30 horizon radii out and 5 up from the black hole.
    #[serde(default)]
    pub camera_position: Option<DVec3>,
    /// Lens map cells per axis.
    #[serde(default = "default_lens_resolution")]
    pub lens_resolution: u32,
    /// Accretion disk points drawn per resample.
    #[serde(default = "default_disk_samples")]
    pub disk_samples: usize,
    /// Seed for disk sampling. Fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated seconds per step.
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// Steps the runner performs.
    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl Default for SceneConfig {
    /// The "Gargantua" scene: a 10⁸ solar-mass black hole with three stars
    /// on circular orbits.
    fn default() -> Self {
        Self {
            name: "Gargantua".into(),
            black_hole: BlackHoleParams::default(),
            bodies: vec![
                BodyConfig::Circular {
                    orbit_radius: 60.0,
                    phase: 0.0,
                    mass: SOLAR_MASS,
                    radius: 0.5,
                },
                BodyConfig::Circular {
                    orbit_radius: 90.0,
                    phase: 2.1,
                    mass: 2.0 * SOLAR_MASS,
                    radius: 0.7,
                },
                BodyConfig::Circular {
                    orbit_radius: 140.0,
                    phase: 4.2,
                    mass: 0.5 * SOLAR_MASS,
                    radius: 0.4,
                },
            ],
            camera_position: None,
            lens_resolution: DEFAULT_LENS_RESOLUTION,
            disk_samples: default_disk_samples(),
            seed: None,
            time_step: default_time_step(),
            steps: default_steps(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check every physical constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.black_hole.validate()?;
        for (index, body) in self.bodies.iter().enumerate() {
            body.validate(index)?;
        }
        if let Some(camera) = self.camera_position {
            if !camera.is_finite() {
                return Err(ConfigError::invalid("camera position must be finite"));
            }
        }
        if self.lens_resolution == 0 {
            return Err(ConfigError::invalid("lens resolution must be at least 1"));
        }
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(ConfigError::invalid(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        Ok(())
    }

    /// The configured camera position, or the default viewpoint.
    pub fn resolved_camera(&self) -> DVec3 {
        self.camera_position.unwrap_or_else(|| {
            let rs = schwarzschild_radius(self.black_hole.mass);
            self.black_hole.position + DEFAULT_CAMERA_OFFSET * rs
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bodies.len(), 3);
        assert_eq!(config.lens_resolution, 512);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = SceneConfig::from_json(r#"{ "name": "empty" }"#).unwrap();
        assert_eq!(config.name, "empty");
        assert_eq!(config.black_hole, BlackHoleParams::default());
        assert!(config.bodies.is_empty());
        assert_eq!(config.time_step, 3600.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_bodies() {
        let json = r#"{
            "black_hole": { "mass": 10.0, "spin": 0.1, "disk_inner": 3.0,
                            "disk_outer": 12.0, "position": [0.0, 0.0, 0.0] },
            "bodies": [
                { "kind": "circular", "orbit_radius": 50.0, "mass": 1.0e30 },
                { "kind": "explicit", "position": [1.0e6, 0.0, 0.0],
                  "velocity": [0.0, 0.0, 100.0], "mass": 5.0, "radius": 2.0 }
            ],
            "seed": 7
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.seed, Some(7));

        let bh = BlackHole::new(config.black_hole);
        let orbiting = config.bodies[0].to_body(&bh);
        let r = orbiting.position.length();
        assert!((r - 50.0 * bh.event_horizon_radius()).abs() / r < 1e-12);

        let explicit = config.bodies[1].to_body(&bh);
        assert_eq!(explicit.velocity, DVec3::new(0.0, 0.0, 100.0));
        assert_eq!(explicit.radius, 2.0);
    }

    #[test]
    fn test_rejects_invalid_black_hole() {
        let json = r#"{ "black_hole": { "mass": -1.0, "spin": 0.0, "disk_inner": 1.0,
                        "disk_outer": 2.0, "position": [0.0, 0.0, 0.0] } }"#;
        assert!(matches!(SceneConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_invalid_body() {
        let json = r#"{ "bodies": [ { "kind": "circular", "orbit_radius": 10.0, "mass": 0.0 } ] }"#;
        let err = SceneConfig::from_json(json).unwrap_err();
        assert!(err.to_string().contains("body 0 mass"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SceneConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_camera_scales_with_horizon() {
        let config = SceneConfig::default();
        let rs = schwarzschild_radius(config.black_hole.mass);
        let camera = config.resolved_camera();
        assert!((camera - DVec3::new(0.0, 5.0 * rs, 30.0 * rs)).length() < 1e-3);
    }
}
