//! Scene ownership and the per-frame session.
//!
//! [`Scene`] owns the single [`BlackHole`] of a run together with the
//! initial bodies and viewpoint. A [`Session`] borrows the scene and holds
//! everything that changes while the simulation runs: the orbital engine,
//! the lens map, the observer's clock and the current disk samples.
//!
//! ```ignore
//! let scene = Scene::from_config(&SceneConfig::load("scene.json")?)?;
//! let mut session = scene.session();
//!
//! loop {
//!     session.tick();
//!     renderer.draw(session.dynamics().bodies(), session.disk_points());
//! }
//! ```

use crate::black_hole::BlackHole;
use crate::config::SceneConfig;
use crate::disk::DiskSampler;
use crate::dynamics::{Body, Dynamics};
use crate::error::ConfigError;
use crate::lensing::LensMap;
use crate::time::ProperTime;
use glam::DVec3;
use std::fmt;

/// Owner of the black hole and the initial state of a run.
#[derive(Clone, Debug)]
pub struct Scene {
    name: String,
    black_hole: BlackHole,
    bodies: Vec<Body>,
    camera_position: DVec3,
    lens_resolution: u32,
    disk_samples: usize,
    seed: Option<u64>,
    time_step: f64,
}

impl Scene {
    /// Validate `config` and build the scene it describes.
    pub fn from_config(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let black_hole = BlackHole::new(config.black_hole);
        let bodies = config
            .bodies
            .iter()
            .map(|b| b.to_body(&black_hole))
            .collect();

        Ok(Self {
            name: config.name.clone(),
            black_hole,
            bodies,
            camera_position: config.resolved_camera(),
            lens_resolution: config.lens_resolution,
            disk_samples: config.disk_samples,
            seed: config.seed,
            time_step: config.time_step,
        })
    }

    /// Scene name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The central black hole.
    #[inline]
    pub fn black_hole(&self) -> &BlackHole {
        &self.black_hole
    }

    /// Bodies as configured, before any step.
    #[inline]
    pub fn initial_bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Initial camera (observer) position.
    #[inline]
    pub fn camera_position(&self) -> DVec3 {
        self.camera_position
    }

    /// Simulated seconds per [`Session::tick`].
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Start a run: bodies at their initial state, lens map built for the
    /// initial camera, disk sampled once.
    pub fn session(&self) -> Session<'_> {
        let mut dynamics = Dynamics::new();
        dynamics.set_primary(&self.black_hole);
        for body in &self.bodies {
            dynamics.add_body(*body);
        }

        let mut lens = LensMap::new();
        lens.build_for(&self.black_hole, self.camera_position, self.lens_resolution);

        let mut sampler = match self.seed {
            Some(seed) => DiskSampler::seeded(seed),
            None => DiskSampler::from_entropy(),
        };
        let disk = self
            .black_hole
            .sample_accretion_disk(self.disk_samples, &mut sampler);

        log::info!(
            "Scene '{}': r_s = {:.4e} m, photon sphere = {:.4e} m, {} bodies",
            self.name,
            self.black_hole.event_horizon_radius(),
            self.black_hole.photon_sphere_radius(),
            self.bodies.len()
        );

        Session {
            scene: self,
            dynamics,
            lens,
            clock: ProperTime::new(),
            sampler,
            camera_position: self.camera_position,
            disk,
            ticks: 0,
        }
    }
}

/// A running simulation borrowing its [`Scene`].
#[derive(Debug)]
pub struct Session<'a> {
    scene: &'a Scene,
    dynamics: Dynamics<'a>,
    lens: LensMap,
    clock: ProperTime,
    sampler: DiskSampler,
    camera_position: DVec3,
    disk: Vec<DVec3>,
    ticks: u64,
}

impl<'a> Session<'a> {
    /// Advance by the scene's time step. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_with(self.scene.time_step);
    }

    /// Advance the bodies by `delta_time` simulated seconds and update the
    /// observer's clock from wall time.
    pub fn tick_with(&mut self, delta_time: f64) {
        let black_hole = self.scene.black_hole();
        self.dynamics.step(delta_time);
        self.clock.update(
            self.camera_position,
            black_hole.position(),
            black_hole.params().mass,
        );
        self.ticks += 1;
        log::trace!("tick {}: dilation {:.6}", self.ticks, self.clock.dilation());
    }

    /// Move the camera and rebuild the lens map for the new viewpoint.
    pub fn move_camera(&mut self, position: DVec3) {
        self.camera_position = position;
        self.lens.build_for(
            self.scene.black_hole(),
            position,
            self.scene.lens_resolution,
        );
    }

    /// Draw a fresh set of accretion disk points.
    pub fn resample_disk(&mut self) -> &[DVec3] {
        self.disk = self
            .scene
            .black_hole()
            .sample_accretion_disk(self.scene.disk_samples, &mut self.sampler);
        &self.disk
    }

    /// The scene this session runs.
    #[inline]
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// The orbital engine.
    #[inline]
    pub fn dynamics(&self) -> &Dynamics<'a> {
        &self.dynamics
    }

    /// The lens map for the current camera.
    #[inline]
    pub fn lens(&self) -> &LensMap {
        &self.lens
    }

    /// The observer's proper-time ledger.
    #[inline]
    pub fn clock(&self) -> &ProperTime {
        &self.clock
    }

    /// Current camera (observer) position.
    #[inline]
    pub fn camera_position(&self) -> DVec3 {
        self.camera_position
    }

    /// Current accretion disk samples.
    #[inline]
    pub fn disk_points(&self) -> &[DVec3] {
        &self.disk
    }

    /// Ticks performed so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot of the values a HUD would show.
    pub fn status(&self) -> Status {
        let black_hole = self.scene.black_hole();
        let closest = self
            .dynamics
            .bodies()
            .iter()
            .map(|b| b.position.distance(black_hole.position()))
            .fold(f64::INFINITY, f64::min);

        Status {
            ticks: self.ticks,
            simulated_time: self.ticks as f64 * self.scene.time_step,
            dilation: self.clock.dilation(),
            proper_time: self.clock.proper_time(),
            coordinate_time: self.clock.coordinate_time(),
            closest_body: closest / black_hole.event_horizon_radius(),
        }
    }
}

/// Summary of a session at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Status {
    /// Ticks performed.
    pub ticks: u64,
    /// Simulated seconds at the nominal time step.
    pub simulated_time: f64,
    /// Observer's dilation factor at the last tick.
    pub dilation: f64,
    /// Observer's accumulated proper time (s).
    pub proper_time: f64,
    /// Accumulated coordinate time (s).
    pub coordinate_time: f64,
    /// Distance of the closest body, in horizon radii (infinite if none).
    pub closest_body: f64,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} | sim {:.1} h | dilation {:.6} | proper {:.3} s / coordinate {:.3} s | closest body {:.1} r_s",
            self.ticks,
            self.simulated_time / 3600.0,
            self.dilation,
            self.proper_time,
            self.coordinate_time,
            self.closest_body
        )
    }
}
