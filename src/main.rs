//! Headless runner: `gargantua [scene.json] [steps]`.
//!
//! Loads a scene (or the built-in one), runs it for the requested number of
//! steps and logs the black hole's geometry and the observer's clock.
//! Set `RUST_LOG=debug` for per-step detail.

use gargantua::{Scene, SceneConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SceneConfig::default(),
    };

    if let Some(steps) = args.next() {
        match steps.parse() {
            Ok(steps) => config.steps = steps,
            Err(_) => {
                log::error!("Step count must be a non-negative integer, got '{}'", steps);
                return ExitCode::FAILURE;
            }
        }
    }

    let scene = match Scene::from_config(&config) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let bh = scene.black_hole();
    let (inner, outer) = bh.disk_radii();
    log::info!("Event horizon: {:.4e} m", bh.event_horizon_radius());
    log::info!("Photon sphere: {:.4e} m", bh.photon_sphere_radius());
    log::info!("Accretion disk: {:.4e} m to {:.4e} m", inner, outer);

    let mut session = scene.session();
    let report_every = (config.steps / 10).max(1);
    for step in 1..=config.steps {
        session.tick();
        if step % report_every == 0 {
            log::debug!("{}", session.status());
        }
    }

    for (i, body) in session.dynamics().bodies().iter().enumerate() {
        log::info!(
            "Body {}: r = {:.2} r_s, |v| = {:.4e} m/s",
            i,
            body.position.distance(bh.position()) / bh.event_horizon_radius(),
            body.velocity.length()
        );
    }

    let clock = session.clock();
    log::info!("Observer dilation: {:.6}", clock.dilation());
    log::info!(
        "Proper time {:.4} s, coordinate time {:.4} s, lag {:.6} s",
        clock.proper_time(),
        clock.coordinate_time(),
        clock.time_lag()
    );
    log::info!("{}", session.status());

    ExitCode::SUCCESS
}
