//! Proper time versus coordinate time for one observer.
//!
//! [`ProperTime`] is driven by the frame loop: each [`ProperTime::update`]
//! measures the wall-clock time since the previous call, adds it to
//! coordinate time, and adds it scaled by the local Schwarzschild dilation
//! factor to proper time.
//!
//! # Example
//!
//! ```ignore
//! use gargantua::time::ProperTime;
//!
//! let mut clock = ProperTime::new();
//!
//! // In your frame loop:
//! clock.update(camera_position, bh.position(), bh.params().mass);
//!
//! println!("Dilation: {:.4}", clock.dilation());
//! println!("Lag: {:.2}s", clock.time_lag());
//! ```
//!
//! The tracker has no clock of its own beyond the reference instant captured
//! at each call, so it only makes sense when updated at a steady cadence.

use crate::black_hole::{dilation_factor, schwarzschild_radius};
use glam::DVec3;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of retained history samples.
pub const HISTORY_CAPACITY: usize = 1000;

/// One recorded update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DilationSample {
    /// Clock reading at the update, never earlier than the previous sample.
    pub timestamp: Instant,
    /// Observer position (m).
    pub position: DVec3,
    /// Dilation factor in `[0, 1]`.
    pub dilation: f64,
    /// Accumulated proper time (s).
    pub proper_time: f64,
    /// Accumulated coordinate time (s).
    pub coordinate_time: f64,
}

/// Proper/coordinate time ledger for a single observer.
#[derive(Debug)]
pub struct ProperTime {
    /// Clock reading of the previous update (or construction/reset).
    reference: Instant,
    /// Dilation factor at the last update.
    dilation: f64,
    /// Observer's elapsed time in seconds.
    proper_time: f64,
    /// Distant observer's elapsed time in seconds.
    coordinate_time: f64,
    /// Most recent samples, oldest first.
    history: VecDeque<DilationSample>,
}

impl ProperTime {
    /// Create a tracker starting from now.
    pub fn new() -> Self {
        Self {
            reference: Instant::now(),
            dilation: 1.0,
            proper_time: 0.0,
            coordinate_time: 0.0,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Accumulate the wall-clock time since the last update.
    ///
    /// `black_hole_mass` is in solar masses.
    pub fn update(&mut self, observer: DVec3, black_hole_position: DVec3, black_hole_mass: f64) {
        self.update_at(Instant::now(), observer, black_hole_position, black_hole_mass);
    }

    /// Accumulate the time between the last update and `now`.
    ///
    /// Readings earlier than the previous one count as zero elapsed time and
    /// are recorded at the previous reading, so history stays time-ordered.
    pub fn update_at(
        &mut self,
        now: Instant,
        observer: DVec3,
        black_hole_position: DVec3,
        black_hole_mass: f64,
    ) {
        let elapsed = now.saturating_duration_since(self.reference).as_secs_f64();
        self.reference = self.reference.max(now);

        let rs = schwarzschild_radius(black_hole_mass);
        let distance = observer.distance(black_hole_position);
        self.dilation = dilation_factor(rs, distance).value_or(0.0);

        self.coordinate_time += elapsed;
        self.proper_time += elapsed * self.dilation;

        self.history.push_back(DilationSample {
            timestamp: self.reference,
            position: observer,
            dilation: self.dilation,
            proper_time: self.proper_time,
            coordinate_time: self.coordinate_time,
        });
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Dilation factor at the last update (1 before any update).
    #[inline]
    pub fn dilation(&self) -> f64 {
        self.dilation
    }

    /// Accumulated proper time in seconds.
    #[inline]
    pub fn proper_time(&self) -> f64 {
        self.proper_time
    }

    /// Accumulated coordinate time in seconds.
    #[inline]
    pub fn coordinate_time(&self) -> f64 {
        self.coordinate_time
    }

    /// How far the observer's clock has fallen behind, in seconds.
    #[inline]
    pub fn time_lag(&self) -> f64 {
        self.coordinate_time - self.proper_time
    }

    /// Recorded samples, oldest first, at most [`HISTORY_CAPACITY`].
    #[inline]
    pub fn history(&self) -> &VecDeque<DilationSample> {
        &self.history
    }

    /// Time since the last update as a Duration.
    #[inline]
    pub fn since_update(&self) -> Duration {
        self.reference.elapsed()
    }

    /// Reset the tracker to its initial state, starting from now.
    pub fn reset(&mut self) {
        self.reference = Instant::now();
        self.dilation = 1.0;
        self.proper_time = 0.0;
        self.coordinate_time = 0.0;
        self.history.clear();
    }
}

impl Default for ProperTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const MASS: f64 = 1.0e6;

    fn far() -> DVec3 {
        DVec3::new(1.0e6 * schwarzschild_radius(MASS), 0.0, 0.0)
    }

    #[test]
    fn test_proper_time_new() {
        let clock = ProperTime::new();
        assert_eq!(clock.dilation(), 1.0);
        assert_eq!(clock.proper_time(), 0.0);
        assert_eq!(clock.coordinate_time(), 0.0);
        assert!(clock.history().is_empty());
    }

    #[test]
    fn test_update_far_away() {
        let mut clock = ProperTime::new();
        thread::sleep(Duration::from_millis(10));
        clock.update(far(), DVec3::ZERO, MASS);

        assert!(clock.coordinate_time() >= 0.010);
        assert!(clock.dilation() > 0.999_999);
        assert!((clock.proper_time() - clock.coordinate_time()).abs() < 1e-6);
        assert_eq!(clock.history().len(), 1);
    }

    #[test]
    fn test_explicit_clock_far_away() {
        let mut clock = ProperTime::new();
        let t0 = Instant::now();
        clock.update_at(t0, far(), DVec3::ZERO, MASS);
        let (proper, coordinate) = (clock.proper_time(), clock.coordinate_time());

        clock.update_at(t0 + Duration::from_millis(250), far(), DVec3::ZERO, MASS);
        assert!((clock.coordinate_time() - coordinate - 0.25).abs() < 1e-9);
        assert!((clock.proper_time() - proper - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_at_horizon() {
        let mut clock = ProperTime::new();
        let rs = schwarzschild_radius(MASS);
        let t0 = Instant::now();
        clock.update_at(t0, DVec3::new(rs, 0.0, 0.0), DVec3::ZERO, MASS);
        let proper = clock.proper_time();
        let coordinate = clock.coordinate_time();

        clock.update_at(t0 + Duration::from_secs(1), DVec3::new(0.0, rs, 0.0), DVec3::ZERO, MASS);
        assert_eq!(clock.dilation(), 0.0);
        assert_eq!(clock.proper_time(), proper);
        assert!((clock.coordinate_time() - coordinate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_black_hole_dilation() {
        let mut clock = ProperTime::new();
        let rs = schwarzschild_radius(MASS);
        let t0 = Instant::now();
        clock.update_at(t0, DVec3::ZERO, DVec3::ZERO, MASS);
        clock.update_at(t0 + Duration::from_secs(2), DVec3::new(0.0, 0.0, 4.0 * rs), DVec3::ZERO, MASS);
        assert!((clock.dilation() - 0.75f64.sqrt()).abs() < 1e-12);
        assert!(clock.time_lag() > 0.0);
    }

    #[test]
    fn test_backwards_clock_counts_zero() {
        let mut clock = ProperTime::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.update_at(t0, far(), DVec3::ZERO, MASS);
        let coordinate = clock.coordinate_time();
        clock.update_at(t0 - Duration::from_millis(500), far(), DVec3::ZERO, MASS);
        assert_eq!(clock.coordinate_time(), coordinate);

        let history = clock.history();
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp <= history[1].timestamp);
        assert_eq!(history[1].timestamp, t0);
    }

    #[test]
    fn test_history_eviction() {
        let mut clock = ProperTime::new();
        let t0 = Instant::now();
        for k in 0..=HISTORY_CAPACITY {
            clock.update_at(t0 + Duration::from_millis(k as u64), far(), DVec3::ZERO, MASS);
        }

        let history = clock.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.front().map(|s| s.timestamp), Some(t0 + Duration::from_millis(1)));
        assert_eq!(
            history.back().map(|s| s.timestamp),
            Some(t0 + Duration::from_millis(HISTORY_CAPACITY as u64))
        );
        assert!(history
            .iter()
            .zip(history.iter().skip(1))
            .all(|(a, b)| a.timestamp < b.timestamp && a.coordinate_time <= b.coordinate_time));
    }

    #[test]
    fn test_reset() {
        let mut clock = ProperTime::new();
        let rs = schwarzschild_radius(MASS);
        clock.update_at(
            Instant::now() + Duration::from_millis(20),
            DVec3::new(2.0 * rs, 0.0, 0.0),
            DVec3::ZERO,
            MASS,
        );
        assert!(clock.dilation() < 1.0);

        clock.reset();
        assert_eq!(clock.dilation(), 1.0);
        assert_eq!(clock.proper_time(), 0.0);
        assert_eq!(clock.coordinate_time(), 0.0);
        assert!(clock.history().is_empty());
    }
}
