//! Explicit simulation context for driving an animated object along a
//! flight path.
//!
//! The current path, frame sampler and normalized time live in one owned
//! object that the animation loop ticks, instead of ambient module-level
//! state.

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Transform};
use crate::path::{
    FlightPath, FlightPathOptions, FrameOptions, FrameSampler, PathError, PolarArcPathBuilder,
};

/// Serializable configuration for a [`FlightSimulation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub path: FlightPathOptions,
    pub frame: FrameOptions,
    /// Normalized time advanced per tick.
    pub time_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            path: FlightPathOptions::default(),
            frame: FrameOptions::default(),
            time_step: 0.005,
        }
    }
}

/// Owns one flight at a time: the current path, the frame sampler and the
/// normalized time along the path.
#[derive(Debug, Clone)]
pub struct FlightSimulation {
    builder: PolarArcPathBuilder,
    sampler: FrameSampler,
    path: FlightPath,
    time: f64,
    time_step: f64,
}

impl FlightSimulation {
    /// Starts a simulation with default options flying from `start` to `end`.
    pub fn new(start: Point3, end: Point3) -> Result<Self, PathError> {
        Self::with_config(SimulationConfig::default(), start, end)
    }

    pub fn with_config(
        config: SimulationConfig,
        start: Point3,
        end: Point3,
    ) -> Result<Self, PathError> {
        let builder = PolarArcPathBuilder::with_options(config.path);
        let path = builder.build(start, end)?;
        Ok(Self {
            builder,
            sampler: FrameSampler::with_options(config.frame),
            path,
            time: 0.0,
            time_step: config.time_step,
        })
    }

    /// Replaces the current flight with a new one between fresh endpoints
    /// and rewinds time to the start of the path.
    pub fn reset(&mut self, start: Point3, end: Point3) -> Result<(), PathError> {
        self.path = self.builder.build(start, end)?;
        self.time = 0.0;
        debug!("flight reset: {start:?} -> {end:?}");
        Ok(())
    }

    /// Resets onto a flight between two random endpoints.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), PathError> {
        let start = random_endpoint(rng);
        let end = random_endpoint(rng);
        self.reset(start, end)
    }

    /// Advances time by one step, wrapping modulo 1.0, and samples the rigid
    /// transform at the new time.
    pub fn tick(&mut self) -> Transform {
        self.time = (self.time + self.time_step) % 1.0;
        self.sampler.sample_frame(&self.path, self.time)
    }

    /// Samples the transform at the current time without advancing.
    #[must_use]
    pub fn current_frame(&self) -> Transform {
        self.sampler.sample_frame(&self.path, self.time)
    }

    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub const fn path(&self) -> &FlightPath {
        &self.path
    }

    #[must_use]
    pub const fn sampler(&self) -> &FrameSampler {
        &self.sampler
    }
}

/// A random flight endpoint: uniform heading, radius between 10 and 200 from
/// the scene center, height between 20 and 100.
pub fn random_endpoint<R: Rng + ?Sized>(rng: &mut R) -> Point3 {
    let theta = rng.random_range(0.0..TAU);
    let radius = lerp(10.0, 200.0, rng.random::<f64>());
    let height = lerp(20.0, 100.0, rng.random::<f64>());
    Point3::new(radius * theta.cos(), height, radius * theta.sin())
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
