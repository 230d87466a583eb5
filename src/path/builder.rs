//! Flight path construction: a polar base arc between two endpoints with a
//! flutter oscillation layered on top, sampled into a Catmull-Rom spline.

use std::f64::consts::{PI, TAU};

use log::debug;
use serde::{Deserialize, Serialize};

use super::polar::PolarArc;
use crate::geom::{CatmullRomCurve3, Curve3, Point3, Vec3, tessellate_curve_uniform};

/// Options for flight path construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightPathOptions {
    /// Number of spline control points generated along the arc.
    pub samples: usize,
    /// Peak magnitude of the flutter displacement.
    pub flutter_amplitude: f64,
    /// Full flutter cycles between the two endpoints.
    pub flutter_frequency: f64,
}

impl Default for FlightPathOptions {
    fn default() -> Self {
        Self {
            samples: 100,
            flutter_amplitude: 1.0,
            flutter_frequency: 3.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("flight path requires at least 2 samples, got {0}")]
    NotEnoughSamples(usize),
    #[error("flutter amplitude and frequency must be finite")]
    NonFiniteFlutter,
    #[error("spline construction failed: {0}")]
    Spline(String),
}

/// A built flight path: the two endpoints plus the spline through the
/// generated samples. Immutable once built; a new flight gets a new path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    start: Point3,
    end: Point3,
    sweep_angle: f64,
    curve: CatmullRomCurve3,
}

impl FlightPath {
    /// Position on the path at normalized time `u` in [0, 1].
    #[must_use]
    pub fn position_at(&self, u: f64) -> Point3 {
        self.curve.point_at(u)
    }

    /// Unit direction of travel at `u`, or `None` for a stationary path.
    #[must_use]
    pub fn tangent_at(&self, u: f64) -> Option<Vec3> {
        self.curve.tangent_at(u)
    }

    /// Uniform sweep of positions along the path, for debug rendering.
    /// Returns `segments + 1` points.
    #[must_use]
    pub fn polyline(&self, segments: usize) -> Vec<Point3> {
        tessellate_curve_uniform(&self.curve, segments)
    }

    #[must_use]
    pub const fn start(&self) -> Point3 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Point3 {
        self.end
    }

    /// Signed angular sweep of the underlying base arc.
    #[must_use]
    pub const fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    #[must_use]
    pub const fn curve(&self) -> &CatmullRomCurve3 {
        &self.curve
    }
}

/// Builds stylized flight paths that arc around the world origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarArcPathBuilder {
    options: FlightPathOptions,
}

impl PolarArcPathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: FlightPathOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &FlightPathOptions {
        &self.options
    }

    /// Builds the path from `start` to `end`.
    ///
    /// Degenerate inputs (coincident endpoints, endpoints on the vertical
    /// axis) produce a finite, possibly stationary path rather than an error.
    pub fn build(&self, start: Point3, end: Point3) -> Result<FlightPath, PathError> {
        let opts = self.options;
        if opts.samples < 2 {
            return Err(PathError::NotEnoughSamples(opts.samples));
        }
        if !opts.flutter_amplitude.is_finite() || !opts.flutter_frequency.is_finite() {
            return Err(PathError::NonFiniteFlutter);
        }

        let arc = PolarArc::between(start, end);
        let n = opts.samples;
        let du = 1.0 / (n - 1) as f64;

        // The flutter envelope vanishes at both ends; the boundary samples
        // are the endpoints themselves.
        let mut points = Vec::with_capacity(n);
        points.push(start);
        for i in 1..n - 1 {
            let u = i as f64 * du;
            points.push(flutter_sample(&arc, u, du, opts));
        }
        points.push(end);

        let curve = CatmullRomCurve3::new(points).map_err(PathError::Spline)?;
        debug!(
            "built flight path: {} samples, sweep {:.3} rad, length {:.1}",
            n,
            arc.sweep_angle(),
            start.distance_to(end)
        );

        Ok(FlightPath {
            start,
            end,
            sweep_angle: arc.sweep_angle(),
            curve,
        })
    }
}

/// One interior sample: the base arc point displaced sideways and vertically
/// by the flutter weight.
fn flutter_sample(arc: &PolarArc, u: f64, du: f64, opts: FlightPathOptions) -> Point3 {
    let base = arc.point_at(u);

    // Forward-difference travel direction; the arc extrapolates smoothly
    // past u = 1 so the step never leaves the expression's domain.
    let Some(forward) = arc.point_at(u + du).sub_point(base).normalized() else {
        // Stationary arc: no travel direction to flutter around.
        return base;
    };

    // Fixed 90°-class rotation of the tangent. Not exactly orthogonal, which
    // is acceptable for a stylized, non-physical wobble.
    let offset = Vec3::new(-forward.z, forward.y, forward.x);
    let w = flutter_weight(u, opts.flutter_amplitude, opts.flutter_frequency);

    let mut p = base.add_vec(offset.mul_scalar(w));
    p.y += w;
    p
}

/// Flutter weight `amplitude * sin²(π·u) * sin(frequency·2π·u)`: zero at both
/// endpoints, with the sin² envelope suppressing amplitude near them.
fn flutter_weight(u: f64, amplitude: f64, frequency: f64) -> f64 {
    let envelope = (PI * u).sin().powi(2);
    amplitude * envelope * (frequency * TAU * u).sin()
}
