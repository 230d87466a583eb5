//! Rigid-frame sampling along a flight path: an orthonormal basis derived
//! from the travel direction, with an optional cosmetic roll about it.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::builder::FlightPath;
use crate::geom::{Point3, Transform, Vec3};

/// Options for frame sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    /// Reference up direction used to derive the right axis.
    pub world_up: Vec3,
    /// Secondary reference used when the travel direction is parallel to
    /// `world_up`.
    pub fallback_axis: Vec3,
    /// Peak roll angle in radians. Zero disables the roll entirely.
    pub roll_amplitude: f64,
    /// Full roll cycles over one traversal of the path.
    pub roll_frequency: f64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            world_up: Vec3::Y,
            fallback_axis: Vec3::Z,
            roll_amplitude: 50.0_f64.to_radians(),
            roll_frequency: 3.0,
        }
    }
}

/// An orthonormal right/up/forward basis plus a position: the full rigid
/// placement of an object travelling along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// Samples rigid transforms along a [`FlightPath`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSampler {
    options: FrameOptions,
}

impl FrameSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: FrameOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &FrameOptions {
        &self.options
    }

    /// The orthonormal basis at `u`, before any roll is applied.
    ///
    /// The basis is always finite and orthonormal: a travel direction
    /// parallel to `world_up` falls back to `fallback_axis`, and a
    /// stationary path yields an arbitrary but valid frame at the path
    /// position.
    #[must_use]
    pub fn frame_at(&self, path: &FlightPath, u: f64) -> Frame {
        let position = path.position_at(u);
        let forward = path
            .tangent_at(u)
            .or_else(|| self.options.fallback_axis.normalized())
            .unwrap_or(Vec3::X);

        let right = forward
            .cross(self.options.world_up)
            .normalized()
            .or_else(|| forward.cross(self.options.fallback_axis).normalized())
            .unwrap_or_else(|| orthogonal_unit_vector(forward));

        // Re-derive up: the spline tangent is not guaranteed perpendicular
        // to the fixed world up.
        let up = right.cross(forward);

        Frame {
            position,
            right,
            up,
            forward,
        }
    }

    /// The full rigid transform at `u`: the orthonormal basis columns
    /// (right, up, forward), rolled about the forward axis, with the path
    /// position as translation.
    #[must_use]
    pub fn sample_frame(&self, path: &FlightPath, u: f64) -> Transform {
        let frame = self.frame_at(path, u);
        let basis = Transform::from_axes(frame.position, frame.right, frame.up, frame.forward);

        // Forward is the local Z axis, so rolling about it is a local Z
        // rotation applied after the basis.
        let theta = self.options.roll_amplitude * (self.options.roll_frequency * TAU * u).sin();
        basis.compose(Transform::rotate_z(theta))
    }
}

/// An arbitrary unit vector perpendicular to `reference`.
fn orthogonal_unit_vector(reference: Vec3) -> Vec3 {
    let candidate = if reference.x.abs() < reference.y.abs() {
        Vec3::new(0.0, -reference.z, reference.y)
    } else {
        Vec3::new(-reference.z, 0.0, reference.x)
    };

    candidate.normalized().unwrap_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Tolerance;
    use crate::path::builder::PolarArcPathBuilder;

    fn sample_path() -> FlightPath {
        PolarArcPathBuilder::new()
            .build(Point3::new(100.0, 50.0, 0.0), Point3::new(-20.0, 80.0, 90.0))
            .unwrap()
    }

    fn assert_orthonormal(right: Vec3, up: Vec3, forward: Vec3) {
        let tol = Tolerance::LOOSE;
        assert!(tol.approx_eq_f64(right.length(), 1.0));
        assert!(tol.approx_eq_f64(up.length(), 1.0));
        assert!(tol.approx_eq_f64(forward.length(), 1.0));
        assert!(tol.approx_zero_f64(right.dot(up)));
        assert!(tol.approx_zero_f64(right.dot(forward)));
        assert!(tol.approx_zero_f64(up.dot(forward)));
    }

    #[test]
    fn basis_is_orthonormal_along_the_path() {
        let path = sample_path();
        let sampler = FrameSampler::new();
        for i in 0..=50 {
            let u = f64::from(i) / 50.0;
            let frame = sampler.frame_at(&path, u);
            assert_orthonormal(frame.right, frame.up, frame.forward);
        }
    }

    #[test]
    fn rolled_transform_stays_orthonormal() {
        let path = sample_path();
        let sampler = FrameSampler::new();
        for i in 0..=50 {
            let u = f64::from(i) / 50.0;
            let (x, y, z) = sampler.sample_frame(&path, u).axes();
            assert_orthonormal(x, y, z);
        }
    }

    #[test]
    fn zero_roll_amplitude_matches_bare_basis() {
        let path = sample_path();
        let options = FrameOptions {
            roll_amplitude: 0.0,
            ..FrameOptions::default()
        };
        let sampler = FrameSampler::with_options(options);

        for i in 0..=20 {
            let u = f64::from(i) / 20.0;
            let frame = sampler.frame_at(&path, u);
            let expected =
                Transform::from_axes(frame.position, frame.right, frame.up, frame.forward);
            assert_eq!(sampler.sample_frame(&path, u), expected);
        }
    }

    #[test]
    fn roll_preserves_forward_axis_and_position() {
        let path = sample_path();
        let sampler = FrameSampler::new();
        let tol = Tolerance::LOOSE;

        for i in 0..=20 {
            let u = f64::from(i) / 20.0;
            let frame = sampler.frame_at(&path, u);
            let transform = sampler.sample_frame(&path, u);
            let (_, _, z) = transform.axes();

            assert!(tol.approx_eq_vec3(z, frame.forward));
            assert!(tol.approx_eq_vec3(transform.translation(), frame.position.to_vec3()));
        }
    }

    #[test]
    fn vertical_travel_uses_fallback_axis() {
        // Straight up: tangent parallel to world up.
        let path = PolarArcPathBuilder::new()
            .build(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 100.0, 0.0))
            .unwrap();
        let sampler = FrameSampler::new();
        let frame = sampler.frame_at(&path, 0.5);

        assert!(frame.right.is_finite());
        assert!(frame.up.is_finite());
        assert_orthonormal(frame.right, frame.up, frame.forward);
    }

    #[test]
    fn stationary_path_still_yields_a_valid_frame() {
        let p = Point3::new(10.0, 10.0, 10.0);
        let path = PolarArcPathBuilder::new().build(p, p).unwrap();
        let sampler = FrameSampler::new();

        // Interior evaluation of identical control points rounds within one
        // ulp of the point.
        let tol = Tolerance::DEFAULT;
        let frame = sampler.frame_at(&path, 0.5);
        assert!(tol.approx_eq_point3(frame.position, p));
        assert_orthonormal(frame.right, frame.up, frame.forward);

        let transform = sampler.sample_frame(&path, 0.5);
        assert!(tol.approx_eq_vec3(transform.translation(), p.to_vec3()));
    }

    #[test]
    fn orthogonal_unit_vector_is_perpendicular() {
        for v in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.3, -0.8, 0.52)] {
            let v = v.normalized().unwrap();
            let o = orthogonal_unit_vector(v);
            assert!(Tolerance::DEFAULT.approx_zero_f64(v.dot(o)));
            assert!(Tolerance::DEFAULT.approx_eq_f64(o.length(), 1.0));
        }
    }
}
