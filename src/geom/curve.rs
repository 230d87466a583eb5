use super::core::{Point3, Tolerance, Vec3};

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn derivative_at(&self, t: f64) -> Vec3 {
        let (a, b) = self.domain();
        let span = b - a;
        if !span.is_finite() || span == 0.0 {
            return Vec3::ZERO;
        }

        let h = Tolerance::DERIVATIVE.relative_to(span);
        if !h.is_finite() || h == 0.0 {
            return Vec3::ZERO;
        }

        let t0 = (t - h).max(a);
        let t1 = (t + h).min(b);
        if t1 == t0 {
            return Vec3::ZERO;
        }

        let p0 = self.point_at(t0);
        let p1 = self.point_at(t1);
        p1.sub_point(p0).mul_scalar(1.0 / (t1 - t0))
    }

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

/// A cubic Catmull-Rom spline through an ordered list of control points.
///
/// The curve interpolates every control point. Endpoints are clamped: the
/// first and last segments reuse their boundary point as the missing tangent
/// guide, so `point_at(0)` and `point_at(1)` return the first and last
/// control points exactly.
///
/// The tension parameter controls transition sharpness:
/// - tension = 0.5 (default): standard Catmull-Rom
/// - tension < 0.5: tighter transitions
/// - tension > 0.5: looser transitions
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve3 {
    points: Vec<Point3>,
    tension: f64,
}

impl CatmullRomCurve3 {
    pub fn new(points: Vec<Point3>) -> Result<Self, String> {
        Self::with_tension(points, 0.5)
    }

    pub fn with_tension(points: Vec<Point3>, tension: f64) -> Result<Self, String> {
        if points.len() < 2 {
            return Err("catmull-rom curve requires at least 2 points".to_string());
        }
        if !tension.is_finite() {
            return Err("catmull-rom tension must be finite".to_string());
        }
        Ok(Self { points, tension })
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Maps a domain parameter to (segment index, local parameter, neighbor indices).
    fn locate(&self, t: f64) -> (f64, [usize; 4]) {
        let n = self.points.len();
        let segment_count = n - 1;
        let scaled = t.clamp(0.0, 1.0) * segment_count as f64;
        let segment = (scaled.floor() as usize).min(segment_count - 1);
        let local = scaled - segment as f64;

        let i0 = if segment == 0 { 0 } else { segment - 1 };
        let i1 = segment;
        let i2 = segment + 1;
        let i3 = (segment + 2).min(n - 1);
        (local, [i0, i1, i2, i3])
    }
}

impl Curve3 for CatmullRomCurve3 {
    fn point_at(&self, t: f64) -> Point3 {
        debug_assert!(
            (0.0..=1.0).contains(&t),
            "curve parameter {t} outside [0, 1]"
        );
        let (local, [i0, i1, i2, i3]) = self.locate(t);
        catmull_rom_point(
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
            local,
            self.tension,
        )
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        debug_assert!(
            (0.0..=1.0).contains(&t),
            "curve parameter {t} outside [0, 1]"
        );
        let (local, [i0, i1, i2, i3]) = self.locate(t);
        let segment_count = (self.points.len() - 1) as f64;
        catmull_rom_derivative(
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
            local,
            self.tension,
        )
        // Chain rule: the domain parameter spans all segments.
        .mul_scalar(segment_count)
    }
}

/// Catmull-Rom spline interpolation at parameter t in [0, 1] between p1 and p2.
/// Uses p0 and p3 as tangent guides.
fn catmull_rom_point(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64, tension: f64) -> Point3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let tau = tension;

    let b0 = -tau * t3 + 2.0 * tau * t2 - tau * t;
    let b1 = (2.0 - tau) * t3 + (tau - 3.0) * t2 + 1.0;
    let b2 = (tau - 2.0) * t3 + (3.0 - 2.0 * tau) * t2 + tau * t;
    let b3 = tau * t3 - tau * t2;

    Point3::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
        b0 * p0.z + b1 * p1.z + b2 * p2.z + b3 * p3.z,
    )
}

/// Derivative of the Catmull-Rom basis with respect to the local parameter.
fn catmull_rom_derivative(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    t: f64,
    tension: f64,
) -> Vec3 {
    let t2 = t * t;
    let tau = tension;

    let b0 = -3.0 * tau * t2 + 4.0 * tau * t - tau;
    let b1 = 3.0 * (2.0 - tau) * t2 + 2.0 * (tau - 3.0) * t;
    let b2 = 3.0 * (tau - 2.0) * t2 + 2.0 * (3.0 - 2.0 * tau) * t + tau;
    let b3 = 3.0 * tau * t2 - 2.0 * tau * t;

    Vec3::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
        b0 * p0.z + b1 * p1.z + b2 * p2.z + b3 * p3.z,
    )
}

/// Evaluates a curve at `steps + 1` uniformly spaced parameters across its domain.
#[must_use]
pub fn tessellate_curve_uniform(curve: &impl Curve3, steps: usize) -> Vec<Point3> {
    let steps = steps.max(1);
    let (t0, t1) = curve.domain();
    let span = t1 - t0;
    (0..=steps)
        .map(|i| curve.point_at(t0 + span * (i as f64 / steps as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> CatmullRomCurve3 {
        CatmullRomCurve3::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_too_few_points() {
        assert!(CatmullRomCurve3::new(vec![Point3::ORIGIN]).is_err());
    }

    #[test]
    fn endpoints_are_exact() {
        let curve = zigzag();
        assert_eq!(curve.point_at(0.0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(curve.point_at(1.0), Point3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn interpolates_interior_control_points() {
        let curve = zigzag();
        let tol = Tolerance::DEFAULT;
        // Parameters 1/3 and 2/3 land on the interior points.
        assert!(tol.approx_eq_point3(curve.point_at(1.0 / 3.0), Point3::new(1.0, 1.0, 0.0)));
        assert!(tol.approx_eq_point3(curve.point_at(2.0 / 3.0), Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn analytic_derivative_matches_numeric() {
        let curve = zigzag();
        for i in 1..10 {
            let t = f64::from(i) / 10.0;
            let analytic = curve.derivative_at(t);

            let h = 1e-7;
            let numeric = curve
                .point_at(t + h)
                .sub_point(curve.point_at(t - h))
                .mul_scalar(1.0 / (2.0 * h));

            assert!(analytic.sub(numeric).length() < 1e-5, "mismatch at t={t}");
        }
    }

    #[test]
    fn tangent_is_unit_length() {
        let curve = zigzag();
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let tangent = curve.tangent_at(t).expect("non-degenerate curve");
            assert!((tangent.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_curve_has_no_tangent() {
        let p = Point3::new(10.0, 10.0, 10.0);
        let curve = CatmullRomCurve3::new(vec![p; 5]).unwrap();
        assert_eq!(curve.point_at(0.5), p);
        assert!(curve.tangent_at(0.5).is_none());
    }

    #[test]
    fn tessellate_curve_preserves_endpoints() {
        let curve = zigzag();
        let pts = tessellate_curve_uniform(&curve, 10);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts.first().copied(), Some(Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(pts.last().copied(), Some(Point3::new(3.0, 1.0, 0.0)));
    }

}
