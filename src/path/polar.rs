//! Polar-plane representation of flight endpoints and the base arc swept
//! between them.

use std::f64::consts::{PI, TAU};

use crate::geom::Point3;

/// Polar form of a point projected onto the horizontal (x, z) plane,
/// relative to the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarCoordinate {
    /// Signed angle in (-π, π], measured from +X toward +Z.
    pub angle: f64,
    /// Distance from the vertical axis through the origin, >= 0.
    pub radius: f64,
}

impl PolarCoordinate {
    /// Projects a point onto the horizontal plane and converts to polar form.
    ///
    /// A point on the vertical axis has no defined angle; it is pinned to 0
    /// so downstream interpolation stays finite.
    #[must_use]
    pub fn from_horizontal(p: Point3) -> Self {
        let radius = p.x.hypot(p.z);
        let angle = if radius == 0.0 { 0.0 } else { p.z.atan2(p.x) };
        Self { angle, radius }
    }
}

/// The smooth base arc between two endpoints: angle, radius and height are
/// interpolated independently and reconverted to Cartesian, which swings the
/// path around the world origin instead of cutting straight across the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarArc {
    start: PolarCoordinate,
    end: PolarCoordinate,
    start_y: f64,
    end_y: f64,
}

impl PolarArc {
    /// Builds the arc between two points, correcting the end angle so the
    /// interpolation sweeps the minor arc.
    #[must_use]
    pub fn between(start: Point3, end: Point3) -> Self {
        let a = PolarCoordinate::from_horizontal(start);
        let mut b = PolarCoordinate::from_horizontal(end);
        b.angle = shortest_arc_angle(a.angle, b.angle);
        Self {
            start: a,
            end: b,
            start_y: start.y,
            end_y: end.y,
        }
    }

    /// Signed angular sweep from start to end. Never exceeds π in magnitude.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.end.angle - self.start.angle
    }

    /// Evaluates the unfluttered arc at `u`.
    ///
    /// Pure in its inputs. The expression is analytic, so parameters slightly
    /// outside [0, 1] extrapolate smoothly; the path builder relies on this
    /// for its forward-difference tangent estimate at the last sample.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point3 {
        let angle = lerp(self.start.angle, self.end.angle, u);
        let radius = lerp(self.start.radius, self.end.radius, u);
        let y = lerp(self.start_y, self.end_y, u);
        Point3::new(radius * angle.cos(), y, radius * angle.sin())
    }
}

/// Adjusts `to` by a full turn when the direct interpolation from `from`
/// would sweep more than half a circle.
///
/// Comparisons are strict: a difference of exactly π is left untouched, so
/// diametrically opposed endpoints take one consistent sweep direction.
#[must_use]
pub fn shortest_arc_angle(from: f64, to: f64) -> f64 {
    let d = to - from;
    if d < -PI {
        to + TAU
    } else if d > PI {
        to - TAU
    } else {
        to
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Tolerance;

    #[test]
    fn polar_conversion_covers_quadrants() {
        let tol = Tolerance::DEFAULT;

        let p = PolarCoordinate::from_horizontal(Point3::new(1.0, 0.0, 0.0));
        assert!(tol.approx_zero_f64(p.angle));
        assert!(tol.approx_eq_f64(p.radius, 1.0));

        let p = PolarCoordinate::from_horizontal(Point3::new(0.0, 5.0, 2.0));
        assert!(tol.approx_eq_f64(p.angle, PI / 2.0));
        assert!(tol.approx_eq_f64(p.radius, 2.0));

        let p = PolarCoordinate::from_horizontal(Point3::new(-3.0, 0.0, -3.0));
        assert!(tol.approx_eq_f64(p.angle, -3.0 * PI / 4.0));
        assert!(tol.approx_eq_f64(p.radius, 18.0_f64.sqrt()));
    }

    #[test]
    fn axis_point_has_zero_angle() {
        let p = PolarCoordinate::from_horizontal(Point3::new(0.0, 42.0, 0.0));
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.radius, 0.0);
    }

    #[test]
    fn shortest_arc_wraps_positive_overshoot() {
        // 170° to -170° should sweep +20°, not -340°.
        let from = 170.0_f64.to_radians();
        let to = (-170.0_f64).to_radians();
        let corrected = shortest_arc_angle(from, to);
        assert!((corrected - from - 20.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn shortest_arc_wraps_negative_overshoot() {
        let from = (-170.0_f64).to_radians();
        let to = 170.0_f64.to_radians();
        let corrected = shortest_arc_angle(from, to);
        assert!((corrected - from + 20.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn exact_half_turn_is_left_untouched() {
        // d == π takes neither wrap branch.
        assert_eq!(shortest_arc_angle(0.0, PI), PI);
        assert_eq!(shortest_arc_angle(PI, 0.0), 0.0);
    }

    #[test]
    fn sweep_never_exceeds_half_turn() {
        for i in 0..24 {
            for j in 0..24 {
                let a = -PI + TAU * f64::from(i) / 24.0;
                let b = -PI + TAU * f64::from(j) / 24.0;
                let arc = PolarArc::between(
                    Point3::new(10.0 * a.cos(), 0.0, 10.0 * a.sin()),
                    Point3::new(10.0 * b.cos(), 0.0, 10.0 * b.sin()),
                );
                assert!(arc.sweep_angle().abs() <= PI + 1e-9);
            }
        }
    }

    #[test]
    fn arc_interpolates_radius_and_height() {
        let arc = PolarArc::between(Point3::new(10.0, 0.0, 0.0), Point3::new(0.0, 8.0, 20.0));
        let mid = arc.point_at(0.5);
        let tol = Tolerance::DEFAULT;

        // Radius halfway between 10 and 20, height halfway between 0 and 8.
        assert!(tol.approx_eq_f64(mid.x.hypot(mid.z), 15.0));
        assert!(tol.approx_eq_f64(mid.y, 4.0));
    }

    #[test]
    fn arc_hits_endpoints() {
        let start = Point3::new(100.0, 50.0, 25.0);
        let end = Point3::new(-30.0, 20.0, 60.0);
        let arc = PolarArc::between(start, end);
        let tol = Tolerance::DEFAULT;
        assert!(tol.approx_eq_point3(arc.point_at(0.0), start));
        assert!(tol.approx_eq_point3(arc.point_at(1.0), end));
    }
}
