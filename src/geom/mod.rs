mod core;
mod curve;

pub use core::{Point3, Tolerance, Transform, Vec3};
pub use curve::{CatmullRomCurve3, Curve3, tessellate_curve_uniform};
