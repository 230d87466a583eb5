#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Procedural flight paths: a smooth, stylized 3D curve between two points
//! and rigid frames sampled along it for driving an animated object.
//!
//! The path arcs around the world origin by interpolating the endpoints in
//! polar form, with a flutter oscillation that vanishes at both ends. Frames
//! combine the curve tangent with a reference up vector into an orthonormal
//! basis, optionally rolled about the travel direction.
//!
//! ```
//! use flightpath::geom::Point3;
//! use flightpath::path::{FrameSampler, PolarArcPathBuilder};
//!
//! let path = PolarArcPathBuilder::new()
//!     .build(Point3::new(100.0, 50.0, 0.0), Point3::new(-80.0, 30.0, 60.0))
//!     .unwrap();
//! let transform = FrameSampler::new().sample_frame(&path, 0.25);
//! assert!(transform.translation().is_finite());
//! ```

pub mod geom;
pub mod path;
pub mod sim;
