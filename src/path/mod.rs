mod builder;
mod frame;
mod polar;

pub use builder::{FlightPath, FlightPathOptions, PathError, PolarArcPathBuilder};
pub use frame::{Frame, FrameOptions, FrameSampler};
pub use polar::{PolarArc, PolarCoordinate, shortest_arc_angle};
