pub mod curve;
mod base_point;
mod path;

pub use base_point::BasePoint;
pub use curve::{Arc, CubicBezier, Curve, CurveDomain, Direction, Segment};
pub use path::{PathKind, TrackPath, DEFAULT_SEGMENTS};
