//! Plane module: display surface geometry consumed by the projection code.

mod projection_plane;

pub use projection_plane::{ProjectionPlane, AXIS_TOLERANCE};
