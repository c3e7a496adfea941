//! Projection module: off-axis frustum solving and view composition.
//!
//! Both operations are pure functions of the projection plane and the eye
//! placement for the current frame. Nothing here is cached across frames.

mod frustum;
mod view;

pub use frustum::{compute_frustum, validate_clip_range, DepthRange, Frustum, MIN_EYE_DISTANCE};
pub use view::compose_view;
