//! Rig module: eye placement and orientation for a stereo rig.

mod eye;
mod eye_rig;

pub use eye::{Eye, EyeState, RigTransform, StereoPair};
pub use eye_rig::{EyeRig, OrientationMode};
