//! Driver module: per-frame orchestration of rig, frustum and view.

mod stereo_frame_driver;

pub use stereo_frame_driver::{EyeOutcome, FrameInputs, FrameReport, StereoFrameDriver};
