//! Camera module: per-eye camera data written by the frame driver.
//!
//! Cameras are owned by the caller (the renderer); the driver only
//! mutates their pose and matrices once per frame.

mod eye_camera;

pub use eye_camera::{EyeCamera, EyeUniform, Lens};
