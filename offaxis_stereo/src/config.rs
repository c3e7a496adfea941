//! Stereo rig configuration
//!
//! Plain data with defaults. Range-limited values (IPD, convergence
//! distance) are clamped, never rejected; only structurally invalid values
//! (non-finite numbers, non-positive adjust speed) fail validation.

use std::ops::RangeInclusive;
use crate::error::Result;
use crate::projection::DepthRange;
use crate::stereo_bail;

/// Accepted interpupillary distance, in world units (meters).
pub const IPD_RANGE: RangeInclusive<f32> = 0.04..=0.2;

/// Accepted convergence distance along the rig's forward axis.
pub const CONVERGENCE_DISTANCE_RANGE: RangeInclusive<f32> = 0.5..=20.0;

/// Clamp a value into an inclusive range.
pub(crate) fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// Stereo rig configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StereoConfig {
    /// Interpupillary distance (clamped to [`IPD_RANGE`])
    pub ipd: f32,
    /// Converge both eyes on the convergence point instead of keeping them parallel
    pub use_toe_in: bool,
    /// Initial convergence distance (clamped to [`CONVERGENCE_DISTANCE_RANGE`])
    pub convergence_distance: f32,
    /// Maximum convergence distance change per second
    pub convergence_adjust_speed: f32,
    /// Drive the eye cameras with off-axis matrices from the projection plane
    pub off_axis_projection: bool,
    /// Clip-space depth convention of the produced projection matrices
    pub depth_range: DepthRange,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            ipd: 0.064,
            use_toe_in: true,
            convergence_distance: 5.0,
            convergence_adjust_speed: 3.0,
            off_axis_projection: false,
            depth_range: DepthRange::ZeroToOne,
        }
    }
}

impl StereoConfig {
    /// Reject structurally invalid values.
    ///
    /// Out-of-range IPD and convergence distance are not errors.
    pub fn validate(&self) -> Result<()> {
        if !self.ipd.is_finite() {
            stereo_bail!(Configuration, "offaxis::StereoConfig", "ipd must be finite (got {})", self.ipd);
        }
        if !self.convergence_distance.is_finite() {
            stereo_bail!(Configuration, "offaxis::StereoConfig",
                "convergence_distance must be finite (got {})", self.convergence_distance);
        }
        if !(self.convergence_adjust_speed.is_finite() && self.convergence_adjust_speed > 0.0) {
            stereo_bail!(Configuration, "offaxis::StereoConfig",
                "convergence_adjust_speed must be positive (got {})", self.convergence_adjust_speed);
        }
        Ok(())
    }

    /// Copy with IPD and convergence distance clamped into range.
    pub fn clamped(&self) -> Self {
        Self {
            ipd: clamp_to(self.ipd, &IPD_RANGE),
            convergence_distance: clamp_to(self.convergence_distance, &CONVERGENCE_DISTANCE_RANGE),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
