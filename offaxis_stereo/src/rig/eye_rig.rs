/// EyeRig: places and orients the two eyes of a stereo rig.
///
/// Lateral placement is always active: the eyes sit at `∓ipd/2` on the rig's
/// +X axis. Orientation depends on the mode:
/// - `ToeIn`: both eyes look at the convergence point, which sits
///   `convergence_distance` ahead of the rig on its forward (-Z) axis.
/// - `Parallel`: both eyes share the rig's orientation.
///
/// The convergence distance never jumps: callers request a target and
/// `update(dt)` walks toward it at `convergence_adjust_speed` units per
/// second.

use glam::{Mat3, Quat, Vec3};
use crate::config::{clamp_to, StereoConfig, CONVERGENCE_DISTANCE_RANGE, IPD_RANGE};
use crate::error::Result;
use crate::{stereo_bail, stereo_debug, stereo_trace, stereo_warn};
use super::eye::{Eye, EyeState, RigTransform, StereoPair};

/// How the eyes are oriented relative to the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationMode {
    /// Eyes rotate inward to meet at the convergence point
    ToeIn,
    /// Eyes keep the rig's orientation
    Parallel,
}

impl OrientationMode {
    pub fn from_toe_in(use_toe_in: bool) -> Self {
        if use_toe_in {
            OrientationMode::ToeIn
        } else {
            OrientationMode::Parallel
        }
    }
}

/// Stereo eye rig state.
#[derive(Debug, Clone, PartialEq)]
pub struct EyeRig {
    ipd: f32,
    mode: OrientationMode,
    convergence_distance: f32,
    target_convergence_distance: f32,
    convergence_adjust_speed: f32,
}

impl EyeRig {
    /// Create a rig from configuration.
    ///
    /// IPD and convergence distance are clamped into range.
    ///
    /// # Errors
    ///
    /// `Configuration` if the configuration is structurally invalid
    /// (see [`StereoConfig::validate`]).
    pub fn new(config: &StereoConfig) -> Result<Self> {
        config.validate()?;
        let config = config.clamped();

        stereo_debug!("offaxis::EyeRig", "Created rig: ipd {}, {:?}, convergence {}",
            config.ipd, OrientationMode::from_toe_in(config.use_toe_in), config.convergence_distance);

        Ok(Self {
            ipd: config.ipd,
            mode: OrientationMode::from_toe_in(config.use_toe_in),
            convergence_distance: config.convergence_distance,
            target_convergence_distance: config.convergence_distance,
            convergence_adjust_speed: config.convergence_adjust_speed,
        })
    }

    // ===== IPD =====

    pub fn ipd(&self) -> f32 {
        self.ipd
    }

    /// Set the IPD, clamped into [`IPD_RANGE`]. Returns the applied value.
    ///
    /// Non-finite values are ignored.
    pub fn set_ipd(&mut self, ipd: f32) -> f32 {
        if !ipd.is_finite() {
            stereo_warn!("offaxis::EyeRig", "Ignoring non-finite ipd {}", ipd);
            return self.ipd;
        }
        self.ipd = clamp_to(ipd, &IPD_RANGE);
        self.ipd
    }

    // ===== ORIENTATION MODE =====

    pub fn orientation_mode(&self) -> OrientationMode {
        self.mode
    }

    pub fn set_orientation_mode(&mut self, mode: OrientationMode) {
        if mode != self.mode {
            stereo_debug!("offaxis::EyeRig", "Orientation mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    // ===== CONVERGENCE =====

    /// Current convergence distance.
    pub fn convergence_distance(&self) -> f32 {
        self.convergence_distance
    }

    /// Distance the rig is currently moving toward.
    pub fn target_convergence_distance(&self) -> f32 {
        self.target_convergence_distance
    }

    pub fn convergence_adjust_speed(&self) -> f32 {
        self.convergence_adjust_speed
    }

    /// # Errors
    ///
    /// `Configuration` if `speed` is not a positive finite number.
    pub fn set_convergence_adjust_speed(&mut self, speed: f32) -> Result<()> {
        if !(speed.is_finite() && speed > 0.0) {
            stereo_bail!(Configuration, "offaxis::EyeRig",
                "convergence_adjust_speed must be positive (got {})", speed);
        }
        self.convergence_adjust_speed = speed;
        Ok(())
    }

    /// Request a new convergence distance, clamped into
    /// [`CONVERGENCE_DISTANCE_RANGE`]. Reached gradually through `update`.
    pub fn request_convergence_distance(&mut self, target: f32) {
        if !target.is_finite() {
            stereo_warn!("offaxis::EyeRig", "Ignoring non-finite convergence target {}", target);
            return;
        }
        self.target_convergence_distance = clamp_to(target, &CONVERGENCE_DISTANCE_RANGE);
    }

    /// Move the requested target by `delta` (positive pushes the point away).
    pub fn nudge_convergence_distance(&mut self, delta: f32) {
        self.request_convergence_distance(self.target_convergence_distance + delta);
    }

    /// Set the convergence distance immediately, bypassing the rate limit.
    ///
    /// Meant for setup, not for the per-frame path.
    pub fn snap_convergence_distance(&mut self, distance: f32) {
        self.request_convergence_distance(distance);
        self.convergence_distance = self.target_convergence_distance;
    }

    /// Advance the convergence distance toward its target by at most
    /// `convergence_adjust_speed * dt`. Returns the signed change applied.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn update(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let max_step = self.convergence_adjust_speed * dt;
        let remaining = self.target_convergence_distance - self.convergence_distance;

        if remaining.abs() <= max_step {
            self.convergence_distance = self.target_convergence_distance;
            return remaining;
        }

        let step = max_step.copysign(remaining);
        self.convergence_distance += step;
        step
    }

    /// Convergence point in rig space.
    pub fn convergence_local(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -self.convergence_distance)
    }

    /// Convergence point in world space.
    pub fn convergence_point(&self, rig: &RigTransform) -> Vec3 {
        rig.transform_point(self.convergence_local())
    }

    // ===== EYES =====

    /// Rig-space offset of an eye.
    pub fn eye_local_position(&self, eye: Eye) -> Vec3 {
        Vec3::new(eye.lateral_sign() * self.ipd * 0.5, 0.0, 0.0)
    }

    /// Place and orient both eyes for the rig pose.
    pub fn solve(&self, rig: &RigTransform) -> StereoPair<EyeState> {
        let rotation = rig.rotation.normalize();
        let rig = RigTransform::new(rig.position, rotation);
        let target = self.convergence_point(&rig);

        let eyes = StereoPair::from_fn(|eye| {
            let local_position = self.eye_local_position(eye);
            let world_position = rig.transform_point(local_position);
            let orientation = match self.mode {
                OrientationMode::ToeIn => look_at_orientation(world_position, target, &rig),
                OrientationMode::Parallel => rotation,
            };

            EyeState {
                eye,
                local_position,
                world_position,
                orientation,
            }
        });

        stereo_trace!("offaxis::EyeRig", "Eyes at {:?} / {:?} ({:?})",
            eyes.left.world_position, eyes.right.world_position, self.mode);

        eyes
    }
}

/// Orientation looking from `from` toward `to` (-Z forward).
///
/// Up is always derived from the rig's up axis, so the eye never rolls
/// relative to the rig. When the look direction is (anti)parallel to that
/// axis, the rig's lateral axis defines right instead.
pub(crate) fn look_at_orientation(from: Vec3, to: Vec3, rig: &RigTransform) -> Quat {
    let direction = to - from;
    if direction.length_squared() <= f32::EPSILON {
        return rig.rotation;
    }
    let forward = direction.normalize();

    let mut right = forward.cross(rig.up());
    if right.length_squared() <= 1e-8 {
        let lateral = rig.right();
        right = lateral - forward * forward.dot(lateral);
    }
    let right = right.normalize();
    let up = right.cross(forward);

    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

#[cfg(test)]
#[path = "eye_rig_tests.rs"]
mod tests;
