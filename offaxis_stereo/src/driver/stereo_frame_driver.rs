/// StereoFrameDriver: per-frame orchestration of the stereo rig.
///
/// Each frame:
/// 1. Advance the convergence adjustment and solve both eye states.
/// 2. Per eye, if off-axis is disabled: reset the camera to its lens's
///    on-axis matrices.
/// 3. Otherwise solve the off-axis frustum and compose the view against the
///    projection plane, then assign both to the camera.
///
/// Eyes are independent: no state is shared between the two per-eye passes.
/// Degenerate geometry for one eye falls back to on-axis for that eye only;
/// configuration errors abort the frame.

use glam::Quat;
use crate::camera::EyeCamera;
use crate::config::StereoConfig;
use crate::error::{Error, Result};
use crate::plane::ProjectionPlane;
use crate::projection::{compose_view, compute_frustum, DepthRange, Frustum};
use crate::rig::{Eye, EyeRig, EyeState, RigTransform, StereoPair};
use crate::{stereo_bail, stereo_err, stereo_info, stereo_trace, stereo_warn};

/// Per-frame inputs supplied by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInputs {
    /// Rig pose for this frame (head tracking or free camera)
    pub rig: RigTransform,
    /// New convergence distance to move toward, if the user asked for one
    pub convergence_request: Option<f32>,
}

impl FrameInputs {
    pub fn new(rig: RigTransform) -> Self {
        Self { rig, convergence_request: None }
    }
}

/// What happened to one eye's camera this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EyeOutcome {
    /// Off-axis disabled, default matrices restored
    OnAxis,
    /// Off-axis matrices assigned from this frustum
    OffAxis(Frustum),
    /// Off-axis skipped because of degenerate geometry, default matrices restored
    Fallback(Error),
}

/// Summary of one `advance_frame` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub convergence_distance: f32,
    pub eyes: StereoPair<EyeState>,
    pub outcomes: StereoPair<EyeOutcome>,
}

impl FrameReport {
    pub fn is_off_axis(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| matches!(o, EyeOutcome::OffAxis(_)))
    }

    pub fn fallback_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| matches!(o, EyeOutcome::Fallback(_))).count()
    }
}

/// Drives both eye cameras from the rig and the projection plane.
#[derive(Debug, Clone)]
pub struct StereoFrameDriver {
    rig: EyeRig,
    plane: Option<ProjectionPlane>,
    off_axis: bool,
    depth_range: DepthRange,
    last_rig: RigTransform,
    in_fallback: StereoPair<bool>,
    frame_index: u64,
}

impl StereoFrameDriver {
    /// Create a driver.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the configuration is invalid.
    /// - `Configuration` if `off_axis_projection` is set without a plane.
    pub fn new(config: &StereoConfig, plane: Option<ProjectionPlane>) -> Result<Self> {
        let rig = EyeRig::new(config)?;

        if config.off_axis_projection && plane.is_none() {
            stereo_bail!(Configuration, "offaxis::FrameDriver",
                "Off-axis projection requested but no projection plane is set");
        }

        stereo_info!("offaxis::FrameDriver", "Stereo driver ready (off-axis: {}, plane: {})",
            config.off_axis_projection, plane.is_some());

        Ok(Self {
            rig,
            plane,
            off_axis: config.off_axis_projection,
            depth_range: config.depth_range,
            last_rig: RigTransform::IDENTITY,
            in_fallback: StereoPair::default(),
            frame_index: 0,
        })
    }

    // ===== ACCESSORS =====

    pub fn rig(&self) -> &EyeRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut EyeRig {
        &mut self.rig
    }

    pub fn projection_plane(&self) -> Option<&ProjectionPlane> {
        self.plane.as_ref()
    }

    pub fn is_off_axis(&self) -> bool {
        self.off_axis
    }

    pub fn depth_range(&self) -> DepthRange {
        self.depth_range
    }

    /// Number of frames advanced so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // ===== TOGGLES =====

    /// Enable or disable off-axis rendering.
    ///
    /// # Errors
    ///
    /// `Configuration` when enabling without a projection plane; off-axis
    /// stays disabled.
    pub fn set_off_axis(&mut self, enabled: bool) -> Result<()> {
        if enabled && self.plane.is_none() {
            self.off_axis = false;
            stereo_bail!(Configuration, "offaxis::FrameDriver",
                "Cannot enable off-axis projection without a projection plane");
        }
        if enabled != self.off_axis {
            stereo_info!("offaxis::FrameDriver", "Off-axis projection {}",
                if enabled { "enabled" } else { "disabled" });
        }
        self.off_axis = enabled;
        Ok(())
    }

    /// Replace the projection plane. Removing it while off-axis is enabled
    /// disables off-axis rendering.
    pub fn set_projection_plane(&mut self, plane: Option<ProjectionPlane>) {
        if plane.is_none() && self.off_axis {
            stereo_warn!("offaxis::FrameDriver",
                "Projection plane removed, falling back to on-axis rendering");
            self.off_axis = false;
        }
        self.plane = plane;
    }

    // ===== FRAME =====

    /// Advance one frame and write both eye cameras.
    ///
    /// # Errors
    ///
    /// `Configuration` if an eye camera's clip range is invalid. Degenerate
    /// geometry never fails the frame; it is reported per eye.
    pub fn advance_frame(
        &mut self,
        dt: f32,
        inputs: &FrameInputs,
        cameras: &mut StereoPair<EyeCamera>,
    ) -> Result<FrameReport> {
        if let Some(distance) = inputs.convergence_request {
            self.rig.request_convergence_distance(distance);
        }
        self.rig.update(dt);

        let pose = if inputs.rig.is_valid() {
            inputs.rig
        } else {
            stereo_warn!("offaxis::FrameDriver", "Invalid rig pose, reusing the previous one");
            self.last_rig
        };
        self.last_rig = pose;

        let eyes = self.rig.solve(&pose);
        let mut outcomes = StereoPair::new(EyeOutcome::OnAxis, EyeOutcome::OnAxis);

        for eye in Eye::BOTH {
            let outcome = self.apply_eye(&eyes[eye], pose.rotation, &mut cameras[eye])?;
            self.track_fallback(eye, &outcome);
            outcomes[eye] = outcome;
        }

        self.frame_index += 1;

        Ok(FrameReport {
            frame_index: self.frame_index,
            convergence_distance: self.rig.convergence_distance(),
            eyes,
            outcomes,
        })
    }

    fn apply_eye(&self, state: &EyeState, rig_rotation: Quat, camera: &mut EyeCamera) -> Result<EyeOutcome> {
        // Camera keeps its last finite pose
        if !state.is_finite() {
            camera.reset_on_axis(self.depth_range);
            return Ok(EyeOutcome::Fallback(Error::DegenerateGeometry(format!(
                "{} eye pose is not finite", state.eye.name()
            ))));
        }
        camera.set_pose(state.world_position, state.orientation);

        if !self.off_axis {
            camera.reset_on_axis(self.depth_range);
            return Ok(EyeOutcome::OnAxis);
        }

        let plane = self.plane.as_ref().ok_or_else(|| stereo_err!(Configuration, "offaxis::FrameDriver",
            "Off-axis projection enabled without a projection plane"))?;

        let lens = *camera.lens();
        let frustum = match compute_frustum(plane, state.world_position, lens.near, lens.far) {
            Ok(frustum) => frustum,
            Err(err) if err.is_recoverable() => {
                camera.reset_on_axis(self.depth_range);
                return Ok(EyeOutcome::Fallback(err));
            }
            Err(err) => return Err(err),
        };

        let projection = frustum.projection_matrix(self.depth_range);
        let view = compose_view(plane, rig_rotation, state.world_position);

        if !projection.is_finite() || !view.is_finite() {
            camera.reset_on_axis(self.depth_range);
            return Ok(EyeOutcome::Fallback(Error::DegenerateGeometry(
                "Off-axis matrices are not finite".to_string(),
            )));
        }

        camera.set_off_axis(view, projection);
        stereo_trace!("offaxis::FrameDriver", "{} eye frustum l {} r {} b {} t {}",
            state.eye.name(), frustum.left, frustum.right, frustum.bottom, frustum.top);

        Ok(EyeOutcome::OffAxis(frustum))
    }

    /// Warn when an eye enters or leaves the fallback path, not every frame.
    fn track_fallback(&mut self, eye: Eye, outcome: &EyeOutcome) {
        let falling_back = matches!(outcome, EyeOutcome::Fallback(_));
        match (self.in_fallback[eye], outcome) {
            (false, EyeOutcome::Fallback(err)) => {
                stereo_warn!("offaxis::FrameDriver", "{} eye falls back to on-axis: {}", eye.name(), err);
            }
            (true, EyeOutcome::OffAxis(_)) => {
                stereo_info!("offaxis::FrameDriver", "{} eye back on off-axis projection", eye.name());
            }
            _ => {}
        }
        self.in_fallback[eye] = falling_back;
    }
}

#[cfg(test)]
#[path = "stereo_frame_driver_tests.rs"]
mod tests;
