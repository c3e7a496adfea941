/// EyeCamera: per-eye camera data owned by the renderer.
///
/// A passive container: the frame driver writes the eye pose and either
/// off-axis matrices or the lens's default on-axis matrices into it once per
/// frame, and the renderer reads them (directly or as an [`EyeUniform`]).
/// Switching back to on-axis is an explicit reset, never stale matrices.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3, Vec4};
use crate::error::Result;
use crate::projection::{validate_clip_range, DepthRange};
use crate::{stereo_bail, stereo_warn};

/// Default symmetric lens used for on-axis rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in radians
    pub fov_y_radians: f32,
    /// Width / height of the eye's viewport
    pub aspect_ratio: f32,
    /// Near clip distance (also the off-axis near plane)
    pub near: f32,
    /// Far clip distance (also the off-axis far plane)
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y_radians: 60.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Lens {
    pub fn validate(&self) -> Result<()> {
        validate_clip_range(self.near, self.far)?;
        if !(self.fov_y_radians > 0.0 && self.fov_y_radians < std::f32::consts::PI) {
            stereo_bail!(Configuration, "offaxis::Lens",
                "Vertical field of view must be in (0, pi) radians (got {})", self.fov_y_radians);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            stereo_bail!(Configuration, "offaxis::Lens",
                "Aspect ratio must be positive (got {})", self.aspect_ratio);
        }
        Ok(())
    }

    /// Symmetric perspective projection.
    pub fn projection_matrix(&self, depth_range: DepthRange) -> Mat4 {
        match depth_range {
            DepthRange::ZeroToOne => {
                Mat4::perspective_rh(self.fov_y_radians, self.aspect_ratio, self.near, self.far)
            }
            DepthRange::NegativeOneToOne => {
                Mat4::perspective_rh_gl(self.fov_y_radians, self.aspect_ratio, self.near, self.far)
            }
        }
    }
}

/// GPU-ready per-eye camera block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EyeUniform {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    /// World-space eye position, w = 1
    pub eye_position: Vec4,
}

/// Per-eye camera.
#[derive(Debug, Clone)]
pub struct EyeCamera {
    lens: Lens,
    position: Vec3,
    orientation: Quat,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    off_axis: bool,
}

impl EyeCamera {
    /// Create a camera at the origin with the lens's on-axis matrices.
    ///
    /// # Errors
    ///
    /// `Configuration` if the lens is invalid.
    pub fn new(lens: Lens, depth_range: DepthRange) -> Result<Self> {
        lens.validate()?;
        Ok(Self {
            lens,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: lens.projection_matrix(depth_range),
            off_axis: false,
        })
    }

    // ===== GETTERS =====

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// World-to-eye matrix.
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// True while the matrices come from the off-axis path.
    pub fn is_off_axis(&self) -> bool {
        self.off_axis
    }

    pub fn to_uniform(&self) -> EyeUniform {
        EyeUniform {
            view: self.view_matrix,
            projection: self.projection_matrix,
            view_projection: self.view_projection_matrix(),
            eye_position: self.position.extend(1.0),
        }
    }

    // ===== SETTERS =====

    /// Replace the lens. Takes effect on the next on-axis reset.
    pub fn set_lens(&mut self, lens: Lens) -> Result<()> {
        lens.validate()?;
        self.lens = lens;
        Ok(())
    }

    /// Store the eye's world pose.
    ///
    /// Non-finite positions and orientations that cannot be normalized are
    /// ignored; the previous pose is kept.
    pub fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        if !position.is_finite() || !orientation.is_finite() || orientation.length_squared() <= f32::EPSILON {
            stereo_warn!("offaxis::EyeCamera", "Ignoring invalid pose {:?} / {:?}", position, orientation);
            return;
        }
        self.position = position;
        self.orientation = orientation.normalize();
    }

    /// Assign off-axis matrices.
    pub fn set_off_axis(&mut self, view: Mat4, projection: Mat4) {
        self.view_matrix = view;
        self.projection_matrix = projection;
        self.off_axis = true;
    }

    /// Restore the lens projection and the pose-derived view.
    pub fn reset_on_axis(&mut self, depth_range: DepthRange) {
        self.projection_matrix = self.lens.projection_matrix(depth_range);
        self.view_matrix =
            Mat4::from_rotation_translation(self.orientation, self.position).inverse();
        self.off_axis = false;
    }
}

#[cfg(test)]
#[path = "eye_camera_tests.rs"]
mod tests;
