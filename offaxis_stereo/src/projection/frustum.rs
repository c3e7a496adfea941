/// Frustum: asymmetric viewing volume solved from a projection plane.
///
/// Generalized perspective projection: given the plane's bottom-left (`pa`),
/// bottom-right (`pb`) and top-left (`pc`) corners, its axes (`vr`, `vu`,
/// `vn`) and the eye position `pe`:
///
/// ```text
/// va = pa - pe    vb = pb - pe    vc = pc - pe
/// d  = -dot(vn, va)                     (eye-to-plane distance)
/// l  = dot(vr, va) * n / d              r = dot(vr, vb) * n / d
/// b  = dot(vu, va) * n / d              t = dot(vu, vc) * n / d
/// ```
///
/// The extents live on the near plane of an eye frame aligned with the
/// projection plane (x = right, y = up, looking down -normal).

use glam::{Mat4, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::plane::ProjectionPlane;
use crate::stereo_bail;

/// Smallest eye-to-plane distance accepted by the solver.
pub const MIN_EYE_DISTANCE: f32 = 1e-5;

/// Clip-space depth convention of a projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthRange {
    /// Depth maps to [0, 1] (Vulkan, D3D, wgpu). Same as `Mat4::perspective_rh`.
    #[default]
    ZeroToOne,
    /// Depth maps to [-1, 1] (OpenGL). Same as `Mat4::perspective_rh_gl`.
    NegativeOneToOne,
}

/// Six scalars of an asymmetric perspective frustum.
///
/// `left`/`right`/`bottom`/`top` are measured on the near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// Reject clip distances that cannot form a perspective frustum.
pub fn validate_clip_range(near: f32, far: f32) -> Result<()> {
    if !near.is_finite() || !far.is_finite() {
        stereo_bail!(Configuration, "offaxis::Frustum",
            "Clip distances must be finite (near {}, far {})", near, far);
    }
    if near <= 0.0 {
        stereo_bail!(Configuration, "offaxis::Frustum",
            "Near clip distance must be positive (got {})", near);
    }
    if near >= far {
        stereo_bail!(Configuration, "offaxis::Frustum",
            "Near clip distance {} must be less than far clip distance {}", near, far);
    }
    Ok(())
}

/// Solve the off-axis frustum for `eye` looking through `plane`.
///
/// The plane's invariants (orthonormal axes, rectangular corners) are
/// enforced when it is built, so only the eye placement is checked here.
///
/// # Errors
///
/// - `Configuration` if `near <= 0`, `near >= far`, or either is non-finite.
/// - `DegenerateGeometry` if the eye is on or behind the plane
///   (`d <= MIN_EYE_DISTANCE`) or the extents are not finite.
pub fn compute_frustum(plane: &ProjectionPlane, eye: Vec3, near: f32, far: f32) -> Result<Frustum> {
    validate_clip_range(near, far)?;

    if !eye.is_finite() {
        return Err(Error::DegenerateGeometry(format!("Eye position is not finite ({:?})", eye)));
    }

    let vr = plane.right();
    let vu = plane.up();
    let vn = plane.normal();

    let va = plane.bottom_left() - eye;
    let vb = plane.bottom_right() - eye;
    let vc = plane.top_left() - eye;

    let d = -vn.dot(va);
    if d <= MIN_EYE_DISTANCE {
        // Not logged here, the frame driver reports per-eye fallbacks
        return Err(Error::DegenerateGeometry(format!(
            "Eye is {} units from the projection plane (must be in front, > {})",
            d, MIN_EYE_DISTANCE
        )));
    }

    let scale = near / d;
    let frustum = Frustum {
        left: vr.dot(va) * scale,
        right: vr.dot(vb) * scale,
        bottom: vu.dot(va) * scale,
        top: vu.dot(vc) * scale,
        near,
        far,
    };

    if !frustum.is_finite() || frustum.width() <= 0.0 || frustum.height() <= 0.0 {
        return Err(Error::DegenerateGeometry(format!("Solved frustum is degenerate ({:?})", frustum)));
    }

    Ok(frustum)
}

impl Frustum {
    /// Width of the near-plane window.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the near-plane window.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn is_finite(&self) -> bool {
        [self.left, self.right, self.bottom, self.top, self.near, self.far]
            .iter()
            .all(|v| v.is_finite())
    }

    /// True when the window is centered on the optical axis.
    pub fn is_symmetric(&self, tolerance: f32) -> bool {
        (self.left + self.right).abs() <= tolerance && (self.bottom + self.top).abs() <= tolerance
    }

    /// Right-handed asymmetric perspective matrix (the eye looks down -Z).
    pub fn projection_matrix(&self, depth_range: DepthRange) -> Mat4 {
        let Frustum { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;

        let (depth_scale, depth_offset) = match depth_range {
            DepthRange::ZeroToOne => (f / (n - f), n * f / (n - f)),
            DepthRange::NegativeOneToOne => ((f + n) / (n - f), 2.0 * f * n / (n - f)),
        };

        Mat4::from_cols(
            Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            Vec4::new((r + l) / (r - l), (t + b) / (t - b), depth_scale, -1.0),
            Vec4::new(0.0, 0.0, depth_offset, 0.0),
        )
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
