/// ProjectionPlane: world-space geometry of a flat display surface.
///
/// The plane is a rectangle described by three of its corners (bottom-left,
/// bottom-right, top-left; the top-right corner is implicit) and an
/// orthonormal right-handed basis: `right` along the bottom edge, `up` along
/// the left edge, `normal = right × up` pointing toward the viewer.
///
/// Planes are validated on construction and are immutable afterwards:
/// the projection code only ever reads them.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::error::Result;
use crate::stereo_bail;

/// Tolerance for unit length, orthogonality and edge alignment checks.
pub const AXIS_TOLERANCE: f32 = 1e-4;

/// Flat rectangular display surface in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPlane {
    bottom_left: Vec3,
    bottom_right: Vec3,
    top_left: Vec3,
    right: Vec3,
    up: Vec3,
    normal: Vec3,
    rotation: Quat,
}

impl ProjectionPlane {
    /// Create a plane from explicit corners and axes.
    ///
    /// # Errors
    ///
    /// `DegenerateGeometry` if the axes are not orthonormal, are not
    /// right-handed, or disagree with the corner edges.
    pub fn new(
        bottom_left: Vec3,
        bottom_right: Vec3,
        top_left: Vec3,
        right: Vec3,
        up: Vec3,
        normal: Vec3,
    ) -> Result<Self> {
        let plane = Self {
            bottom_left,
            bottom_right,
            top_left,
            right,
            up,
            normal,
            rotation: Quat::IDENTITY,
        };
        plane.validate()?;

        Ok(Self {
            rotation: Quat::from_mat3(&Mat3::from_cols(right, up, normal)).normalize(),
            ..plane
        })
    }

    /// Create a plane from three corners, deriving the axes from the edges.
    pub fn from_corners(bottom_left: Vec3, bottom_right: Vec3, top_left: Vec3) -> Result<Self> {
        let bottom_edge = bottom_right - bottom_left;
        let left_edge = top_left - bottom_left;

        if !bottom_edge.is_finite() || !left_edge.is_finite() {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Corners must be finite");
        }
        if bottom_edge.length_squared() <= f32::EPSILON || left_edge.length_squared() <= f32::EPSILON {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Plane edges must have non-zero length (bottom {}, left {})",
                bottom_edge.length(), left_edge.length());
        }

        let right = bottom_edge.normalize();
        let up = left_edge.normalize();
        let normal = right.cross(up).normalize_or_zero();

        Self::new(bottom_left, bottom_right, top_left, right, up, normal)
    }

    /// Create a plane of `size` (width, height) centered on `center` and
    /// oriented by `rotation`.
    ///
    /// With an identity rotation the plane lies in XY, `right = +X`,
    /// `up = +Y` and the normal faces `+Z`.
    pub fn from_transform(center: Vec3, rotation: Quat, size: Vec2) -> Result<Self> {
        if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Plane size must be positive and finite (got {}x{})", size.x, size.y);
        }
        if !center.is_finite() || !rotation.is_finite() || rotation.length_squared() <= f32::EPSILON {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Plane transform must be finite with a non-zero rotation");
        }

        let rotation = rotation.normalize();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let normal = rotation * Vec3::Z;
        let half = size * 0.5;

        let bottom_left = center - right * half.x - up * half.y;
        let bottom_right = center + right * half.x - up * half.y;
        let top_left = center - right * half.x + up * half.y;

        let plane = Self {
            bottom_left,
            bottom_right,
            top_left,
            right,
            up,
            normal,
            rotation,
        };
        plane.validate()?;
        Ok(plane)
    }

    /// Check the plane invariants: orthonormal right-handed axes aligned
    /// with the rectangle's edges.
    pub fn validate(&self) -> Result<()> {
        let axes = [("right", self.right), ("up", self.up), ("normal", self.normal)];
        for (name, axis) in axes {
            if !axis.is_finite() || (axis.length() - 1.0).abs() > AXIS_TOLERANCE {
                stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                    "Axis '{}' is not unit length ({:?})", name, axis);
            }
        }

        if self.right.dot(self.up).abs() > AXIS_TOLERANCE
            || self.right.dot(self.normal).abs() > AXIS_TOLERANCE
            || self.up.dot(self.normal).abs() > AXIS_TOLERANCE
        {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Axes are not mutually orthogonal");
        }

        if self.right.cross(self.up).dot(self.normal) < 1.0 - AXIS_TOLERANCE {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Axes are not right-handed (normal must equal right x up)");
        }

        let bottom_edge = self.bottom_right - self.bottom_left;
        let left_edge = self.top_left - self.bottom_left;
        if !bottom_edge.is_finite() || !left_edge.is_finite() {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Corners must be finite");
        }

        let bottom_len = bottom_edge.length();
        let left_len = left_edge.length();
        if bottom_len <= f32::EPSILON || left_len <= f32::EPSILON {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Plane edges must have non-zero length");
        }

        // Edges scaled to unit length must match the axes
        if bottom_edge.dot(self.right) / bottom_len < 1.0 - AXIS_TOLERANCE
            || left_edge.dot(self.up) / left_len < 1.0 - AXIS_TOLERANCE
        {
            stereo_bail!(DegenerateGeometry, "offaxis::ProjectionPlane",
                "Corners do not form a rectangle aligned with the plane axes");
        }

        Ok(())
    }

    // ===== CORNERS =====

    pub fn bottom_left(&self) -> Vec3 {
        self.bottom_left
    }

    pub fn bottom_right(&self) -> Vec3 {
        self.bottom_right
    }

    pub fn top_left(&self) -> Vec3 {
        self.top_left
    }

    /// Implicit fourth corner.
    pub fn top_right(&self) -> Vec3 {
        self.bottom_right + self.top_left - self.bottom_left
    }

    /// Corners in counter-clockwise order seen from the front:
    /// bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [Vec3; 4] {
        [self.bottom_left, self.bottom_right, self.top_right(), self.top_left]
    }

    pub fn center(&self) -> Vec3 {
        (self.bottom_right + self.top_left) * 0.5
    }

    /// Width and height in world units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            (self.bottom_right - self.bottom_left).length(),
            (self.top_left - self.bottom_left).length(),
        )
    }

    pub fn aspect_ratio(&self) -> f32 {
        let size = self.size();
        size.x / size.y
    }

    // ===== AXES =====

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit normal pointing toward the viewer.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// World orientation of the plane (maps X/Y/Z onto right/up/normal).
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Basis matrix with rows `right`, `up`, `normal`.
    ///
    /// Rotates world directions into the plane-aligned frame.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_cols(self.right, self.up, self.normal).transpose())
    }

    /// Signed distance of `point` from the plane along the normal
    /// (positive in front of the plane).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.bottom_left)
    }
}

#[cfg(test)]
#[path = "projection_plane_tests.rs"]
mod tests;
