/// View composition for off-axis eyes.
///
/// The eye frame is aligned with the display plane, not with the eye's own
/// facing direction, so the image stays keystoned to the physical surface
/// as the head turns. Applied right-to-left to a world point:
///
/// ```text
/// view = plane_basis · rotate(inverse(rig_orientation) · plane_orientation) · translate(-eye)
/// ```
///
/// `plane_basis` has rows `right`, `up`, `normal`. When the rig and the
/// plane share an orientation the middle term vanishes and this reduces to
/// the classic `basis · translate(-eye)`.

use glam::{Mat4, Quat, Vec3};
use crate::plane::ProjectionPlane;

/// Compose the world-to-eye matrix for an eye at `eye_world_position`.
pub fn compose_view(plane: &ProjectionPlane, rig_orientation: Quat, eye_world_position: Vec3) -> Mat4 {
    let relative_rotation = rig_orientation.normalize().inverse() * plane.rotation();

    plane.world_matrix()
        * Mat4::from_quat(relative_rotation)
        * Mat4::from_translation(-eye_world_position)
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
