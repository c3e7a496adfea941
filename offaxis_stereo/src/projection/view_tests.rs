use glam::{Mat4, Quat, Vec2, Vec3};
use crate::plane::ProjectionPlane;
use crate::projection::{compute_frustum, DepthRange};
use super::*;

fn project(m: &Mat4, p: Vec3) -> Vec3 {
    let clip = *m * p.extend(1.0);
    clip.truncate() / clip.w
}

#[test]
fn test_identity_plane_and_rig_is_translation() {
    let plane = ProjectionPlane::from_transform(Vec3::ZERO, Quat::IDENTITY, Vec2::new(2.0, 2.0)).unwrap();
    let eye = Vec3::new(0.1, 0.2, 3.0);

    let view = compose_view(&plane, Quat::IDENTITY, eye);
    assert!(view.abs_diff_eq(Mat4::from_translation(-eye), 1e-6));
}

#[test]
fn test_rig_aligned_with_plane_uses_plane_basis() {
    let rotation = Quat::from_rotation_y(0.6);
    let plane = ProjectionPlane::from_transform(Vec3::new(0.0, 0.0, -2.0), rotation, Vec2::new(1.6, 0.9)).unwrap();
    let eye = plane.center() + plane.normal() * 1.5 + plane.right() * 0.2;

    let view = compose_view(&plane, rotation, eye);
    let expected = plane.world_matrix() * Mat4::from_translation(-eye);
    assert!(view.abs_diff_eq(expected, 1e-5));

    // Plane normal maps onto the eye's +Z, so the plane lies at -Z
    let center_in_eye = view.transform_point3(plane.center());
    assert!((center_in_eye.z + 1.5).abs() < 1e-4);
    assert!((center_in_eye.x + 0.2).abs() < 1e-4);
}

#[test]
fn test_rotated_plane_corners_map_to_ndc_corners() {
    let rotation = Quat::from_rotation_y(-0.4) * Quat::from_rotation_x(0.25);
    let plane = ProjectionPlane::from_transform(Vec3::new(1.0, 0.5, -3.0), rotation, Vec2::new(2.0, 1.2)).unwrap();
    let eye = plane.center() + plane.normal() * 2.0 - plane.up() * 0.3 + plane.right() * 0.4;

    let frustum = compute_frustum(&plane, eye, 0.1, 100.0).unwrap();
    let view = compose_view(&plane, rotation, eye);
    let view_projection = frustum.projection_matrix(DepthRange::ZeroToOne) * view;

    let expected = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    for (corner, (x, y)) in plane.corners().iter().zip(expected) {
        let ndc = project(&view_projection, *corner);
        assert!((ndc.x - x).abs() < 1e-3, "corner {:?} -> {:?}", corner, ndc);
        assert!((ndc.y - y).abs() < 1e-3, "corner {:?} -> {:?}", corner, ndc);
    }
}

#[test]
fn test_rig_rotation_relative_to_plane_is_applied() {
    let plane = ProjectionPlane::from_transform(Vec3::ZERO, Quat::IDENTITY, Vec2::ONE).unwrap();
    let rig = Quat::from_rotation_y(0.3);
    let eye = Vec3::new(0.0, 0.0, 2.0);

    let view = compose_view(&plane, rig, eye);
    let expected = Mat4::from_quat(rig.inverse()) * Mat4::from_translation(-eye);
    assert!(view.abs_diff_eq(expected, 1e-6));

    // Rotation only: distances from the eye are preserved
    let p = Vec3::new(0.5, -0.25, 0.0);
    let in_eye = view.transform_point3(p);
    assert!((in_eye.length() - (p - eye).length()).abs() < 1e-5);
}

#[test]
fn test_unnormalized_rig_orientation_is_normalized() {
    let plane = ProjectionPlane::from_transform(Vec3::ZERO, Quat::IDENTITY, Vec2::ONE).unwrap();
    let rig = Quat::from_rotation_x(0.2);
    let eye = Vec3::new(0.0, 0.0, 2.0);

    let a = compose_view(&plane, rig, eye);
    let b = compose_view(&plane, rig * 3.0, eye);
    assert!(a.abs_diff_eq(b, 1e-5));
}
