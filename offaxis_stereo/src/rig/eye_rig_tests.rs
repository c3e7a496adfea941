use glam::{Quat, Vec3};
use crate::config::StereoConfig;
use crate::error::Error;
use crate::rig::{Eye, RigTransform};
use super::*;

fn rig_with(use_toe_in: bool, ipd: f32) -> EyeRig {
    EyeRig::new(&StereoConfig { ipd, use_toe_in, ..StereoConfig::default() }).unwrap()
}

fn posed_rig() -> RigTransform {
    RigTransform::new(
        Vec3::new(1.0, 1.7, -0.5),
        Quat::from_rotation_y(0.8) * Quat::from_rotation_x(-0.2),
    )
}

/// Distance from `point` to the ray starting at `origin` along unit `direction`.
fn ray_distance(origin: Vec3, direction: Vec3, point: Vec3) -> f32 {
    (point - origin).cross(direction).length()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_clamps_config() {
    let rig = EyeRig::new(&StereoConfig {
        ipd: 0.5,
        convergence_distance: 100.0,
        ..StereoConfig::default()
    })
    .unwrap();

    assert_eq!(rig.ipd(), 0.2);
    assert_eq!(rig.convergence_distance(), 20.0);
    assert_eq!(rig.target_convergence_distance(), 20.0);
    assert_eq!(rig.orientation_mode(), OrientationMode::ToeIn);
}

#[test]
fn test_new_rejects_invalid_speed() {
    let result = EyeRig::new(&StereoConfig { convergence_adjust_speed: 0.0, ..StereoConfig::default() });
    assert!(matches!(result, Err(Error::Configuration(_))));
}

// ============================================================================
// Lateral placement
// ============================================================================

#[test]
fn test_parallel_scenario_local_positions() {
    let rig = rig_with(false, 0.064);
    let eyes = rig.solve(&RigTransform::IDENTITY);

    assert!(eyes.left.local_position.abs_diff_eq(Vec3::new(-0.032, 0.0, 0.0), 1e-7));
    assert!(eyes.right.local_position.abs_diff_eq(Vec3::new(0.032, 0.0, 0.0), 1e-7));
    assert_eq!(eyes.left.eye, Eye::Left);
    assert_eq!(eyes.right.eye, Eye::Right);
}

#[test]
fn test_offsets_symmetric_in_both_modes() {
    for use_toe_in in [false, true] {
        let rig = rig_with(use_toe_in, 0.07);
        let eyes = rig.solve(&posed_rig());

        assert_eq!(eyes.right.local_position.x, -eyes.left.local_position.x);
        assert!((eyes.right.local_position.x - 0.035).abs() < 1e-7);

        // World positions are symmetric about the rig origin
        let midpoint = (eyes.left.world_position + eyes.right.world_position) * 0.5;
        assert!(midpoint.abs_diff_eq(posed_rig().position, 1e-5));
        assert!(((eyes.right.world_position - eyes.left.world_position).length() - 0.07).abs() < 1e-5);
    }
}

#[test]
fn test_eyes_spread_along_rig_lateral_axis() {
    let rig = rig_with(false, 0.064);
    let pose = posed_rig();
    let eyes = rig.solve(&pose);

    let spread = (eyes.right.world_position - eyes.left.world_position).normalize();
    assert!(spread.abs_diff_eq(pose.right(), 1e-5));
}

// ============================================================================
// Orientation modes
// ============================================================================

#[test]
fn test_parallel_orientation_matches_rig() {
    let rig = rig_with(false, 0.064);
    let pose = posed_rig();
    let eyes = rig.solve(&pose);

    assert!(eyes.left.orientation.abs_diff_eq(pose.rotation, 1e-6));
    assert!(eyes.right.orientation.abs_diff_eq(pose.rotation, 1e-6));
    assert_eq!(eyes.left.orientation, eyes.right.orientation);
}

#[test]
fn test_toe_in_rays_meet_at_convergence_point() {
    let mut rig = rig_with(true, 0.064);
    rig.snap_convergence_distance(3.0);
    let pose = posed_rig();
    let eyes = rig.solve(&pose);

    let target = pose.position + pose.forward() * 3.0;
    assert!(rig.convergence_point(&pose).abs_diff_eq(target, 1e-5));

    for (_, state) in eyes.iter() {
        assert!(ray_distance(state.world_position, state.forward(), target) < 1e-4);
        // Looking ahead, not behind
        assert!(state.forward().dot(pose.forward()) > 0.99);
    }
}

#[test]
fn test_toe_in_eyes_turn_inward() {
    let rig = rig_with(true, 0.064);
    let eyes = rig.solve(&RigTransform::IDENTITY);

    // Left eye turns toward +X, right eye toward -X
    assert!(eyes.left.forward().x > 0.0);
    assert!(eyes.right.forward().x < 0.0);
    // Toe-in only yaws: no vertical disparity for a level rig
    assert!(eyes.left.forward().y.abs() < 1e-6);
    assert!(eyes.left.up().abs_diff_eq(Vec3::Y, 1e-6));
}

#[test]
fn test_toe_in_keeps_rig_up_when_pitched() {
    let rig = rig_with(true, 0.064);
    let pose = RigTransform::new(Vec3::ZERO, Quat::from_rotation_x(1.2));
    let eyes = rig.solve(&pose);

    for (_, state) in eyes.iter() {
        // Up stays in the plane spanned by the rig's up and forward axes (no roll)
        assert!(state.up().dot(pose.right()).abs() < 1e-3);
        assert!(state.up().dot(pose.up()) > 0.99);
    }
}

#[test]
fn test_look_at_singularity_does_not_flip() {
    let pose = RigTransform::IDENTITY;
    let up_target = look_at_orientation(Vec3::ZERO, Vec3::Y * 2.0, &pose);
    let down_target = look_at_orientation(Vec3::ZERO, -Vec3::Y * 2.0, &pose);

    for orientation in [up_target, down_target] {
        assert!(orientation.is_finite());
        assert!(orientation.is_normalized());
        // Right stays on the rig's lateral axis
        assert!((orientation * Vec3::X).abs_diff_eq(Vec3::X, 1e-5));
    }
    assert!((up_target * Vec3::NEG_Z).abs_diff_eq(Vec3::Y, 1e-5));
    assert!((down_target * Vec3::NEG_Z).abs_diff_eq(-Vec3::Y, 1e-5));
}

#[test]
fn test_look_at_coincident_target_keeps_rig_rotation() {
    let pose = posed_rig();
    let orientation = look_at_orientation(Vec3::ONE, Vec3::ONE, &pose);
    assert_eq!(orientation, pose.rotation);
}

#[test]
fn test_switching_mode() {
    let mut rig = rig_with(true, 0.064);
    rig.set_orientation_mode(OrientationMode::Parallel);
    assert_eq!(rig.orientation_mode(), OrientationMode::Parallel);

    let eyes = rig.solve(&RigTransform::IDENTITY);
    assert!(eyes.left.orientation.abs_diff_eq(Quat::IDENTITY, 1e-7));
}

// ============================================================================
// IPD
// ============================================================================

#[test]
fn test_set_ipd_clamps() {
    let mut rig = rig_with(false, 0.064);

    assert_eq!(rig.set_ipd(0.01), 0.04);
    assert_eq!(rig.set_ipd(0.5), 0.2);
    assert_eq!(rig.set_ipd(0.07), 0.07);
    assert_eq!(rig.set_ipd(f32::NAN), 0.07);
    assert_eq!(rig.ipd(), 0.07);
}

// ============================================================================
// Convergence adjustment
// ============================================================================

#[test]
fn test_update_is_rate_limited() {
    let mut rig = rig_with(true, 0.064);
    rig.snap_convergence_distance(5.0);
    rig.request_convergence_distance(15.0);

    let speed = rig.convergence_adjust_speed();
    let dt = 1.0 / 60.0;
    let mut previous = rig.convergence_distance();

    for _ in 0..2000 {
        rig.update(dt);
        let current = rig.convergence_distance();
        assert!((current - previous).abs() <= speed * dt + 1e-5);
        assert!(current >= previous);
        previous = current;
    }

    assert_eq!(rig.convergence_distance(), 15.0);
}

#[test]
fn test_update_moves_toward_closer_target() {
    let mut rig = rig_with(true, 0.064);
    rig.snap_convergence_distance(5.0);
    rig.request_convergence_distance(4.0);

    let step = rig.update(0.1);
    assert!((step + 0.3).abs() < 1e-6);
    assert!((rig.convergence_distance() - 4.7).abs() < 1e-5);

    // Large dt lands exactly on the target without overshooting
    rig.update(10.0);
    assert_eq!(rig.convergence_distance(), 4.0);
}

#[test]
fn test_update_ignores_bad_dt() {
    let mut rig = rig_with(true, 0.064);
    rig.snap_convergence_distance(5.0);
    rig.request_convergence_distance(10.0);

    assert_eq!(rig.update(-1.0), 0.0);
    assert_eq!(rig.update(f32::NAN), 0.0);
    assert_eq!(rig.convergence_distance(), 5.0);
}

#[test]
fn test_request_is_clamped() {
    let mut rig = rig_with(true, 0.064);

    rig.request_convergence_distance(0.0);
    assert_eq!(rig.target_convergence_distance(), 0.5);

    rig.request_convergence_distance(1000.0);
    assert_eq!(rig.target_convergence_distance(), 20.0);

    rig.request_convergence_distance(f32::INFINITY);
    assert_eq!(rig.target_convergence_distance(), 20.0);
}

#[test]
fn test_nudge_and_snap() {
    let mut rig = rig_with(true, 0.064);
    rig.snap_convergence_distance(5.0);

    rig.nudge_convergence_distance(1.5);
    assert_eq!(rig.target_convergence_distance(), 6.5);
    assert_eq!(rig.convergence_distance(), 5.0);

    rig.snap_convergence_distance(2.0);
    assert_eq!(rig.convergence_distance(), 2.0);
    assert_eq!(rig.target_convergence_distance(), 2.0);
}

#[test]
fn test_set_convergence_adjust_speed() {
    let mut rig = rig_with(true, 0.064);
    assert!(rig.set_convergence_adjust_speed(6.0).is_ok());
    assert_eq!(rig.convergence_adjust_speed(), 6.0);
    assert!(matches!(rig.set_convergence_adjust_speed(-2.0), Err(Error::Configuration(_))));
    assert_eq!(rig.convergence_adjust_speed(), 6.0);
}

#[test]
fn test_rig_transform_validity() {
    assert!(RigTransform::IDENTITY.is_valid());
    assert!(!RigTransform::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)).is_valid());
    assert!(RigTransform::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)).is_finite());
    assert!(!RigTransform::new(Vec3::new(f32::NAN, 0.0, 0.0), Quat::IDENTITY).is_valid());
}
