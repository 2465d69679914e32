use glam::{Quat, Vec3};
use trigrip::config::{ConfigError, ControllerConfig};
use trigrip::controller::HandRotationController;
use trigrip::data_loader::load_sessions;
use trigrip::mapping::{DeltaSettings, compute_delta, to_axis_angle_deg};
use trigrip::session::{RecordedFrame, RecordedSession};
use trigrip::triangle::{self, TriangleThresholds};
use trigrip::types::{FrameInput, HandFrame, ObjectPose};

const DT: f32 = 1.0 / 60.0;

fn tips() -> [Vec3; 3] {
    [
        Vec3::new(0.00, -0.01, 0.08),
        Vec3::new(0.03, 0.01, 0.09),
        Vec3::new(0.01, 0.03, 0.09),
    ]
}

fn input(rot: Quat, grab: bool, dt: f32) -> FrameInput {
    let t = tips();
    FrameInput {
        dt,
        hand: HandFrame::IDENTITY,
        thumb: rot * t[0],
        index: rot * t[1],
        middle: rot * t[2],
        grab_held: grab,
        bends: None,
    }
}

fn accepted(rot: Quat) -> triangle::ContactTriangle {
    let t = tips();
    triangle::estimate(rot * t[0], rot * t[1], rot * t[2], &TriangleThresholds::default())
        .accepted()
        .unwrap()
}

#[test]
fn test_zero_dt_frame_is_harmless() {
    let mut controller = HandRotationController::new(ControllerConfig::default()).unwrap();
    controller.set_object_pose(ObjectPose::default());

    controller.update(&input(Quat::IDENTITY, true, DT));
    let before = controller.object_pose();
    let out = controller.update(&input(Quat::IDENTITY, true, 0.0));
    assert!(out.object.position.is_finite());
    assert_eq!(out.object.position, before.position);
}

#[test]
fn test_glitch_delta_is_rejected() {
    let settings = DeltaSettings::default();
    let prev = accepted(Quat::IDENTITY);
    let curr = accepted(Quat::from_axis_angle(Vec3::Z, 40f32.to_radians()));

    let delta = compute_delta(&prev, &curr, &settings);
    assert_eq!(delta.angle_deg, 0.0);
}

#[test]
fn test_delta_is_clamped_to_max_step() {
    let settings = DeltaSettings::default();
    let prev = accepted(Quat::IDENTITY);
    let curr = accepted(Quat::from_axis_angle(Vec3::Z, 10f32.to_radians()));

    let delta = compute_delta(&prev, &curr, &settings);
    assert!((delta.angle_deg - settings.max_step_deg).abs() < 1e-3);
}

#[test]
fn test_shear_disabled_yields_swing_only() {
    // same plane, different interior angle: nudge the middle tip sideways
    let t = tips();
    let prev = accepted(Quat::IDENTITY);
    let curr = triangle::estimate(
        t[0],
        t[1],
        t[2] + Vec3::new(-0.005, 0.002, 0.0),
        &TriangleThresholds::default(),
    )
    .accepted()
    .unwrap();

    let no_shear = DeltaSettings {
        shear_enabled: false,
        ..DeltaSettings::default()
    };
    let without = compute_delta(&prev, &curr, &no_shear);
    // swing only: the delta is exactly the plane reorientation
    let swing = curr.orientation * prev.orientation.inverse();
    let (_, swing_deg) = to_axis_angle_deg(swing);
    assert!((without.angle_deg - swing_deg.min(no_shear.max_step_deg)).abs() < 1e-3);
}

#[test]
fn test_axis_angle_normalization() {
    let q = Quat::from_axis_angle(Vec3::Y, 350f32.to_radians());
    let (axis, angle) = to_axis_angle_deg(q);
    assert!(angle <= 180.0);
    assert!((angle - 10.0).abs() < 1e-2);
    assert!((axis + Vec3::Y).length() < 1e-3);
}

#[test]
fn test_static_delta_is_zero() {
    let prev = accepted(Quat::IDENTITY);
    let delta = compute_delta(&prev, &prev, &DeltaSettings::default());
    assert!(delta.angle_deg < 1e-4);
}

#[test]
fn test_config_validation_failures() {
    let mut config = ControllerConfig::default();
    config.triangle.min_area_cm2 = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::NonPositive(_))));

    let mut config = ControllerConfig::default();
    config.triangle.parallel_dot = 1.5;
    assert!(matches!(config.validate(), Err(ConfigError::EmptyRange(_))));

    let mut config = ControllerConfig::default();
    config.delta.max_step_deg = 50.0; // above the rejection threshold
    assert!(config.validate().is_err());

    let mut config = ControllerConfig::default();
    config.filter.min_cutoff = f32::INFINITY;
    assert!(matches!(config.validate(), Err(ConfigError::NonFinite(_))));

    assert!(ControllerConfig::default().validate().is_ok());
}

#[test]
fn test_config_json_round_trip() {
    let config = ControllerConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: ControllerConfig = serde_json::from_str(&json).unwrap();
    assert!(back.validate().is_ok());
    assert_eq!(back.gain, config.gain);
    assert_eq!(back.clutch, config.clutch);
}

#[test]
fn test_data_loader_missing_directory() {
    let result = load_sessions("non_existent_path");
    assert!(result.is_err());
}

#[test]
fn test_session_input_timing() {
    let frame = |time_ns: i64| RecordedFrame {
        time_ns,
        wrist_position: [0.0; 3],
        wrist_orientation: [0.0, 0.0, 0.0, 1.0],
        thumb: [0.0, -0.01, 0.08],
        index: [0.03, 0.01, 0.09],
        middle: [0.01, 0.03, 0.09],
        grab_held: false,
    };
    let session = RecordedSession {
        name: "t".to_string(),
        frames: vec![frame(0), frame(16_666_667), frame(33_333_333)],
    };

    let inputs = session.inputs();
    assert_eq!(inputs[0].dt, 0.0);
    assert!((inputs[1].dt - 1.0 / 60.0).abs() < 1e-4);
    assert!((inputs[2].dt - 1.0 / 60.0).abs() < 1e-4);
    assert_eq!(inputs[1].hand.orientation, Quat::IDENTITY);
}
