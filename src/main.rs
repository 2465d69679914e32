use glam::{Quat, Vec3};
use std::time::Instant;
use trigrip::config::ControllerConfig;
use trigrip::controller::HandRotationController;
use trigrip::types::{FrameInput, HandFrame, ObjectPose};
use trigrip::visualization::log_frame;

/// Fingertips in the wrist frame: a small contact triangle twisting back and
/// forth about the view axis.
fn finger_positions(t: f32) -> (Vec3, Vec3, Vec3) {
    let spin = Quat::from_axis_angle(Vec3::Z, 0.8 * (0.7 * t).sin());
    let thumb = spin * Vec3::new(0.00, -0.01, 0.08);
    let index = spin * Vec3::new(0.03, 0.01, 0.09);
    let middle = spin * Vec3::new(0.01, 0.03, 0.09);
    (thumb, index, middle)
}

fn main() {
    env_logger::init();
    let mut controller = HandRotationController::new(ControllerConfig::default()).unwrap();
    controller.set_object_pose(ObjectPose {
        position: Vec3::new(0.0, 0.0, 0.12),
        orientation: Quat::IDENTITY,
    });
    let now = Instant::now();
    let recording = rerun::RecordingStreamBuilder::new("trigrip")
        .spawn()
        .unwrap();

    let hand = HandFrame::IDENTITY;
    let dt = 1.0 / 60.0;
    let num_frames = 600;
    for i in 0..num_frames {
        let t = i as f32 * dt;
        let (thumb, index, middle) = finger_positions(t);
        let input = FrameInput {
            dt,
            hand,
            thumb: hand.transform_point(thumb),
            index: hand.transform_point(index),
            middle: hand.transform_point(middle),
            grab_held: (60..540).contains(&i),
            bends: None,
        };
        let output = controller.update(&input);
        recording.set_time_nanos("stable", (t * 1e9) as i64);
        log_frame(&recording, "/hand0", &input, &output);
    }
    let duration_sec = now.elapsed().as_secs_f64();
    println!("simulating took {:.6} sec", duration_sec);
    println!("avg: {} sec", duration_sec / num_frames as f64);
}
