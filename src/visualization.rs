use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rerun::RecordingStream;

use crate::types::{FrameInput, FrameOutput};

pub fn id_to_color(id: usize) -> (u8, u8, u8, u8) {
    let mut rng = ChaCha8Rng::seed_from_u64(id as u64);
    let color_num = rng.random_range(0..2u32.pow(24));
    (
        ((color_num >> 16) % 256) as u8,
        ((color_num >> 8) % 256) as u8,
        (color_num % 256) as u8,
        255,
    )
}

/// Logs the fingertip points, the contact triangle outline and the object
/// pose for one frame.
pub fn log_frame(
    recording: &RecordingStream,
    topic: &str,
    input: &FrameInput,
    output: &FrameOutput,
) {
    let tips = [input.thumb, input.index, input.middle];
    let pts: Vec<_> = tips.iter().map(|p| (p.x, p.y, p.z)).collect();
    let colors: Vec<_> = (0..3).map(id_to_color).collect();
    recording
        .log(
            format!("{}/tips", topic),
            &rerun::Points3D::new(pts)
                .with_colors(colors)
                .with_radii([rerun::Radius::new_ui_points(5.0)]),
        )
        .unwrap();

    let outline = vec![
        [input.thumb.x, input.thumb.y, input.thumb.z],
        [input.index.x, input.index.y, input.index.z],
        [input.middle.x, input.middle.y, input.middle.z],
        [input.thumb.x, input.thumb.y, input.thumb.z],
    ];
    recording
        .log(
            format!("{}/triangle", topic),
            &rerun::LineStrips3D::new([outline]),
        )
        .unwrap();

    let o = output.object;
    let axes = [
        o.orientation * glam::Vec3::X * 0.05,
        o.orientation * glam::Vec3::Y * 0.05,
        o.orientation * glam::Vec3::Z * 0.05,
    ];
    recording
        .log(
            format!("{}/object", topic),
            &rerun::Arrows3D::from_vectors(axes.iter().map(|v| [v.x, v.y, v.z]))
                .with_origins([[o.position.x, o.position.y, o.position.z]; 3])
                .with_colors([
                    rerun::Color::from_rgb(230, 60, 60),
                    rerun::Color::from_rgb(60, 230, 60),
                    rerun::Color::from_rgb(60, 60, 230),
                ]),
        )
        .unwrap();
}
