use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};
use nalgebra as na;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use trigrip::session::{RecordedFrame, RecordedSession};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic tracking sessions
    Generate {
        /// Output directory
        #[arg(short, long)]
        output: String,

        /// Number of sessions to generate
        #[arg(short, long, default_value = "3")]
        num_sessions: usize,

        /// Frames per session
        #[arg(short = 'f', long, default_value = "600")]
        num_frames: usize,

        /// Frame rate in Hz
        #[arg(long, default_value = "60.0")]
        fps: f32,

        /// Uniform positional noise amplitude in meters
        #[arg(long, default_value = "0.0005")]
        noise: f32,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            output,
            num_sessions,
            num_frames,
            fps,
            noise,
            seed,
        } => {
            generate_sessions(&output, num_sessions, num_frames, fps, noise, seed)?;
        }
    }

    Ok(())
}

fn na_to_quat(q: &na::UnitQuaternion<f32>) -> Quat {
    let c = q.into_inner().coords;
    Quat::from_xyzw(c[0], c[1], c[2], c[3])
}

fn generate_sessions(
    output_dir: &str,
    num_sessions: usize,
    num_frames: usize,
    fps: f32,
    noise: f32,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::fs;

    fs::create_dir_all(output_dir)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for session_idx in 0..num_sessions {
        // Each session gets its own twist axis and speeds.
        let twist_axis =
            na::Unit::new_normalize(na::Vector3::new(
                rng.random_range(-1.0f32..1.0),
                rng.random_range(-1.0f32..1.0),
                rng.random_range(0.2f32..1.0),
            ));
        let twist_rate = rng.random_range(0.4f32..1.2);
        let wobble_rate = rng.random_range(0.1f32..0.4);

        let mut frames = Vec::with_capacity(num_frames);
        for i in 0..num_frames {
            let t = i as f32 / fps;

            // Wrist wanders slowly; the orientation wobbles about a fixed axis.
            let wrist_pos = Vec3::new(
                0.05 * (wobble_rate * t).sin(),
                0.02 * (wobble_rate * t).cos(),
                0.0,
            );
            let wrist_rot = na::UnitQuaternion::from_scaled_axis(
                na::Vector3::new(0.0, 0.25 * (wobble_rate * t).sin(), 0.0),
            );

            // Fingertips twist about the session axis in the wrist frame.
            let twist = na::UnitQuaternion::from_axis_angle(
                &twist_axis,
                0.8 * (twist_rate * t).sin(),
            );
            let spin = na_to_quat(&twist);
            let wrist_quat = na_to_quat(&wrist_rot);

            let mut tips = [
                spin * Vec3::new(0.00, -0.01, 0.08),
                spin * Vec3::new(0.03, 0.01, 0.09),
                spin * Vec3::new(0.01, 0.03, 0.09),
            ];
            for tip in &mut tips {
                *tip = wrist_quat * *tip + wrist_pos;
                if noise > 0.0 {
                    *tip += Vec3::new(
                        rng.random_range(-noise..noise),
                        rng.random_range(-noise..noise),
                        rng.random_range(-noise..noise),
                    );
                }
            }

            frames.push(RecordedFrame {
                time_ns: (t as f64 * 1e9) as i64,
                wrist_position: wrist_pos.to_array(),
                wrist_orientation: wrist_quat.to_array(),
                thumb: tips[0].to_array(),
                index: tips[1].to_array(),
                middle: tips[2].to_array(),
                grab_held: i >= num_frames / 10 && i < num_frames * 9 / 10,
            });
        }

        let session = RecordedSession {
            name: format!("session_{:03}", session_idx),
            frames,
        };
        let filename = format!("session_{:03}.json", session_idx);
        fs::write(
            Path::new(output_dir).join(filename),
            serde_json::to_string_pretty(&session)?,
        )?;
    }

    println!("Generated {} sessions in {}", num_sessions, output_dir);
    Ok(())
}
