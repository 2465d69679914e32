use clap::Parser;
use std::time::Instant;
use trigrip::config::ControllerConfig;
use trigrip::controller::HandRotationController;
use trigrip::data_loader::load_sessions;
use trigrip::io::{SessionReport, object_from_json, write_report, write_session_report};
use trigrip::types::ControlEvent;
use trigrip::visualization::log_frame;

#[derive(Parser)]
#[command(version, about, author)]
struct TgrpCli {
    /// path to a folder of recorded session json files
    path: String,

    /// controller config json; defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// save a rerun recording of the replay
    #[arg(long)]
    rrd: Option<String>,

    /// json report output path
    #[arg(short, long, default_value = "replay_report.json")]
    output: String,
}

fn main() {
    env_logger::init();
    let cli = TgrpCli::parse();
    let config: ControllerConfig = cli
        .config
        .as_deref()
        .map(object_from_json)
        .unwrap_or_default();
    config.validate().expect("invalid controller config");

    let recording = cli.rrd.as_deref().map(|path| {
        rerun::RecordingStreamBuilder::new("trigrip-replay")
            .save(path)
            .unwrap()
    });

    let now = Instant::now();
    let sessions = load_sessions(&cli.path).expect("failed to load sessions");
    println!("loaded {} sessions in {:.3} sec", sessions.len(), now.elapsed().as_secs_f64());

    let mut reports = Vec::new();
    for session in &sessions {
        let mut controller = HandRotationController::new(config.clone()).unwrap();
        let mut engaged_frames = 0usize;
        let mut clutch_pauses = 0usize;
        let mut total_rotation_deg = 0f64;
        let mut max_delta_deg = 0f32;
        let mut last_output = None;

        for (frame, input) in session.frames.iter().zip(session.inputs()) {
            let output = controller.update(&input);
            if output.clutch.is_engaged() {
                engaged_frames += 1;
            }
            clutch_pauses += output
                .events
                .iter()
                .filter(|e| **e == ControlEvent::ClutchEngaged)
                .count();
            total_rotation_deg += output.diagnostics.delta_angle_deg as f64;
            max_delta_deg = max_delta_deg.max(output.diagnostics.delta_angle_deg);
            if let Some(recording) = &recording {
                recording.set_time_nanos("stable", frame.time_ns);
                log_frame(recording, &format!("/{}", session.name), &input, &output);
            }
            last_output = Some(output);
        }

        let frames = session.frames.len();
        let final_pose = last_output
            .map(|o| o.object)
            .unwrap_or_default();
        reports.push(SessionReport {
            session: session.name.clone(),
            frames,
            engaged_frames,
            clutch_pauses,
            total_rotation_deg,
            mean_delta_deg: if frames > 0 {
                total_rotation_deg / frames as f64
            } else {
                0.0
            },
            max_delta_deg,
            final_position: final_pose.position.to_array(),
            final_orientation: final_pose.orientation.to_array(),
        });
    }

    write_session_report(&cli.output, &reports).expect("failed to write report");
    write_report(&format!("{}.txt", cli.output.trim_end_matches(".json")), &reports);
    println!("replay took {:.6} sec", now.elapsed().as_secs_f64());
}
