use std::io::Write;

use serde::{Serialize, de::DeserializeOwned};

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize>(output_path: &str, object: &T) {
    let j = serde_json::to_string_pretty(object).unwrap();
    let mut file = std::fs::File::create(output_path).unwrap();
    file.write_all(j.as_bytes()).unwrap();
}
/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned>(file_path: &str) -> T {
    let contents =
        std::fs::read_to_string(file_path).expect("Should have been able to read the file");
    serde_json::from_str(&contents).unwrap()
}

/// Per-session replay summary for the JSON report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionReport {
    pub session: String,
    pub frames: usize,
    pub engaged_frames: usize,
    pub clutch_pauses: usize,
    pub total_rotation_deg: f64,
    pub mean_delta_deg: f64,
    pub max_delta_deg: f32,
    pub final_position: [f32; 3],
    pub final_orientation: [f32; 4],
}

#[derive(serde::Serialize)]
struct ReplayReport {
    timestamp: String,
    sessions: Vec<SessionReport>,
    total_frames: usize,
}

/// Writes the full replay report as pretty JSON.
pub fn write_session_report(output_path: &str, sessions: &[SessionReport]) -> std::io::Result<()> {
    use std::time::SystemTime;

    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let total_frames = sessions.iter().map(|s| s.frames).sum();
    let report = ReplayReport {
        timestamp: timestamp.to_string(),
        sessions: sessions.to_vec(),
        total_frames,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// Writes a short human-readable summary next to the JSON report.
pub fn write_report(output_path: &str, sessions: &[SessionReport]) {
    let mut s = String::new();
    for report in sessions {
        s += format!("{}:\n", report.session).as_str();
        s += format!(
            "    frames: {} ({} engaged, {} clutch pauses)\n",
            report.frames, report.engaged_frames, report.clutch_pauses
        )
        .as_str();
        s += format!(
            "    rotation: {:.2} deg total, {:.4} deg mean step, {:.3} deg max step\n\n",
            report.total_rotation_deg, report.mean_delta_deg, report.max_delta_deg
        )
        .as_str();
    }
    let mut file = std::fs::File::create(output_path).unwrap();
    file.write_all(s.as_bytes()).unwrap();
}
