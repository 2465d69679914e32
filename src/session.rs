use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{FrameInput, HandFrame};

/// One recorded perception frame. Positions are world-space meters; the
/// orientation is stored xyzw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub time_ns: i64,
    pub wrist_position: [f32; 3],
    pub wrist_orientation: [f32; 4],
    pub thumb: [f32; 3],
    pub index: [f32; 3],
    pub middle: [f32; 3],
    pub grab_held: bool,
}

impl RecordedFrame {
    pub fn hand_frame(&self) -> HandFrame {
        HandFrame {
            position: Vec3::from_array(self.wrist_position),
            orientation: Quat::from_array(self.wrist_orientation),
        }
    }

    pub fn to_input(&self, dt: f32) -> FrameInput {
        FrameInput {
            dt,
            hand: self.hand_frame(),
            thumb: Vec3::from_array(self.thumb),
            index: Vec3::from_array(self.index),
            middle: Vec3::from_array(self.middle),
            grab_held: self.grab_held,
            bends: None,
        }
    }
}

/// A recorded tracking session, one JSON file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    pub name: String,
    pub frames: Vec<RecordedFrame>,
}

impl RecordedSession {
    /// Frame inputs with `dt` derived from consecutive timestamps. The first
    /// frame gets `dt = 0`, which the filters treat as "no prior state".
    pub fn inputs(&self) -> Vec<FrameInput> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let dt = if i == 0 {
                    0.0
                } else {
                    (f.time_ns - self.frames[i - 1].time_ns) as f32 / 1e9
                };
                f.to_input(dt)
            })
            .collect()
    }
}
