use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World-space pose of the wrist, supplied by the external perception layer
/// every frame. All tracked points are transformed into and out of this frame
/// by the controller; the frame itself is never mutated here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFrame {
    pub position: Vec3,
    pub orientation: Quat,
}

impl HandFrame {
    pub const IDENTITY: HandFrame = HandFrame {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.orientation * local + self.position
    }

    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.orientation.inverse() * (world - self.position)
    }
}

impl Default for HandFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World pose of the controlled object. Owned by the controller; mutated only
/// while the clutch is engaged and rotating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for ObjectPose {
    fn default() -> Self {
        ObjectPose {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Offsets captured at engage time: object position relative to the triangle
/// centroid (world) and object orientation relative to the hand frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrabOffset {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Joint positions of one finger, world space, used for curl-based pinch
/// detection. `base` is the proximal joint, `mid` the intermediate one.
#[derive(Debug, Clone, Copy)]
pub struct FingerBend {
    pub base: Vec3,
    pub mid: Vec3,
    pub tip: Vec3,
}

/// Per-frame input from the perception layer. Fingertip positions are world
/// space; the grab decision (contact with the object) is made externally.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub dt: f32,
    pub hand: HandFrame,
    pub thumb: Vec3,
    pub index: Vec3,
    pub middle: Vec3,
    pub grab_held: bool,
    /// Thumb, index, middle joint chains; only needed for the pinch clutch.
    pub bends: Option<[FingerBend; 3]>,
}

/// Transition notifications collected during one `update` call. The external
/// layer polls these from `FrameOutput` instead of subscribing to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Grabbed,
    Released,
    ClutchEngaged,
    ClutchDisengaged,
}

/// Telemetry scalars for the frame, for optional logging.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub gain: f32,
    pub area_cm2: f32,
    pub delta_angle_deg: f32,
    pub travel_cm: f32,
    pub dwell_s: f32,
}

#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub object: ObjectPose,
    pub clutch: crate::clutch::ClutchState,
    pub events: Vec<ControlEvent>,
    pub diagnostics: Diagnostics,
}
