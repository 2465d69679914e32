//! Frame-to-frame rotation delta, split into swing and shear.
//!
//! Swing is the reorientation of the triangle plane; shear is the in-plane
//! change of the interior angle at the thumb, applied about the triangle's
//! up axis. Both triangles must be accepted references.

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::triangle::ContactTriangle;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeltaSettings {
    /// Include the shear term. Off means the shear rotation is identity.
    pub shear_enabled: bool,
    /// Single-frame deltas above this are tracking glitches; drop them.
    pub reject_above_deg: f32,
    /// Ceiling on the per-frame delta magnitude before scaling.
    pub max_step_deg: f32,
}

impl Default for DeltaSettings {
    fn default() -> Self {
        Self {
            shear_enabled: true,
            reject_above_deg: 30.0,
            max_step_deg: 5.0,
        }
    }
}

/// Combined per-frame delta in angle-axis form. `rotation` is the un-clamped
/// combined quaternion; `angle_deg` and `axis` are the gated values the
/// integrator applies.
#[derive(Debug, Clone, Copy)]
pub struct RotationDelta {
    pub rotation: Quat,
    pub angle_deg: f32,
    pub axis: Vec3,
}

impl RotationDelta {
    pub fn zero() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            angle_deg: 0.0,
            axis: Vec3::Y,
        }
    }
}

/// Angle-axis with the angle normalized to [0, 180] degrees. An identity
/// rotation reports exactly zero with a placeholder axis.
pub fn to_axis_angle_deg(q: Quat) -> (Vec3, f32) {
    let v = Vec3::new(q.x, q.y, q.z);
    let len = v.length();
    if len < 1e-9 {
        return (Vec3::Y, 0.0);
    }
    let mut angle_deg = (2.0 * len.atan2(q.w)).to_degrees();
    let mut axis = v / len;
    if angle_deg > 180.0 {
        angle_deg = 360.0 - angle_deg;
        axis = -axis;
    }
    (axis, angle_deg)
}

/// Decompose the motion between two accepted triangles and gate the result.
/// Deltas above the rejection threshold come back as zero; surviving deltas
/// are clamped to the per-frame ceiling.
pub fn compute_delta(
    prev: &ContactTriangle,
    curr: &ContactTriangle,
    settings: &DeltaSettings,
) -> RotationDelta {
    let swing = curr.orientation * prev.orientation.inverse();
    let shear = if settings.shear_enabled {
        let up = curr.orientation * Vec3::Y;
        Quat::from_axis_angle(up, (curr.angle_deg - prev.angle_deg).to_radians())
    } else {
        Quat::IDENTITY
    };
    let combined = shear * swing;

    let (axis, angle_deg) = to_axis_angle_deg(combined);
    if angle_deg > settings.reject_above_deg {
        debug!("rejecting glitch delta of {:.2} deg", angle_deg);
        return RotationDelta::zero();
    }
    RotationDelta {
        rotation: combined,
        angle_deg: angle_deg.min(settings.max_step_deg),
        axis,
    }
}
