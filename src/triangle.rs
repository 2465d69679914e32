//! Contact triangle estimation from the three tracked fingertip points.
//!
//! The triangle is a rigid proxy for hand pose: its orientation gives the
//! plane (swing) reference, the interior angle at the thumb gives the in-plane
//! (shear) reference, and the area feeds the area-based gain estimator.
//! `estimate` is a pure function; retaining the previous accepted triangle on
//! a degenerate frame is the caller's job.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Degeneracy thresholds. Side lengths are in meters (squared), the area in
/// square centimeters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriangleThresholds {
    pub min_side_sq: f32,
    pub parallel_dot: f32,
    pub min_area_cm2: f32,
}

impl Default for TriangleThresholds {
    fn default() -> Self {
        Self {
            min_side_sq: 1e-5,
            parallel_dot: 0.999,
            min_area_cm2: 0.001,
        }
    }
}

/// A fully valid triangle, accepted as the reference for delta computation.
#[derive(Debug, Clone, Copy)]
pub struct ContactTriangle {
    /// Weighted centroid, same space as the input points.
    pub centroid: Vec3,
    /// Forward axis points thumb -> index, up axis is the triangle normal.
    pub orientation: Quat,
    /// Interior angle at the thumb vertex, degrees.
    pub angle_deg: f32,
    /// Planar area in cm^2.
    pub area_cm2: f32,
}

/// Raw per-frame measurement; any part can be individually degenerate.
#[derive(Debug, Clone, Copy)]
pub struct TriangleMeasurement {
    pub centroid: Vec3,
    pub orientation: Option<Quat>,
    pub angle_deg: Option<f32>,
    pub area_cm2: Option<f32>,
}

impl TriangleMeasurement {
    /// All three of angle, orientation and area must be valid for the frame
    /// to be accepted as a new reference.
    pub fn accepted(&self) -> Option<ContactTriangle> {
        match (self.orientation, self.angle_deg, self.area_cm2) {
            (Some(orientation), Some(angle_deg), Some(area_cm2)) => Some(ContactTriangle {
                centroid: self.centroid,
                orientation,
                angle_deg,
                area_cm2,
            }),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.orientation.is_some() && self.angle_deg.is_some() && self.area_cm2.is_some()
    }
}

/// Interior angle at `vertex` between the edges toward `a` and `b`, degrees.
/// `None` if either edge is shorter than the side threshold.
pub fn vertex_angle_deg(vertex: Vec3, a: Vec3, b: Vec3, min_side_sq: f32) -> Option<f32> {
    let va = a - vertex;
    let vb = b - vertex;
    if va.length_squared() < min_side_sq || vb.length_squared() < min_side_sq {
        return None;
    }
    Some(va.angle_between(vb).to_degrees())
}

/// Angle-inverse weighted centroid: vertices with a sharper local angle get
/// more influence. Falls back to the arithmetic mean when any vertex angle is
/// degenerate.
pub fn weighted_centroid(thumb: Vec3, index: Vec3, middle: Vec3, min_side_sq: f32) -> Vec3 {
    let wt = vertex_angle_deg(thumb, index, middle, min_side_sq);
    let wi = vertex_angle_deg(index, middle, thumb, min_side_sq);
    let wm = vertex_angle_deg(middle, thumb, index, min_side_sq);
    match (wt, wi, wm) {
        (Some(wt), Some(wi), Some(wm)) if wt > 0.0 && wi > 0.0 && wm > 0.0 => {
            (thumb / wt + index / wi + middle / wm) / (1.0 / wt + 1.0 / wi + 1.0 / wm)
        }
        _ => (thumb + index + middle) / 3.0,
    }
}

/// Rotation whose +Z axis is `forward` and whose +Y axis is `up`
/// (orthogonalized against forward). Both inputs must be non-zero.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

fn triangle_orientation(
    thumb: Vec3,
    index: Vec3,
    middle: Vec3,
    thresholds: &TriangleThresholds,
) -> Option<Quat> {
    let to_index = index - thumb;
    let to_middle = middle - thumb;
    if to_index.length_squared() < thresholds.min_side_sq
        || to_middle.length_squared() < thresholds.min_side_sq
    {
        return None;
    }
    let forward = to_index.normalize();
    let rough_up = to_middle.normalize();
    if forward.dot(rough_up).abs() > thresholds.parallel_dot {
        return None;
    }
    let normal = forward.cross(rough_up);
    if normal.length_squared() < thresholds.min_side_sq {
        return None;
    }
    Some(look_rotation(forward, normal.normalize()))
}

fn triangle_area_cm2(
    thumb: Vec3,
    index: Vec3,
    middle: Vec3,
    thresholds: &TriangleThresholds,
) -> Option<f32> {
    // side vectors in centimeters before thresholding
    let ab = (index - thumb) * 100.0;
    let ac = (middle - thumb) * 100.0;
    let bc = (middle - index) * 100.0;
    let min_side_cm_sq = thresholds.min_side_sq * 1e4;
    if ab.length_squared() < min_side_cm_sq
        || ac.length_squared() < min_side_cm_sq
        || bc.length_squared() < min_side_cm_sq
    {
        return None;
    }

    let area = ab.cross(ac).length() / 2.0;
    if area < thresholds.min_area_cm2 {
        return None;
    }
    Some(area)
}

/// Estimate the contact triangle from the three points. Pure: identical
/// inputs always produce identical outputs.
pub fn estimate(
    thumb: Vec3,
    index: Vec3,
    middle: Vec3,
    thresholds: &TriangleThresholds,
) -> TriangleMeasurement {
    TriangleMeasurement {
        centroid: weighted_centroid(thumb, index, middle, thresholds.min_side_sq),
        orientation: triangle_orientation(thumb, index, middle, thresholds),
        angle_deg: vertex_angle_deg(thumb, index, middle, thresholds.min_side_sq),
        area_cm2: triangle_area_cm2(thumb, index, middle, thresholds),
    }
}

/// Finger curl at the intermediate joint: 0 for a straight finger, growing as
/// the finger bends. Degenerate segments report no curl.
pub fn curl_angle_deg(base: Vec3, mid: Vec3, tip: Vec3) -> f32 {
    let proximal = mid - base;
    let distal = tip - mid;
    if proximal.length_squared() < 1e-10 || distal.length_squared() < 1e-10 {
        return 0.0;
    }
    proximal.angle_between(distal).to_degrees()
}
