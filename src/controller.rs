//! Per-hand rotation controller.
//!
//! One value owns every piece of mutable state: filters, clutch, grab
//! offsets, the accumulated rotation and the published object pose. The
//! external layer calls `update` once per frame and polls the returned
//! events; nothing here is static or callback-driven.
//!
//! Angular math runs on points expressed in the wrist frame; the centroid
//! used for object placement is computed from the world-space points, the
//! same split the object follows when the hand translates.

use glam::{Quat, Vec3};
use log::{debug, trace};

use crate::clutch::{Clutch, ClutchProbe, ClutchState, ClutchTransition};
use crate::config::{ConfigError, ControllerConfig};
use crate::filter::{OrientationFilter, PointFilter};
use crate::mapping::{GainSource, RotationDelta, compute_delta, smooth_gain};
use crate::triangle::{self, ContactTriangle};
use crate::types::{
    ControlEvent, Diagnostics, FrameInput, FrameOutput, GrabOffset, ObjectPose,
};

pub struct HandRotationController {
    config: ControllerConfig,
    point_filters: [PointFilter; 3],
    orientation_filter: OrientationFilter,
    clutch: Clutch,

    /// Last fully valid triangle, wrist-frame. Retained unchanged across
    /// degenerate frames.
    last_accepted: Option<ContactTriangle>,
    grab_offset: GrabOffset,
    /// True once references have been captured for the current engage.
    anchored: bool,
    /// Accumulated rotation in the wrist frame since the last anchor.
    object_rotation: Quat,
    object_pose: ObjectPose,
    smoothed_gain: f32,
    prev_tips_local: Option<[Vec3; 3]>,
}

impl HandRotationController {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let f = &config.filter;
        let point = PointFilter::new(f.min_cutoff, f.beta, f.derivative_cutoff);
        let orientation = OrientationFilter::new(f.min_cutoff, f.beta, f.derivative_cutoff);
        let clutch = Clutch::new(config.clutch);
        let smoothed_gain = initial_gain(&config.gain);
        Ok(Self {
            config,
            point_filters: [point.clone(), point.clone(), point],
            orientation_filter: orientation,
            clutch,
            last_accepted: None,
            grab_offset: GrabOffset::default(),
            anchored: false,
            object_rotation: Quat::IDENTITY,
            object_pose: ObjectPose::default(),
            smoothed_gain,
            prev_tips_local: None,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn clutch_state(&self) -> ClutchState {
        self.clutch.state()
    }

    pub fn object_pose(&self) -> ObjectPose {
        self.object_pose
    }

    /// Place the controlled object. Meant for initial scene setup while
    /// disengaged; while engaged the integrator owns the pose.
    pub fn set_object_pose(&mut self, pose: ObjectPose) {
        self.object_pose = pose;
    }

    pub fn update(&mut self, input: &FrameInput) -> FrameOutput {
        let mut events = Vec::new();
        let dt = input.dt;

        // Tracked points into the wrist frame, then through the filters.
        let raw_local = [
            input.hand.inverse_transform_point(input.thumb),
            input.hand.inverse_transform_point(input.index),
            input.hand.inverse_transform_point(input.middle),
        ];
        let local = if self.config.filter.enabled {
            [
                self.point_filters[0].filter(raw_local[0], dt),
                self.point_filters[1].filter(raw_local[1], dt),
                self.point_filters[2].filter(raw_local[2], dt),
            ]
        } else {
            raw_local
        };
        let world = [
            input.hand.transform_point(local[0]),
            input.hand.transform_point(local[1]),
            input.hand.transform_point(local[2]),
        ];

        // Per-frame fingertip travel in centimeters.
        let travel_cm = match self.prev_tips_local {
            Some(prev) => {
                (local[0] - prev[0]).length() * 100.0
                    + (local[1] - prev[1]).length() * 100.0
                    + (local[2] - prev[2]).length() * 100.0
            }
            None => 0.0,
        };
        self.prev_tips_local = Some(local);

        let mut measurement =
            triangle::estimate(local[0], local[1], local[2], &self.config.triangle);
        if self.config.filter.filter_orientation {
            if let Some(orientation) = measurement.orientation {
                measurement.orientation = Some(self.orientation_filter.filter(orientation, dt));
            }
        }
        let accepted = measurement.accepted();
        let centroid_world =
            triangle::weighted_centroid(world[0], world[1], world[2], self.config.triangle.min_side_sq);

        // Externally signaled grab and release edges.
        if input.grab_held && !self.clutch.state().is_engaged() {
            self.clutch.engage();
            self.reset_tracking();
            self.anchor(centroid_world, input.hand.orientation);
            if let Some(t) = accepted {
                self.last_accepted = Some(t);
            }
            debug!("grab engaged");
            events.push(ControlEvent::Grabbed);
        } else if !input.grab_held && self.clutch.state().is_engaged() {
            self.clutch.disengage();
            self.reset_tracking();
            self.grab_offset = GrabOffset::default();
            self.anchored = false;
            debug!("grab released");
            events.push(ControlEvent::Released);
        }

        // Delta against the last accepted reference. Degenerate frames while
        // engaged skip integration; they never reset state.
        let delta = match (self.last_accepted, accepted) {
            (Some(prev), Some(curr))
                if self.clutch.state().is_engaged() && self.anchored =>
            {
                compute_delta(&prev, &curr, &self.config.delta)
            }
            _ => RotationDelta::zero(),
        };

        let probe = ClutchProbe {
            delta_angle_deg: delta.angle_deg,
            min_tip_distance: min_pair_distance(&local),
            max_curl_deg: input.bends.map(|bends| {
                bends
                    .iter()
                    .map(|b| triangle::curl_angle_deg(b.base, b.mid, b.tip))
                    .fold(0.0, f32::max)
            }),
        };
        if let Some(transition) = self.clutch.update(&probe, dt) {
            // Re-anchor on both edges so neither holding still nor moving the
            // hand while paused produces a jump.
            self.anchor(centroid_world, input.hand.orientation);
            if let Some(t) = accepted {
                self.last_accepted = Some(t);
            }
            events.push(match transition {
                ClutchTransition::Paused => ControlEvent::ClutchEngaged,
                ClutchTransition::Resumed => ControlEvent::ClutchDisengaged,
            });
        }

        let area_cm2 = accepted
            .map(|t| t.area_cm2)
            .or(self.last_accepted.map(|t| t.area_cm2))
            .unwrap_or(0.0);

        if self.clutch.state().is_engaged() {
            let target = match self.config.gain {
                GainSource::Fixed { gain } => gain,
                GainSource::Area { map } => map.evaluate(area_cm2),
                GainSource::Travel { map } => map.evaluate(travel_cm),
            };
            self.smoothed_gain = smooth_gain(
                self.smoothed_gain,
                target,
                self.config.gain_smoothing_per_s,
                dt,
            );
        }

        if self.clutch.state().is_rotating() && self.anchored {
            if delta.angle_deg > 0.0 {
                let scaled_deg = match &self.config.curve {
                    Some(curve) => self.smoothed_gain * curve.scale(delta.angle_deg),
                    None => self.smoothed_gain * delta.angle_deg,
                };
                let step = Quat::from_axis_angle(delta.axis, scaled_deg.to_radians());
                self.object_rotation = step * self.object_rotation;
                trace!(
                    "delta {:.3} deg -> {:.3} deg about {:?}",
                    delta.angle_deg, scaled_deg, delta.axis
                );
            }

            let orientation =
                input.hand.orientation * self.object_rotation * self.grab_offset.rotation;
            let position = if self.config.orbit_grab_offset {
                input.hand.orientation
                    * self.object_rotation
                    * input.hand.orientation.inverse()
                    * self.grab_offset.position
                    + centroid_world
            } else {
                self.grab_offset.position + centroid_world
            };
            self.object_pose = ObjectPose {
                position,
                orientation,
            };
        }
        // Disengaged or paused: the pose holds its last computed value.

        if let Some(t) = accepted {
            self.last_accepted = Some(t);
        }

        FrameOutput {
            object: self.object_pose,
            clutch: self.clutch.state(),
            events,
            diagnostics: Diagnostics {
                gain: self.smoothed_gain,
                area_cm2,
                delta_angle_deg: delta.angle_deg,
                travel_cm,
                dwell_s: self.clutch.dwell_s(),
            },
        }
    }

    /// Capture grab references against the current pose so integration
    /// continues (or restarts) without a jump.
    fn anchor(&mut self, centroid_world: Vec3, hand_orientation: Quat) {
        self.grab_offset = GrabOffset {
            position: self.object_pose.position - centroid_world,
            rotation: hand_orientation.inverse() * self.object_pose.orientation,
        };
        self.object_rotation = Quat::IDENTITY;
        self.anchored = true;
    }

    fn reset_tracking(&mut self) {
        for f in &mut self.point_filters {
            f.reset();
        }
        self.orientation_filter.reset();
        self.prev_tips_local = None;
        self.smoothed_gain = initial_gain(&self.config.gain);
    }
}

fn initial_gain(source: &GainSource) -> f32 {
    match source {
        GainSource::Fixed { gain } => *gain,
        GainSource::Area { map } | GainSource::Travel { map } => map.gain_min,
    }
}

fn min_pair_distance(tips: &[Vec3; 3]) -> f32 {
    let ti = tips[0].distance(tips[1]);
    let tm = tips[0].distance(tips[2]);
    let im = tips[1].distance(tips[2]);
    ti.min(tm).min(im)
}
