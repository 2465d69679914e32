//! Clutch state machine.
//!
//! Grab and release arrive as external signals. While engaged, a secondary
//! clutch toggles between rotating and paused so the user can re-grip without
//! moving the object. The pause trigger is either pinch geometry or a
//! motion-dwell timer, chosen at configuration time, never both.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClutchState {
    Disengaged,
    Engaged { paused: bool },
}

impl ClutchState {
    pub fn is_engaged(&self) -> bool {
        matches!(self, ClutchState::Engaged { .. })
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, ClutchState::Engaged { paused: false })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClutchMode {
    /// Pause while any finger curl exceeds the threshold or the closest pair
    /// of fingertips falls below the minimum distance (meters).
    Pinch {
        max_curl_deg: f32,
        min_tip_distance: f32,
    },
    /// Pause once the combined delta stays below the rotation threshold for
    /// longer than the dwell time.
    Dwell {
        rotation_threshold_deg: f32,
        dwell_time_s: f32,
    },
}

impl ClutchMode {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ClutchMode::Pinch {
                max_curl_deg,
                min_tip_distance,
            } => {
                if !max_curl_deg.is_finite() || !min_tip_distance.is_finite() {
                    return Err(ConfigError::NonFinite("pinch clutch thresholds"));
                }
                if max_curl_deg <= 0.0 || min_tip_distance <= 0.0 {
                    return Err(ConfigError::NonPositive("pinch clutch thresholds"));
                }
            }
            ClutchMode::Dwell {
                rotation_threshold_deg,
                dwell_time_s,
            } => {
                if !rotation_threshold_deg.is_finite() || !dwell_time_s.is_finite() {
                    return Err(ConfigError::NonFinite("dwell clutch thresholds"));
                }
                if rotation_threshold_deg <= 0.0 || dwell_time_s <= 0.0 {
                    return Err(ConfigError::NonPositive("dwell clutch thresholds"));
                }
            }
        }
        Ok(())
    }
}

impl Default for ClutchMode {
    fn default() -> Self {
        ClutchMode::Dwell {
            rotation_threshold_deg: 0.25,
            dwell_time_s: 0.2,
        }
    }
}

/// Per-frame observations the pause decision is made from.
#[derive(Debug, Clone, Copy)]
pub struct ClutchProbe {
    /// Combined delta magnitude measured this frame (zero on invalid frames).
    pub delta_angle_deg: f32,
    /// Closest pair among the three fingertips, meters.
    pub min_tip_distance: f32,
    /// Largest finger curl, if joint data was supplied.
    pub max_curl_deg: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClutchTransition {
    Paused,
    Resumed,
}

#[derive(Debug, Clone)]
pub struct Clutch {
    mode: ClutchMode,
    state: ClutchState,
    dwell_s: f32,
}

impl Clutch {
    pub fn new(mode: ClutchMode) -> Self {
        Self {
            mode,
            state: ClutchState::Disengaged,
            dwell_s: 0.0,
        }
    }

    pub fn state(&self) -> ClutchState {
        self.state
    }

    pub fn dwell_s(&self) -> f32 {
        self.dwell_s
    }

    pub fn engage(&mut self) {
        self.state = ClutchState::Engaged { paused: false };
        self.dwell_s = 0.0;
    }

    pub fn disengage(&mut self) {
        self.state = ClutchState::Disengaged;
        self.dwell_s = 0.0;
    }

    /// Advance the pause/resume decision for one frame. Returns a transition
    /// only on the frame the state actually flips.
    pub fn update(&mut self, probe: &ClutchProbe, dt: f32) -> Option<ClutchTransition> {
        let ClutchState::Engaged { paused } = self.state else {
            return None;
        };

        let want_pause = match self.mode {
            ClutchMode::Pinch {
                max_curl_deg,
                min_tip_distance,
            } => {
                probe.max_curl_deg.is_some_and(|curl| curl > max_curl_deg)
                    || probe.min_tip_distance < min_tip_distance
            }
            ClutchMode::Dwell {
                rotation_threshold_deg,
                dwell_time_s,
            } => {
                if probe.delta_angle_deg < rotation_threshold_deg {
                    self.dwell_s += dt;
                } else {
                    self.dwell_s = 0.0;
                }
                self.dwell_s > dwell_time_s
            }
        };

        if want_pause && !paused {
            self.state = ClutchState::Engaged { paused: true };
            debug!("clutch paused (dwell {:.3}s)", self.dwell_s);
            Some(ClutchTransition::Paused)
        } else if !want_pause && paused {
            self.state = ClutchState::Engaged { paused: false };
            debug!("clutch resumed");
            Some(ClutchTransition::Resumed)
        } else {
            None
        }
    }
}
