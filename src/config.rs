//! Controller configuration: selected once, validated up front.
//!
//! Unknown or inconsistent settings are programming mistakes, so `validate`
//! fails hard instead of papering over them at runtime.

use serde::{Deserialize, Serialize};

use crate::clutch::ClutchMode;
use crate::mapping::{DeltaSettings, GainSource, TransferCurve};
use crate::triangle::TriangleThresholds;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} is empty or inverted")]
    EmptyRange(&'static str),
}

/// One-euro filter constants for the tracked points, plus an optional pass
/// over the triangle orientation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FilterConfig {
    pub enabled: bool,
    pub min_cutoff: f32,
    pub beta: f32,
    pub derivative_cutoff: f32,
    pub filter_orientation: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_cutoff: 1.0,
            beta: 0.15,
            derivative_cutoff: 1.0,
            filter_orientation: false,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [self.min_cutoff, self.beta, self.derivative_cutoff];
        if params.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::NonFinite("filter constants"));
        }
        if self.min_cutoff <= 0.0 || self.derivative_cutoff <= 0.0 {
            return Err(ConfigError::NonPositive("filter cutoff frequencies"));
        }
        if self.beta < 0.0 {
            return Err(ConfigError::NonPositive("filter beta"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub filter: FilterConfig,
    pub triangle: TriangleThresholds,
    pub delta: DeltaSettings,
    /// At most one curve; `None` applies the gain source directly.
    pub curve: Option<TransferCurve>,
    /// Exactly one gain source is always active.
    pub gain: GainSource,
    /// Blend rate toward the estimated gain, 1/s.
    pub gain_smoothing_per_s: f32,
    pub clutch: ClutchMode,
    /// Rotate the stored grab offset with the accumulated rotation so the
    /// object orbits the centroid; off keeps the offset fixed.
    pub orbit_grab_offset: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            triangle: TriangleThresholds::default(),
            delta: DeltaSettings::default(),
            curve: None,
            gain: GainSource::default(),
            gain_smoothing_per_s: 2.0,
            clutch: ClutchMode::default(),
            orbit_grab_offset: true,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;
        if let Some(curve) = &self.curve {
            curve.validate()?;
        }
        self.gain.validate()?;
        self.clutch.validate()?;

        let thresholds = [
            self.triangle.min_side_sq,
            self.triangle.parallel_dot,
            self.triangle.min_area_cm2,
            self.delta.reject_above_deg,
            self.delta.max_step_deg,
            self.gain_smoothing_per_s,
        ];
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::NonFinite("thresholds"));
        }
        if self.triangle.min_side_sq <= 0.0
            || self.triangle.min_area_cm2 <= 0.0
            || self.delta.reject_above_deg <= 0.0
            || self.delta.max_step_deg <= 0.0
            || self.gain_smoothing_per_s <= 0.0
        {
            return Err(ConfigError::NonPositive("thresholds"));
        }
        if !(0.0..=1.0).contains(&self.triangle.parallel_dot) {
            return Err(ConfigError::EmptyRange("parallel dot threshold"));
        }
        if self.delta.max_step_deg > self.delta.reject_above_deg {
            return Err(ConfigError::EmptyRange("delta step vs rejection threshold"));
        }
        Ok(())
    }
}
