//! Continuous gain estimation from a proxy signal.
//!
//! A clamped linear map converts triangle area (cm^2) or per-frame fingertip
//! travel (cm) into a multiplicative scale factor for the rotation delta.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Clamped linear interpolation from `[domain_min, domain_max]` to
/// `[gain_min, gain_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainMap {
    pub domain_min: f32,
    pub domain_max: f32,
    pub gain_min: f32,
    pub gain_max: f32,
}

impl GainMap {
    /// Travel-driven defaults: 0.02..1.0 cm per frame maps to 0.1..5.0.
    pub fn travel_default() -> Self {
        Self {
            domain_min: 0.02,
            domain_max: 1.0,
            gain_min: 0.1,
            gain_max: 5.0,
        }
    }

    /// Area-driven defaults: 0.5..6.0 cm^2 maps to 0.5..2.0.
    pub fn area_default() -> Self {
        Self {
            domain_min: 0.5,
            domain_max: 6.0,
            gain_min: 0.5,
            gain_max: 2.0,
        }
    }

    pub fn evaluate(&self, signal: f32) -> f32 {
        if signal <= self.domain_min {
            self.gain_min
        } else if signal >= self.domain_max {
            self.gain_max
        } else {
            let t = (signal - self.domain_min) / (self.domain_max - self.domain_min);
            self.gain_min + t * (self.gain_max - self.gain_min)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            self.domain_min,
            self.domain_max,
            self.gain_min,
            self.gain_max,
        ];
        if params.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::NonFinite("gain map bounds"));
        }
        if self.domain_min >= self.domain_max {
            return Err(ConfigError::EmptyRange("gain map domain"));
        }
        if self.gain_min > self.gain_max {
            return Err(ConfigError::EmptyRange("gain map range"));
        }
        if self.gain_min <= 0.0 {
            return Err(ConfigError::NonPositive("gain map minimum"));
        }
        Ok(())
    }
}

/// The single active gain source. Exactly one is configured; `Fixed` covers
/// the plain constant-scale setups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GainSource {
    Fixed { gain: f32 },
    Area { map: GainMap },
    Travel { map: GainMap },
}

impl GainSource {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            GainSource::Fixed { gain } => {
                if !gain.is_finite() {
                    Err(ConfigError::NonFinite("fixed gain"))
                } else if *gain <= 0.0 {
                    Err(ConfigError::NonPositive("fixed gain"))
                } else {
                    Ok(())
                }
            }
            GainSource::Area { map } | GainSource::Travel { map } => map.validate(),
        }
    }
}

impl Default for GainSource {
    fn default() -> Self {
        GainSource::Fixed { gain: 1.0 }
    }
}

/// Exponential blend toward the target gain, rate in 1/s. Keeps the gain from
/// stepping when the proxy signal jitters.
pub fn smooth_gain(prev: f32, target: f32, rate_per_s: f32, dt: f32) -> f32 {
    let t = (rate_per_s * dt).clamp(0.0, 1.0);
    prev + (target - prev) * t
}
