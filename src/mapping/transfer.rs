//! Transfer curves mapping a raw angular delta to an amplified one.
//!
//! All curves operate on the angle in radians and re-express the result in
//! degrees. The fitted constants for the power and tanh curves are the
//! defaults only; they vary between studies and stay configurable.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferCurve {
    /// `scaled = raw * gain`
    Linear { gain: f32 },
    /// Accelerating: `scaled = a * theta^b * 180/pi`
    Power { a: f32, b: f32 },
    /// Decelerating, saturating at `a * 180/pi`: `scaled = a * tanh(b * theta) * 180/pi`
    Tanh { a: f32, b: f32 },
}

impl TransferCurve {
    pub fn power_default() -> Self {
        TransferCurve::Power { a: 1.910, b: 2.0 }
    }

    pub fn tanh_default() -> Self {
        TransferCurve::Tanh { a: 0.547, b: 3.657 }
    }

    pub fn scale(&self, raw_deg: f32) -> f32 {
        let theta = raw_deg.to_radians();
        match *self {
            TransferCurve::Linear { gain } => raw_deg * gain,
            TransferCurve::Power { a, b } => a * theta.powf(b) * 180.0 / PI,
            TransferCurve::Tanh { a, b } => a * (b * theta).tanh() * 180.0 / PI,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            TransferCurve::Linear { gain } => {
                if !gain.is_finite() {
                    return Err(ConfigError::NonFinite("transfer curve constants"));
                }
                if gain <= 0.0 {
                    return Err(ConfigError::NonPositive("linear curve gain"));
                }
            }
            TransferCurve::Power { a, b } | TransferCurve::Tanh { a, b } => {
                if !a.is_finite() || !b.is_finite() {
                    return Err(ConfigError::NonFinite("transfer curve constants"));
                }
                if a <= 0.0 || b <= 0.0 {
                    return Err(ConfigError::NonPositive("curve constants"));
                }
            }
        }
        Ok(())
    }
}

impl Default for TransferCurve {
    fn default() -> Self {
        TransferCurve::Linear { gain: 1.0 }
    }
}
