//! Adaptive low-pass filtering for noisy tracking signals.
//!
//! One-euro style: the value cutoff rises with the smoothed derivative, so the
//! filter is smooth at rest and responsive during fast motion.

use glam::{Quat, Vec3};
use std::f32::consts::PI;

/// Scalar one-euro filter, one logical channel.
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    min_cutoff: f32,
    beta: f32,
    d_cutoff: f32,

    x_prev: f32,
    dx_prev: f32,
    initialized: bool,
}

fn smoothing_factor(cutoff: f32, dt: f32) -> f32 {
    let r = 2.0 * PI * cutoff * dt;
    r / (r + 1.0)
}

impl OneEuroFilter {
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            d_cutoff,
            x_prev: 0.0,
            dx_prev: 0.0,
            initialized: false,
        }
    }

    /// Filter one sample. The first sample passes through unchanged; a
    /// non-positive `dt` returns the previous output (the raw value if there
    /// is none yet).
    pub fn filter(&mut self, x: f32, dt: f32) -> f32 {
        if !self.initialized {
            self.x_prev = x;
            self.dx_prev = 0.0;
            self.initialized = true;
            return x;
        }
        if dt <= 0.0 {
            return self.x_prev;
        }

        let dx = (x - self.x_prev) / dt;
        let a_d = smoothing_factor(self.d_cutoff, dt);
        let dx_hat = a_d * dx + (1.0 - a_d) * self.dx_prev;

        let cutoff = self.min_cutoff + self.beta * dx_hat.abs();
        let a = smoothing_factor(cutoff, dt);
        let x_hat = a * x + (1.0 - a) * self.x_prev;

        self.x_prev = x_hat;
        self.dx_prev = dx_hat;
        x_hat
    }

    pub fn reset(&mut self) {
        self.initialized = false;
    }
}

/// Three independent scalar filters, one per coordinate axis.
#[derive(Debug, Clone)]
pub struct PointFilter {
    axes: [OneEuroFilter; 3],
}

impl PointFilter {
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        let axis = OneEuroFilter::new(min_cutoff, beta, d_cutoff);
        Self {
            axes: [axis.clone(), axis.clone(), axis],
        }
    }

    pub fn filter(&mut self, p: Vec3, dt: f32) -> Vec3 {
        Vec3::new(
            self.axes[0].filter(p.x, dt),
            self.axes[1].filter(p.y, dt),
            self.axes[2].filter(p.z, dt),
        )
    }

    pub fn reset(&mut self) {
        for axis in &mut self.axes {
            axis.reset();
        }
    }
}

/// Component-wise filter for unit quaternions.
///
/// The double cover makes naive component filtering unstable: q and -q are the
/// same rotation but average to garbage. Incoming samples are sign-flipped to
/// the hemisphere of the previous output before filtering, and the result is
/// renormalized.
#[derive(Debug, Clone)]
pub struct OrientationFilter {
    components: [OneEuroFilter; 4],
    last: Option<Quat>,
}

impl OrientationFilter {
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        let c = OneEuroFilter::new(min_cutoff, beta, d_cutoff);
        Self {
            components: [c.clone(), c.clone(), c.clone(), c],
            last: None,
        }
    }

    pub fn filter(&mut self, q: Quat, dt: f32) -> Quat {
        let q = match self.last {
            Some(last) if q.dot(last) < 0.0 => -q,
            _ => q,
        };
        let filtered = Quat::from_xyzw(
            self.components[0].filter(q.x, dt),
            self.components[1].filter(q.y, dt),
            self.components[2].filter(q.z, dt),
            self.components[3].filter(q.w, dt),
        )
        .normalize();
        self.last = Some(filtered);
        filtered
    }

    pub fn reset(&mut self) {
        for c in &mut self.components {
            c.reset();
        }
        self.last = None;
    }
}
