//! Proximity-effect compensation
//!
//! A close source boosts the gradient capsule's low end. The compensation is a
//! first-order shelf on the mixed output:
//!
//! ```text
//! wc = c * |x| / r_near          c = 343 m/s, r_near = 0.05 m
//! wz = 2 pi * 20 Hz
//! x > 0:  H(s) = (s + wz) / (s + wz + wc)     (low cut)
//! x < 0:  H(s) = (s + wz + wc) / (s + wz)     (low boost)
//! ```
//!
//! Discretized with the bilinear transform, each corner prewarped. Small
//! changes of `x` (below the configured epsilon) keep the current
//! coefficients.

use std::f64::consts::PI;

const SPEED_OF_SOUND: f64 = 343.0;
const NEAR_DISTANCE: f64 = 0.05;
const ZERO_HZ: f64 = 20.0;

/// First-order IIR coefficients (`a0` normalized to 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub a1: f64,
}

impl ShelfCoeffs {
    pub const BYPASS: Self = Self {
        b0: 1.0,
        b1: 0.0,
        a1: 0.0,
    };

    /// Design the shelf for proximity `x` at `sample_rate`
    pub fn design(proximity: f32, sample_rate: f64) -> Self {
        let x = proximity.clamp(-1.0, 1.0) as f64;
        if x == 0.0 || sample_rate <= 0.0 {
            return Self::BYPASS;
        }
        let k = 2.0 * sample_rate;
        // Keep tan() well away from its pole at very low rates
        let prewarp = |w: f64| k * (w / k).min(0.49 * PI).tan();

        let wz = 2.0 * PI * ZERO_HZ;
        let wc = SPEED_OF_SOUND * x.abs() / NEAR_DISTANCE;
        let zero = prewarp(wz);
        let pole = prewarp(wz + wc);
        let (num, den) = if x > 0.0 { (zero, pole) } else { (pole, zero) };

        let norm = 1.0 / (k + den);
        Self {
            b0: (k + num) * norm,
            b1: (num - k) * norm,
            a1: (den - k) * norm,
        }
    }

    /// Gain at DC
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1) / (1.0 + self.a1)
    }
}

/// Shared proximity filter on the mixed output
pub struct ProximityCompensationFilter {
    coeffs: ShelfCoeffs,
    /// Proximity the current coefficients were designed for
    designed_for: f32,
    sample_rate: f64,
    epsilon: f32,
    x1: f64,
    y1: f64,
}

impl ProximityCompensationFilter {
    pub fn new(epsilon: f32) -> Self {
        Self {
            coeffs: ShelfCoeffs::BYPASS,
            designed_for: 0.0,
            sample_rate: 0.0,
            epsilon: epsilon.max(0.0),
            x1: 0.0,
            y1: 0.0,
        }
    }

    /// Set the sample rate, redesigning for the current proximity
    pub fn prepare(&mut self, sample_rate: f64) {
        if self.sample_rate != sample_rate {
            self.sample_rate = sample_rate;
            self.coeffs = ShelfCoeffs::design(self.designed_for, sample_rate);
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }

    #[inline]
    pub fn coeffs(&self) -> ShelfCoeffs {
        self.coeffs
    }

    /// Whether the filter currently passes audio untouched
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.designed_for == 0.0
    }

    /// Redesign if `proximity` moved by more than epsilon
    ///
    /// Returns true if the coefficients changed.
    pub fn update(&mut self, proximity: f32) -> bool {
        let target = if proximity.abs() < self.epsilon { 0.0 } else { proximity };
        let within = (target - self.designed_for).abs() <= self.epsilon;
        if target == self.designed_for || (within && target != 0.0) {
            return false;
        }
        self.designed_for = target;
        self.coeffs = ShelfCoeffs::design(target, self.sample_rate);
        true
    }

    /// Filter one block in place
    pub fn process(&mut self, proximity: f32, buffer: &mut [f32]) {
        self.update(proximity);
        if self.is_bypassed() {
            // Track the signal so re-engaging starts from steady state
            if let Some(&last) = buffer.last() {
                self.x1 = last as f64;
                self.y1 = last as f64;
            }
            return;
        }
        let ShelfCoeffs { b0, b1, a1 } = self.coeffs;
        for sample in buffer.iter_mut() {
            let x = *sample as f64;
            let y = b0 * x + b1 * self.x1 - a1 * self.y1;
            self.x1 = x;
            self.y1 = y;
            *sample = y as f32;
        }
    }
}
