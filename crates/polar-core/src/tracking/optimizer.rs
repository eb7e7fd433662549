//! Closed-form directivity optimization
//!
//! With the mixing law `(1+d)/2 * omni + (1-d)/2 * eight`, the energy of a
//! band mix over a recording with sums `a = Σ omni²`, `b = Σ eight²`,
//! `c = Σ omni·eight` is the quadratic
//!
//! ```text
//! E(d) = ¼ [ (a + b - 2c) d² + 2 (a - b) d + (a + b + 2c) ]
//! ```
//!
//! Every solver takes the band's previous directivity and returns it unchanged
//! when the problem is degenerate (no energy, flat objective, non-finite sums).

use super::BandEnergy;
use crate::types::MAX_BANDS;

/// Relative tolerance for degenerate curvature and flat objectives
const DEGENERATE_EPS: f64 = 1e-9;

/// What the optimizer should achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternGoal {
    /// Least disturber energy
    MinimizeDisturbance,
    /// Most signal energy
    MaximizeSignal,
    /// Highest signal-to-disturbance energy ratio
    MaximizeSignalToDisturbance,
}

/// `E(d) * 4` as `(q2, q1, q0)` polynomial coefficients
#[inline]
fn quadratic(e: &BandEnergy) -> (f64, f64, f64) {
    (
        e.omni + e.eight - 2.0 * e.cross,
        2.0 * (e.omni - e.eight),
        e.omni + e.eight + 2.0 * e.cross,
    )
}

/// Energy of the band mix at directivity `d`
#[inline]
pub fn pattern_energy(e: &BandEnergy, d: f64) -> f64 {
    let (q2, q1, q0) = quadratic(e);
    0.25 * ((q2 * d + q1) * d + q0)
}

fn usable(e: &BandEnergy) -> bool {
    e.omni.is_finite() && e.eight.is_finite() && e.cross.is_finite() && e.omni + e.eight > 0.0
}

/// Directivity minimizing the recorded energy
pub fn minimize_energy(e: &BandEnergy, previous: f64, range: (f64, f64)) -> f64 {
    if !usable(e) {
        return previous;
    }
    let (q2, q1, _) = quadratic(e);
    if q2 <= DEGENERATE_EPS * (e.omni + e.eight) {
        return previous;
    }
    let d = -q1 / (2.0 * q2);
    if !d.is_finite() {
        return previous;
    }
    d.clamp(range.0, range.1)
}

/// Directivity maximizing the recorded energy
///
/// `E` is convex, so the maximum sits on an end of the range.
pub fn maximize_energy(e: &BandEnergy, previous: f64, range: (f64, f64)) -> f64 {
    if !usable(e) {
        return previous;
    }
    let lo = pattern_energy(e, range.0);
    let hi = pattern_energy(e, range.1);
    if (hi - lo).abs() <= DEGENERATE_EPS * lo.abs().max(hi.abs()) {
        return previous;
    }
    if hi > lo {
        range.1
    } else {
        range.0
    }
}

/// Directivity maximizing `E_signal(d) / E_disturber(d)`
///
/// Candidates are the range ends and the in-range roots of the numerator of
/// the ratio's derivative:
///
/// ```text
/// (s2 n1 - s1 n2) d² + 2 (s2 n0 - s0 n2) d + (s1 n0 - s0 n1) = 0
/// ```
pub fn maximize_ratio(
    signal: &BandEnergy,
    disturber: &BandEnergy,
    previous: f64,
    range: (f64, f64),
) -> f64 {
    if !usable(signal) || !usable(disturber) {
        return previous;
    }
    let (s2, s1, s0) = quadratic(signal);
    let (n2, n1, n0) = quadratic(disturber);

    let a = s2 * n1 - s1 * n2;
    let b = 2.0 * (s2 * n0 - s0 * n2);
    let c = s1 * n0 - s0 * n1;

    let mut candidates = [range.0, range.1, f64::NAN, f64::NAN];
    let scale = a.abs() + b.abs() + c.abs();
    if scale > 0.0 {
        if a.abs() <= DEGENERATE_EPS * scale {
            if b.abs() > DEGENERATE_EPS * scale {
                candidates[2] = -c / b;
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let root = disc.sqrt();
                candidates[2] = (-b + root) / (2.0 * a);
                candidates[3] = (-b - root) / (2.0 * a);
            }
        }
    }

    let floor = DEGENERATE_EPS * (disturber.omni + disturber.eight);
    let mut best: Option<(f64, f64)> = None;
    for d in candidates {
        if !d.is_finite() || d < range.0 || d > range.1 {
            continue;
        }
        let noise = pattern_energy(disturber, d);
        if noise <= floor {
            continue;
        }
        let ratio = pattern_energy(signal, d) / noise;
        if best.map_or(true, |(_, r)| ratio > r) {
            best = Some((d, ratio));
        }
    }
    best.map_or(previous, |(d, _)| d)
}

/// Run a goal over every active band
///
/// Returns `None` for bands whose value should stay as it is.
pub fn optimal_directivities(
    goal: PatternGoal,
    disturber: &[BandEnergy; MAX_BANDS],
    signal: &[BandEnergy; MAX_BANDS],
    previous: &[f32; MAX_BANDS],
    band_count: usize,
    range: (f32, f32),
) -> [Option<f32>; MAX_BANDS] {
    let range = (range.0 as f64, range.1 as f64);
    let mut result = [None; MAX_BANDS];
    for band in 0..band_count.min(MAX_BANDS) {
        let prev = (previous[band] as f64).clamp(range.0, range.1);
        let d = match goal {
            PatternGoal::MinimizeDisturbance => minimize_energy(&disturber[band], prev, range),
            PatternGoal::MaximizeSignal => maximize_energy(&signal[band], prev, range),
            PatternGoal::MaximizeSignalToDisturbance => {
                maximize_ratio(&signal[band], &disturber[band], prev, range)
            }
        };
        result[band] = Some(d.clamp(range.0, range.1) as f32);
    }
    result
}
