//! Per-band first-order pattern synthesis
//!
//! For directivity `d` and linear gain `g` a band contributes
//!
//! ```text
//! g * ((1 + d) / 2 * omni + (1 - d) / 2 * eight)
//! ```
//!
//! `d = 1` is pure omni, `d = -1` pure figure-of-eight and `d = 0` the
//! cardioid with unity on-axis gain. Gain and directivity move linearly across
//! a block when they change; mute and solo are hard gates evaluated per block.

use super::crossover::BandSignals;
use crate::params::{BandParams, ParameterSnapshot};
use crate::types::{db_to_gain, MAX_BANDS};

/// Omni and eight weights for a directivity factor
#[inline]
pub fn mix_weights(directivity: f32) -> (f32, f32) {
    (0.5 * (1.0 + directivity), 0.5 * (1.0 - directivity))
}

/// Gain/directivity ramp state for one mixed stream
#[derive(Debug, Clone, Copy)]
struct MixRamp {
    gain: f32,
    directivity: f32,
    primed: bool,
}

impl MixRamp {
    const fn new() -> Self {
        Self {
            gain: 1.0,
            directivity: 0.0,
            primed: false,
        }
    }

    /// Mix `omni`/`eight` into `out` (accumulating), ramping to the targets
    #[inline]
    fn mix_into(
        &mut self,
        target_gain: f32,
        target_directivity: f32,
        ramp: bool,
        omni: &[f32],
        eight: &[f32],
        out: &mut [f32],
    ) {
        if !self.primed || !ramp {
            self.gain = target_gain;
            self.directivity = target_directivity;
            self.primed = true;
        }

        let len = out.len();
        let (g0, d0) = (self.gain, self.directivity);
        if g0 == target_gain && d0 == target_directivity {
            let (wo, we) = mix_weights(d0);
            let (wo, we) = (g0 * wo, g0 * we);
            for ((o, &x), &y) in out.iter_mut().zip(omni).zip(eight) {
                *o += wo * x + we * y;
            }
            return;
        }

        let step = 1.0 / len.max(1) as f32;
        for (i, ((o, &x), &y)) in out.iter_mut().zip(omni).zip(eight).enumerate() {
            let t = (i + 1) as f32 * step;
            let g = g0 + (target_gain - g0) * t;
            let (wo, we) = mix_weights(d0 + (target_directivity - d0) * t);
            *o += g * (wo * x + we * y);
        }
        self.gain = target_gain;
        self.directivity = target_directivity;
    }

    /// Jump to the targets without producing output
    #[inline]
    fn settle(&mut self, target_gain: f32, target_directivity: f32) {
        self.gain = target_gain;
        self.directivity = target_directivity;
        self.primed = true;
    }
}

/// Blends per-band omni/eight signals into the output
pub struct PolarPatternSynthesizer {
    bands: [MixRamp; MAX_BANDS],
    broadband: MixRamp,
    ramp: bool,
}

impl PolarPatternSynthesizer {
    pub fn new(ramp: bool) -> Self {
        Self {
            bands: [MixRamp::new(); MAX_BANDS],
            broadband: MixRamp::new(),
            ramp,
        }
    }

    /// Forget ramp state so the next block starts on target
    pub fn reset(&mut self) {
        self.bands = [MixRamp::new(); MAX_BANDS];
        self.broadband = MixRamp::new();
    }

    fn targets(params: &ParameterSnapshot, band: &BandParams) -> (f32, f32) {
        (db_to_gain(band.gain_db), params.clamp_directivity(band.directivity))
    }

    /// Sum every audible band into `out` (overwritten)
    pub fn process_bands(
        &mut self,
        params: &ParameterSnapshot,
        signals: &BandSignals,
        out: &mut [f32],
    ) {
        let len = out.len();
        out.fill(0.0);
        for band in 0..params.band_count {
            let (gain, directivity) = Self::targets(params, &params.bands[band]);
            if params.band_audible(band) {
                self.bands[band].mix_into(
                    gain,
                    directivity,
                    self.ramp,
                    &signals.omni[band][..len],
                    &signals.eight[band][..len],
                    out,
                );
            } else {
                self.bands[band].settle(gain, directivity);
            }
        }
    }

    /// Zero-delay path: band 0's pattern and gain on the unsplit signal
    ///
    /// Only band 0's mute gates this path; solo has no meaning without bands.
    pub fn process_broadband(
        &mut self,
        params: &ParameterSnapshot,
        omni: &[f32],
        eight: &[f32],
        out: &mut [f32],
    ) {
        out.fill(0.0);
        let band = &params.bands[0];
        let (gain, directivity) = Self::targets(params, band);
        if band.mute {
            self.broadband.settle(gain, directivity);
            return;
        }
        let len = out.len();
        self.broadband
            .mix_into(gain, directivity, self.ramp, &omni[..len], &eight[..len], out);
    }
}
