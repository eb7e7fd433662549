//! Single-kernel block convolver
//!
//! Wraps a fixed impulse response defined at 48 kHz. `prepare` resamples it
//! for the host rate, plans the FFT for the host block size and, when only
//! the block size changed, carries the pending overlap tail over so the
//! output stays continuous across the seam.

use super::fft::{fft_size_for, Bin, FftPlan, OverlapTail, SpectralKernel};
use crate::types::EQ_SAMPLE_RATE;

/// Resample an impulse response from 48 kHz to `sample_rate`
///
/// Linear interpolation, scaled by `48000 / sample_rate` so the DC gain is
/// unchanged.
pub fn resample_ir(response: &[f32], sample_rate: f64) -> Vec<f32> {
    let reference = EQ_SAMPLE_RATE as f64;
    if response.is_empty() || (sample_rate - reference).abs() < 1e-6 {
        return response.to_vec();
    }
    let ratio = reference / sample_rate;
    let len = ((response.len() as f64) / ratio).round().max(1.0) as usize;
    (0..len)
        .map(|n| {
            let pos = n as f64 * ratio;
            let i = pos.floor() as usize;
            let frac = (pos - i as f64) as f32;
            let a = response.get(i).copied().unwrap_or(0.0);
            let b = response.get(i + 1).copied().unwrap_or(0.0);
            (a + (b - a) * frac) * ratio as f32
        })
        .collect()
}

struct Prepared {
    sample_rate: f64,
    max_block: usize,
    plan: FftPlan,
    kernel: SpectralKernel,
    time: Vec<f32>,
    spectrum: Vec<Bin>,
    scratch: Vec<Bin>,
    tail: OverlapTail,
}

/// Block convolver for one fixed 48 kHz impulse response
pub struct ConvolutionEngine {
    response: &'static [f32],
    state: Option<Prepared>,
}

impl ConvolutionEngine {
    pub fn new(response: &'static [f32]) -> Self {
        Self {
            response,
            state: None,
        }
    }

    /// Allocate for a sample rate and maximum block length
    ///
    /// A block-size change at the same sample rate keeps the pending tail.
    pub fn prepare(&mut self, sample_rate: f64, max_block: usize) {
        let max_block = max_block.max(1);
        if let Some(state) = &self.state {
            if state.sample_rate == sample_rate && state.max_block == max_block {
                return;
            }
        }

        let taps = resample_ir(self.response, sample_rate);
        let plan = FftPlan::new(fft_size_for(max_block, taps.len()));
        let kernel = plan.kernel(&taps);
        let pending = taps.len().saturating_sub(1);

        let tail = match self.state.take() {
            Some(mut old) if old.sample_rate == sample_rate => {
                old.tail.resize(plan.size(), pending);
                old.tail
            }
            _ => OverlapTail::new(plan.size()),
        };

        self.state = Some(Prepared {
            sample_rate,
            max_block,
            time: plan.make_time_buffer(),
            spectrum: plan.make_spectrum(),
            scratch: plan.make_scratch(),
            kernel,
            plan,
            tail,
        });
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_some()
    }

    /// Impulse response length at the prepared rate
    pub fn taps(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.kernel.taps())
    }

    /// Convolve one block (`input.len() <= max_block`)
    ///
    /// Passes the input through unchanged if the engine was never prepared.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        let len = input.len().min(output.len());
        let Some(state) = self.state.as_mut() else {
            output[..len].copy_from_slice(&input[..len]);
            return;
        };
        debug_assert!(len <= state.max_block);

        state.time[..len].copy_from_slice(&input[..len]);
        state.time[len..].fill(0.0);
        state
            .plan
            .forward(&mut state.time, &mut state.spectrum, &mut state.scratch);
        for (bin, k) in state.spectrum.iter_mut().zip(state.kernel.bins()) {
            *bin *= *k;
        }
        state
            .plan
            .inverse(&mut state.spectrum, &mut state.time, &mut state.scratch);
        state.tail.add_and_emit(&state.time, &mut output[..len]);
    }

    /// Drop the pending tail
    pub fn reset(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.tail.clear();
        }
    }
}
