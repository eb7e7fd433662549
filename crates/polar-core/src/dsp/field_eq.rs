//! Free-field / diffuse-field capsule equalization
//!
//! Four convolution engines (free/diffuse x omni/eight) run on every block so
//! their overlap tails stay warm and a mode switch never starts from silence.
//! The selected pair is written back in place; `EqMode::Off` leaves the input
//! untouched. A mode change crossfades linearly from the previous selection to
//! the new one across the first block that sees it.

use super::convolution::ConvolutionEngine;
use super::eq_tables::{DIFFUSE_FIELD_EIGHT, DIFFUSE_FIELD_OMNI, FREE_FIELD_EIGHT, FREE_FIELD_OMNI};
use crate::types::EqMode;

const FF_OMNI: usize = 0;
const FF_EIGHT: usize = 1;
const DF_OMNI: usize = 2;
const DF_EIGHT: usize = 3;

/// Field equalizer for the omni/eight pair
pub struct FieldEqualizer {
    engines: [ConvolutionEngine; 4],
    /// Engine outputs for the current block, indexed like `engines`
    outputs: [Vec<f32>; 4],
    /// Mode applied on the previous block
    active: EqMode,
    max_block: usize,
}

impl FieldEqualizer {
    pub fn new() -> Self {
        Self {
            engines: [
                ConvolutionEngine::new(&FREE_FIELD_OMNI),
                ConvolutionEngine::new(&FREE_FIELD_EIGHT),
                ConvolutionEngine::new(&DIFFUSE_FIELD_OMNI),
                ConvolutionEngine::new(&DIFFUSE_FIELD_EIGHT),
            ],
            outputs: Default::default(),
            active: EqMode::Off,
            max_block: 0,
        }
    }

    /// Allocate engines and scratch for a sample rate and block size
    pub fn prepare(&mut self, sample_rate: f64, max_block: usize) {
        for engine in self.engines.iter_mut() {
            engine.prepare(sample_rate, max_block);
        }
        for output in self.outputs.iter_mut() {
            output.resize(max_block, 0.0);
        }
        self.max_block = max_block;
    }

    /// Mode applied on the last processed block
    pub fn active_mode(&self) -> EqMode {
        self.active
    }

    /// Equalize one block in place
    pub fn process(&mut self, mode: EqMode, omni: &mut [f32], eight: &mut [f32]) {
        let len = omni.len().min(eight.len()).min(self.max_block);
        let omni = &mut omni[..len];
        let eight = &mut eight[..len];

        for (index, engine) in self.engines.iter_mut().enumerate() {
            let input: &[f32] = if index % 2 == 0 { &*omni } else { &*eight };
            engine.process(input, &mut self.outputs[index][..len]);
        }

        let previous = self.active;
        self.active = mode;

        if previous == mode {
            if let Some((o, e)) = Self::pair(mode) {
                omni.copy_from_slice(&self.outputs[o][..len]);
                eight.copy_from_slice(&self.outputs[e][..len]);
            }
            return;
        }

        let step = 1.0 / len.max(1) as f32;
        for i in 0..len {
            let t = (i + 1) as f32 * step;
            let (dry_o, dry_e) = (omni[i], eight[i]);
            let (from_o, from_e) = self.sample(previous, i, dry_o, dry_e);
            let (to_o, to_e) = self.sample(mode, i, dry_o, dry_e);
            omni[i] = from_o + (to_o - from_o) * t;
            eight[i] = from_e + (to_e - from_e) * t;
        }
    }

    /// Drop every engine's pending tail
    pub fn reset(&mut self) {
        for engine in self.engines.iter_mut() {
            engine.reset();
        }
    }

    fn pair(mode: EqMode) -> Option<(usize, usize)> {
        match mode {
            EqMode::Off => None,
            EqMode::FreeField => Some((FF_OMNI, FF_EIGHT)),
            EqMode::DiffuseField => Some((DF_OMNI, DF_EIGHT)),
        }
    }

    #[inline]
    fn sample(&self, mode: EqMode, i: usize, dry_omni: f32, dry_eight: f32) -> (f32, f32) {
        match Self::pair(mode) {
            None => (dry_omni, dry_eight),
            Some((o, e)) => (self.outputs[o][i], self.outputs[e][i]),
        }
    }
}

impl Default for FieldEqualizer {
    fn default() -> Self {
        Self::new()
    }
}
