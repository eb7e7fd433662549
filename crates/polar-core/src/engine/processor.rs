//! Audio-thread side of the engine
//!
//! `PolarProcessor` owns every DSP stage and all scratch memory. `prepare`
//! allocates; `process` never does. Per block it:
//!
//! 1. grabs the current `ParameterSnapshot` and, if a newer one was
//!    published, the current crossover design
//! 2. converts the host channels to omni/eight
//! 3. runs the field equalizer and the crossover bank
//! 4. feeds the band signals to the energy tracker
//! 5. mixes the banded path and the broadband (zero-delay) path, crossfading
//!    when the zero-delay flag flips
//! 6. applies proximity compensation and writes the result to both outputs

use std::sync::Arc;

use basedrop::{Handle, Shared, SharedCell};

use super::design::DesignSlot;
use super::status::EngineStatus;
use crate::config::EngineConfig;
use crate::dsp::{
    BandSignals, CrossoverDesign, CrossoverFilterBank, FieldEqualizer, PolarPatternSynthesizer,
    ProximityCompensationFilter,
};
use crate::params::ParameterSnapshot;
use crate::tracking::TrackingShared;
use crate::types::{CapsuleFrame, InputFormat};

/// Buffers and stages that depend on sample rate and block size
struct Prepared {
    sample_rate: f64,
    max_block: usize,
    bank: CrossoverFilterBank,
    design: Shared<Option<CrossoverDesign>>,
    bands: BandSignals,
    omni: Vec<f32>,
    eight: Vec<f32>,
    banded: Vec<f32>,
    broadband: Vec<f32>,
}

/// Real-time processor, owned by the audio thread
pub struct PolarProcessor {
    config: EngineConfig,
    handle: Handle,
    params: Arc<SharedCell<ParameterSnapshot>>,
    designs: Arc<DesignSlot>,
    tracking: Arc<TrackingShared>,
    status: Arc<EngineStatus>,
    field_eq: FieldEqualizer,
    synth: PolarPatternSynthesizer,
    proximity: ProximityCompensationFilter,
    state: Option<Prepared>,
    /// Path currently on the output (true = broadband)
    zero_delay: bool,
}

impl PolarProcessor {
    pub(crate) fn new(
        config: EngineConfig,
        handle: Handle,
        params: Arc<SharedCell<ParameterSnapshot>>,
        designs: Arc<DesignSlot>,
        tracking: Arc<TrackingShared>,
        status: Arc<EngineStatus>,
    ) -> Self {
        Self {
            synth: PolarPatternSynthesizer::new(config.ramp_parameters),
            proximity: ProximityCompensationFilter::new(config.proximity_epsilon),
            field_eq: FieldEqualizer::new(),
            config,
            handle,
            params,
            designs,
            tracking,
            status,
            state: None,
            zero_delay: false,
        }
    }

    /// Allocate everything for a sample rate and maximum block length
    ///
    /// Not real-time safe. Builds and publishes a crossover design for the
    /// current parameters so the first block already runs the bank.
    ///
    /// The new status is published before the design, so a controller that
    /// designs for the old status sees the change and designs again.
    pub fn prepare(&mut self, sample_rate: f64, max_block: usize) {
        let max_block = max_block.max(1);
        let order = self.config.crossover_order(sample_rate);

        self.field_eq.prepare(sample_rate, max_block);
        self.proximity.prepare(sample_rate);
        self.synth.reset();

        let bank = CrossoverFilterBank::new(sample_rate, max_block, order);
        self.status
            .publish_prepared(sample_rate, max_block, bank.fft_size(), order);

        let snapshot = *self.params.get();
        let generation = self.designs.next_generation();
        let design = CrossoverDesign::build(&snapshot, sample_rate, order, bank.plan(), generation);
        let design = self.designs.publish(&self.handle, design);
        self.status.set_active_design(generation);

        self.state = Some(Prepared {
            sample_rate,
            max_block,
            design,
            bands: BandSignals::new(max_block),
            omni: vec![0.0; max_block],
            eight: vec![0.0; max_block],
            banded: vec![0.0; max_block],
            broadband: vec![0.0; max_block],
            bank,
        });

        self.zero_delay = snapshot.zero_delay;
        self.status.set_latency(self.latency_samples());

        log::info!(
            "PolarProcessor prepared: {} Hz, max block {}, crossover order {}, latency {}",
            sample_rate,
            max_block,
            order,
            self.latency_samples()
        );
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_some()
    }

    /// Latency of the active path in samples
    pub fn latency_samples(&self) -> u32 {
        match &self.state {
            Some(state) if !self.zero_delay => state.bank.latency() as u32,
            _ => 0,
        }
    }

    /// Clear every filter state without reallocating
    pub fn reset(&mut self) {
        self.field_eq.reset();
        self.synth.reset();
        self.proximity.reset();
        if let Some(state) = self.state.as_mut() {
            state.bank.reset();
        }
    }

    /// Process one host block in place
    ///
    /// `first`/`second` carry the capsule signals in; both receive the
    /// synthesized signal. Blocks longer than the prepared maximum are split.
    pub fn process(&mut self, first: &mut [f32], second: &mut [f32]) {
        let len = first.len().min(second.len());
        let Some(max_block) = self.state.as_ref().map(|s| s.max_block) else {
            first.fill(0.0);
            second.fill(0.0);
            return;
        };

        let mut offset = 0;
        while offset < len {
            let n = (len - offset).min(max_block);
            let range = offset..offset + n;
            if let Some(state) = self.state.as_mut() {
                state.omni[..n].copy_from_slice(&first[range.clone()]);
                state.eight[..n].copy_from_slice(&second[range.clone()]);
            }
            if let Some(out) = self.run(n) {
                first[range.clone()].copy_from_slice(out);
                second[range].copy_from_slice(out);
            }
            offset += n;
        }
    }

    /// Process an interleaved two-channel block in place
    pub fn process_interleaved(&mut self, interleaved: &mut [f32]) {
        let Ok(frames) = bytemuck::try_cast_slice_mut::<f32, CapsuleFrame>(interleaved) else {
            interleaved.fill(0.0);
            return;
        };
        let Some(max_block) = self.state.as_ref().map(|s| s.max_block) else {
            frames.fill(CapsuleFrame::default());
            return;
        };

        for chunk in frames.chunks_mut(max_block) {
            let n = chunk.len();
            if let Some(state) = self.state.as_mut() {
                for (i, frame) in chunk.iter().enumerate() {
                    state.omni[i] = frame.first;
                    state.eight[i] = frame.second;
                }
            }
            if let Some(out) = self.run(n) {
                for (frame, &s) in chunk.iter_mut().zip(out) {
                    *frame = CapsuleFrame::new(s, s);
                }
            }
        }
    }

    /// Run the chain on the first `len` samples of the input buffers
    ///
    /// Returns the mixed output slice.
    fn run(&mut self, len: usize) -> Option<&[f32]> {
        let Self {
            config,
            params,
            designs,
            tracking,
            status,
            field_eq,
            synth,
            proximity,
            state,
            zero_delay,
            ..
        } = self;
        let state = state.as_mut()?;
        let params = params.get();

        // Adopt a newer crossover design if it was built for this bank
        let latest = designs.latest();
        let candidate = (*latest)
            .as_ref()
            .filter(|d| d.fits(state.sample_rate, state.bank.fft_size()))
            .map(|d| d.generation());
        let running = (*state.design).as_ref().map(|d| d.generation());
        if let Some(generation) = candidate {
            if running != Some(generation) {
                status.set_active_design(generation);
                state.design = latest;
            }
        }

        let omni = &mut state.omni[..len];
        let eight = &mut state.eight[..len];
        if config.input_format == InputFormat::FrontBack {
            for (o, e) in omni.iter_mut().zip(eight.iter_mut()) {
                let (front, back) = (*o, *e);
                *o = 0.5 * (front + back);
                *e = 0.5 * (front - back);
            }
        }

        field_eq.process(params.eq_mode, omni, eight);

        // Band routing follows the running design until a new one lands
        let mut view = *params;
        match &*state.design {
            Some(design) => {
                state.bank.process(design, omni, eight, &mut state.bands);
                view.band_count = design.band_count();
            }
            None => {
                for band in state.bands.omni.iter_mut().chain(state.bands.eight.iter_mut()) {
                    band[..len].fill(0.0);
                }
            }
        }

        tracking.observe(&state.bands, view.band_count, len);

        let banded = &mut state.banded[..len];
        let broadband = &mut state.broadband[..len];
        synth.process_bands(&view, &state.bands, banded);
        synth.process_broadband(&view, omni, eight, broadband);

        if view.zero_delay != *zero_delay {
            let step = 1.0 / len.max(1) as f32;
            let (from, to): (&[f32], &[f32]) = if view.zero_delay {
                (&*banded, &*broadband)
            } else {
                (&*broadband, &*banded)
            };
            for (i, out) in state.omni[..len].iter_mut().enumerate() {
                let t = (i + 1) as f32 * step;
                *out = from[i] + (to[i] - from[i]) * t;
            }
            *zero_delay = view.zero_delay;
            let latency = if view.zero_delay { 0 } else { state.bank.latency() as u32 };
            status.set_latency(latency);
        } else {
            let source: &[f32] = if view.zero_delay { &*broadband } else { &*banded };
            state.omni[..len].copy_from_slice(source);
        }

        let out = &mut state.omni[..len];
        proximity.process(view.proximity, out);
        Some(&*out)
    }
}
