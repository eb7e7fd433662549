//! Processor status published to the control side
//!
//! Written by `PolarProcessor` in `prepare` (and when the latency changes on
//! a zero-delay switch), read lock-free by the controller and the host.

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Lock-free view of the prepared processor
pub struct EngineStatus {
    /// Sample rate as f64 bits (0 until prepared)
    sample_rate: AtomicU64,
    /// Largest block processed in one pass
    max_block: AtomicUsize,
    /// FFT size of the crossover bank
    fft_size: AtomicUsize,
    /// Crossover FIR order
    crossover_order: AtomicUsize,
    /// Latency currently reported to the host, in samples
    latency: AtomicU32,
    /// Generation of the crossover design the audio thread runs
    active_design: AtomicU64,
}

impl EngineStatus {
    pub fn new() -> Self {
        Self {
            sample_rate: AtomicU64::new(0),
            max_block: AtomicUsize::new(0),
            fft_size: AtomicUsize::new(0),
            crossover_order: AtomicUsize::new(0),
            latency: AtomicU32::new(0),
            active_design: AtomicU64::new(0),
        }
    }

    /// Sample rate, or None before the first prepare
    #[inline]
    pub fn sample_rate(&self) -> Option<f64> {
        let rate = f64::from_bits(self.sample_rate.load(Ordering::Acquire));
        (rate > 0.0).then_some(rate)
    }

    #[inline]
    pub fn max_block(&self) -> usize {
        self.max_block.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fft_size(&self) -> usize {
        self.fft_size.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn crossover_order(&self) -> usize {
        self.crossover_order.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn latency(&self) -> u32 {
        self.latency.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn active_design(&self) -> u64 {
        self.active_design.load(Ordering::Relaxed)
    }

    pub(crate) fn publish_prepared(
        &self,
        sample_rate: f64,
        max_block: usize,
        fft_size: usize,
        order: usize,
    ) {
        self.max_block.store(max_block, Ordering::Relaxed);
        self.fft_size.store(fft_size, Ordering::Relaxed);
        self.crossover_order.store(order, Ordering::Relaxed);
        // Release last so readers that see the rate also see the rest
        self.sample_rate.store(sample_rate.to_bits(), Ordering::Release);
    }

    #[inline]
    pub(crate) fn set_latency(&self, samples: u32) {
        self.latency.store(samples, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn set_active_design(&self, generation: u64) {
        self.active_design.store(generation, Ordering::Relaxed);
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::new()
    }
}
