//! FFT block convolution core
//!
//! Shared by the field equalizer and the crossover bank. Each block of up to
//! `max_block` samples is zero-padded to `fft_size`, transformed once, multiplied
//! by a precomputed kernel spectrum and transformed back. The part of the result
//! that spills past the block is kept in an [`OverlapTail`] and added to the
//! next block (overlap-add), so a whole block is convolved with no added latency.
//!
//! Plans and kernels are built at prepare time; nothing here allocates while
//! processing.

use std::sync::Arc;

use realfft::num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};

/// Spectrum bin type
pub type Bin = Complex<f32>;

/// Smallest FFT size that convolves `max_block` samples with `taps` taps
/// without circular wrap-around
#[inline]
pub fn fft_size_for(max_block: usize, taps: usize) -> usize {
    (max_block.max(1) + taps.max(1) - 1).next_power_of_two()
}

/// Forward/inverse real FFT pair for one transform size
#[derive(Clone)]
pub struct FftPlan {
    size: usize,
    forward: Arc<dyn RealToComplex<f32>>,
    inverse: Arc<dyn ComplexToReal<f32>>,
}

impl FftPlan {
    pub fn new(size: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    /// Transform length in samples
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of spectrum bins (`size / 2 + 1`)
    #[inline]
    pub fn bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Scratch length covering both directions
    pub fn scratch_len(&self) -> usize {
        self.forward
            .get_scratch_len()
            .max(self.inverse.get_scratch_len())
    }

    pub fn make_time_buffer(&self) -> Vec<f32> {
        vec![0.0; self.size]
    }

    pub fn make_spectrum(&self) -> Vec<Bin> {
        vec![Bin::new(0.0, 0.0); self.bins()]
    }

    pub fn make_scratch(&self) -> Vec<Bin> {
        vec![Bin::new(0.0, 0.0); self.scratch_len()]
    }

    /// Precompute the spectrum of an FIR kernel
    ///
    /// The inverse transform is unnormalized, so `1 / size` is folded into
    /// the kernel here.
    pub fn kernel(&self, taps: &[f32]) -> SpectralKernel {
        debug_assert!(taps.len() <= self.size);
        let mut time = self.make_time_buffer();
        let n = taps.len().min(self.size);
        time[..n].copy_from_slice(&taps[..n]);
        let mut bins = self.make_spectrum();
        let mut scratch = self.make_scratch();
        self.forward(&mut time, &mut bins, &mut scratch);
        let scale = 1.0 / self.size as f32;
        for bin in bins.iter_mut() {
            *bin *= scale;
        }
        SpectralKernel { bins, taps: n }
    }

    /// Forward transform; `time` is used as working memory and left undefined
    #[inline]
    pub fn forward(&self, time: &mut [f32], spectrum: &mut [Bin], scratch: &mut [Bin]) {
        if self
            .forward
            .process_with_scratch(time, spectrum, scratch)
            .is_err()
        {
            spectrum.fill(Bin::new(0.0, 0.0));
        }
    }

    /// Inverse transform; `spectrum` is used as working memory
    #[inline]
    pub fn inverse(&self, spectrum: &mut [Bin], time: &mut [f32], scratch: &mut [Bin]) {
        // A real signal has no imaginary part at DC and Nyquist
        spectrum[0].im = 0.0;
        if let Some(last) = spectrum.last_mut() {
            last.im = 0.0;
        }
        if self
            .inverse
            .process_with_scratch(spectrum, time, scratch)
            .is_err()
        {
            time.fill(0.0);
        }
    }
}

/// Frequency-domain FIR kernel with the inverse-FFT scale folded in
#[derive(Debug, Clone)]
pub struct SpectralKernel {
    bins: Vec<Bin>,
    taps: usize,
}

impl SpectralKernel {
    /// Number of time-domain taps the kernel was built from
    #[inline]
    pub fn taps(&self) -> usize {
        self.taps
    }

    #[inline]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// `out = input * kernel`, bin by bin
    #[inline]
    pub fn apply(&self, input: &[Bin], out: &mut [Bin]) {
        for ((o, i), k) in out.iter_mut().zip(input).zip(&self.bins) {
            *o = *i * *k;
        }
    }
}

/// Overlap-add accumulator for one output stream
pub struct OverlapTail {
    acc: Vec<f32>,
}

impl OverlapTail {
    pub fn new(fft_size: usize) -> Self {
        Self {
            acc: vec![0.0; fft_size],
        }
    }

    /// Add one inverse-transformed block and emit its first `out.len()` samples
    ///
    /// The remaining samples shift to the front and wait for the next block.
    #[inline]
    pub fn add_and_emit(&mut self, block: &[f32], out: &mut [f32]) {
        let len = out.len();
        debug_assert!(len <= self.acc.len());
        for (a, &b) in self.acc.iter_mut().zip(block) {
            *a += b;
        }
        out.copy_from_slice(&self.acc[..len]);
        self.acc.copy_within(len.., 0);
        let keep = self.acc.len() - len;
        self.acc[keep..].fill(0.0);
    }

    /// Move to a new FFT size, keeping the first `pending` samples
    pub fn resize(&mut self, fft_size: usize, pending: usize) {
        let keep = pending.min(fft_size).min(self.acc.len());
        let mut acc = vec![0.0; fft_size];
        acc[..keep].copy_from_slice(&self.acc[..keep]);
        self.acc = acc;
    }

    /// Add another tail's pending samples into this one
    pub fn absorb(&mut self, other: &OverlapTail) {
        for (a, &b) in self.acc.iter_mut().zip(&other.acc) {
            *a += b;
        }
    }

    pub fn clear(&mut self) {
        self.acc.fill(0.0);
    }

    /// Whether any pending sample is non-zero
    pub fn is_silent(&self) -> bool {
        self.acc.iter().all(|&s| s == 0.0)
    }
}
