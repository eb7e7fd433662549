//! Linear-phase crossover design and the running filter bank
//!
//! # Design
//!
//! Each boundary gets a Blackman-windowed sinc lowpass of even order (odd tap
//! count) normalized to unity DC gain. Its highpass is the delayed unit impulse
//! minus the lowpass, so the pair is complementary by construction. Bands are
//! differences of neighbouring lowpasses:
//!
//! ```text
//! band 0     = LP[0]
//! band k     = LP[k] - LP[k-1]
//! band N - 1 = delta(order/2) - LP[N-2]
//! ```
//!
//! The band kernels telescope to `delta(order/2)`, so the bands always sum to
//! the input delayed by `order / 2` samples.
//!
//! # Publication
//!
//! [`CrossoverDesign`] values are built on the control thread (they allocate
//! and run FFTs) and handed to the audio thread whole. The bank only reads a
//! design; it never mutates one.

use super::fft::{fft_size_for, Bin, FftPlan, OverlapTail, SpectralKernel};
use crate::params::{CrossoverRange, ParameterSnapshot};
use crate::types::{MAX_BANDS, MAX_CROSSOVERS};

/// Highest permitted cutoff as a fraction of the sample rate
const MAX_CUTOFF_RATIO: f64 = 0.45;

// ═══════════════════════════════════════════════════════════════════════════════
// Filter design
// ═══════════════════════════════════════════════════════════════════════════════

/// Blackman-windowed sinc lowpass with `order + 1` taps and unity DC gain
pub fn design_lowpass(cutoff_hz: f64, sample_rate: f64, order: usize) -> Vec<f32> {
    let order = order.max(2) & !1;
    let fc = (cutoff_hz / sample_rate).clamp(1e-6, 0.5);
    let mid = (order / 2) as f64;
    let m = order as f64;

    let mut taps: Vec<f64> = (0..=order)
        .map(|n| {
            let n = n as f64;
            let x = n - mid;
            let sinc = if x == 0.0 {
                2.0 * fc
            } else {
                (2.0 * std::f64::consts::PI * fc * x).sin() / (std::f64::consts::PI * x)
            };
            let phase = 2.0 * std::f64::consts::PI * n / m;
            let window = 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos();
            sinc * window
        })
        .collect();

    let dc: f64 = taps.iter().sum();
    if dc.abs() > f64::EPSILON {
        for t in taps.iter_mut() {
            *t /= dc;
        }
    }
    taps.into_iter().map(|t| t as f32).collect()
}

/// Complementary lowpass/highpass pair for one boundary
#[derive(Debug, Clone)]
pub struct CrossoverFilter {
    cutoff_hz: f32,
    lowpass: Vec<f32>,
    highpass: Vec<f32>,
}

impl CrossoverFilter {
    pub fn design(cutoff_hz: f32, sample_rate: f64, order: usize) -> Self {
        let lowpass = design_lowpass(cutoff_hz as f64, sample_rate, order);
        let mid = lowpass.len() / 2;
        let highpass = lowpass
            .iter()
            .enumerate()
            .map(|(n, &lp)| if n == mid { 1.0 - lp } else { -lp })
            .collect();
        Self {
            cutoff_hz,
            lowpass,
            highpass,
        }
    }

    #[inline]
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    #[inline]
    pub fn lowpass(&self) -> &[f32] {
        &self.lowpass
    }

    #[inline]
    pub fn highpass(&self) -> &[f32] {
        &self.highpass
    }

    /// Group delay in samples
    #[inline]
    pub fn latency(&self) -> usize {
        self.lowpass.len() / 2
    }
}

/// Clamp a requested cutoff into its boundary range and below its share of
/// 0.45 fs
///
/// Boundary `i` of `n` is capped at `0.45 fs * (i + 1) / n`. The caps rise
/// strictly, so the designed cutoffs stay strictly increasing at any rate.
pub fn effective_cutoff(band_count: usize, index: usize, hz: f32, sample_rate: f64) -> f32 {
    let hz = match CrossoverRange::lookup(band_count, index) {
        Some(range) => range.clamp(hz),
        None => hz,
    };
    let boundaries = band_count.saturating_sub(1).max(1);
    let share = (index + 1).min(boundaries) as f64 / boundaries as f64;
    hz.min((sample_rate * MAX_CUTOFF_RATIO * share) as f32)
}

/// A complete, immutable crossover configuration
///
/// Carries time-domain band kernels and their spectra for one FFT size.
pub struct CrossoverDesign {
    generation: u64,
    sample_rate: f64,
    order: usize,
    fft_size: usize,
    band_count: usize,
    cutoffs: [f32; MAX_CROSSOVERS],
    filters: Vec<CrossoverFilter>,
    band_kernels: Vec<Vec<f32>>,
    band_spectra: Vec<SpectralKernel>,
}

impl CrossoverDesign {
    /// Design for the snapshot's band count and active crossovers
    pub fn build(
        snapshot: &ParameterSnapshot,
        sample_rate: f64,
        order: usize,
        plan: &FftPlan,
        generation: u64,
    ) -> Self {
        let band_count = snapshot.band_count;
        let mut cutoffs = snapshot.crossovers;
        let filters: Vec<CrossoverFilter> = (0..band_count - 1)
            .map(|index| {
                let hz =
                    effective_cutoff(band_count, index, snapshot.crossovers[index], sample_rate);
                cutoffs[index] = hz;
                CrossoverFilter::design(hz, sample_rate, order)
            })
            .collect();

        let taps = order + 1;
        let mid = order / 2;
        let band_kernels: Vec<Vec<f32>> = (0..band_count)
            .map(|band| {
                let mut kernel = vec![0.0_f32; taps];
                if band < band_count - 1 {
                    kernel.copy_from_slice(filters[band].lowpass());
                } else {
                    kernel[mid] = 1.0;
                }
                if band > 0 {
                    for (k, &lp) in kernel.iter_mut().zip(filters[band - 1].lowpass()) {
                        *k -= lp;
                    }
                }
                kernel
            })
            .collect();

        let band_spectra = band_kernels.iter().map(|k| plan.kernel(k)).collect();

        Self {
            generation,
            sample_rate,
            order,
            fft_size: plan.size(),
            band_count,
            cutoffs,
            filters,
            band_kernels,
            band_spectra,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    #[inline]
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Cutoffs actually designed (after clamping)
    pub fn cutoffs(&self) -> &[f32] {
        &self.cutoffs[..self.band_count - 1]
    }

    pub fn filters(&self) -> &[CrossoverFilter] {
        &self.filters
    }

    pub fn band_kernel(&self, band: usize) -> &[f32] {
        &self.band_kernels[band]
    }

    /// Bank latency in samples
    #[inline]
    pub fn latency(&self) -> usize {
        self.order / 2
    }

    /// Whether this design was built for the snapshot's band layout
    pub fn matches(&self, snapshot: &ParameterSnapshot) -> bool {
        self.band_count == snapshot.band_count
            && (0..self.band_count - 1).all(|i| {
                let hz = snapshot.crossovers[i];
                self.cutoffs[i] == effective_cutoff(self.band_count, i, hz, self.sample_rate)
            })
    }

    /// Whether the bank prepared at `sample_rate` / `fft_size` can run it
    #[inline]
    pub fn fits(&self, sample_rate: f64, fft_size: usize) -> bool {
        self.sample_rate == sample_rate && self.fft_size == fft_size
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Running bank
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-band omni and eight signals for one block
pub struct BandSignals {
    pub omni: [Vec<f32>; MAX_BANDS],
    pub eight: [Vec<f32>; MAX_BANDS],
}

impl BandSignals {
    pub fn new(max_block: usize) -> Self {
        Self {
            omni: std::array::from_fn(|_| vec![0.0; max_block]),
            eight: std::array::from_fn(|_| vec![0.0; max_block]),
        }
    }
}

/// FFT filter bank splitting omni and eight into bands
///
/// One forward FFT per capsule per block, then one spectral multiply and
/// inverse FFT per band and capsule, each with its own overlap tail.
pub struct CrossoverFilterBank {
    plan: FftPlan,
    max_block: usize,
    sample_rate: f64,
    order: usize,
    time: Vec<f32>,
    omni_spectrum: Vec<Bin>,
    eight_spectrum: Vec<Bin>,
    work: Vec<Bin>,
    scratch: Vec<Bin>,
    omni_tails: [OverlapTail; MAX_BANDS],
    eight_tails: [OverlapTail; MAX_BANDS],
    active_bands: usize,
}

impl CrossoverFilterBank {
    pub fn new(sample_rate: f64, max_block: usize, order: usize) -> Self {
        let max_block = max_block.max(1);
        let plan = FftPlan::new(fft_size_for(max_block, order + 1));
        let size = plan.size();
        Self {
            time: plan.make_time_buffer(),
            omni_spectrum: plan.make_spectrum(),
            eight_spectrum: plan.make_spectrum(),
            work: plan.make_spectrum(),
            scratch: plan.make_scratch(),
            omni_tails: std::array::from_fn(|_| OverlapTail::new(size)),
            eight_tails: std::array::from_fn(|_| OverlapTail::new(size)),
            plan,
            max_block,
            sample_rate,
            order,
            active_bands: 0,
        }
    }

    /// Plan shared with designs built for this bank
    pub fn plan(&self) -> &FftPlan {
        &self.plan
    }

    pub fn fft_size(&self) -> usize {
        self.plan.size()
    }

    pub fn max_block(&self) -> usize {
        self.max_block
    }

    pub fn latency(&self) -> usize {
        self.order / 2
    }

    /// Split one block (`len <= max_block`) into `design.band_count()` bands
    pub fn process(
        &mut self,
        design: &CrossoverDesign,
        omni: &[f32],
        eight: &[f32],
        bands: &mut BandSignals,
    ) {
        let len = omni.len().min(eight.len()).min(self.max_block);
        let band_count = design.band_count();

        if !design.fits(self.sample_rate, self.plan.size()) {
            for band in 0..MAX_BANDS {
                bands.omni[band][..len].fill(0.0);
                bands.eight[band][..len].fill(0.0);
            }
            return;
        }

        if band_count != self.active_bands {
            // Dropped bands hand their pending output to the new top band
            if band_count < self.active_bands {
                for tails in [&mut self.omni_tails, &mut self.eight_tails] {
                    let (kept, dropped) = tails.split_at_mut(band_count);
                    let top = &mut kept[band_count - 1];
                    for tail in &dropped[..self.active_bands - band_count] {
                        top.absorb(tail);
                    }
                }
            }
            for band in band_count.min(self.active_bands)..MAX_BANDS {
                self.omni_tails[band].clear();
                self.eight_tails[band].clear();
            }
            self.active_bands = band_count;
        }

        self.time[..len].copy_from_slice(&omni[..len]);
        self.time[len..].fill(0.0);
        self.plan
            .forward(&mut self.time, &mut self.omni_spectrum, &mut self.scratch);

        self.time[..len].copy_from_slice(&eight[..len]);
        self.time[len..].fill(0.0);
        self.plan
            .forward(&mut self.time, &mut self.eight_spectrum, &mut self.scratch);

        for band in 0..band_count {
            let kernel = &design.band_spectra[band];

            kernel.apply(&self.omni_spectrum, &mut self.work);
            self.plan
                .inverse(&mut self.work, &mut self.time, &mut self.scratch);
            self.omni_tails[band].add_and_emit(&self.time, &mut bands.omni[band][..len]);

            kernel.apply(&self.eight_spectrum, &mut self.work);
            self.plan
                .inverse(&mut self.work, &mut self.time, &mut self.scratch);
            self.eight_tails[band].add_and_emit(&self.time, &mut bands.eight[band][..len]);
        }

        for band in band_count..MAX_BANDS {
            bands.omni[band][..len].fill(0.0);
            bands.eight[band][..len].fill(0.0);
        }
    }

    /// Drop every pending tail
    pub fn reset(&mut self) {
        for tail in self.omni_tails.iter_mut().chain(self.eight_tails.iter_mut()) {
            tail.clear();
        }
    }
}
