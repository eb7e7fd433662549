//! Signal processing building blocks
//!
//! Everything in here is allocation-free once prepared:
//! - `fft`: FFT plans, kernel spectra and overlap-add tails
//! - `convolution`: single-kernel block convolver with tail-preserving resize
//! - `field_eq`: free-field / diffuse-field capsule correction
//! - `crossover`: linear-phase crossover design and the running filter bank
//! - `pattern`: per-band omni/eight blending with gain, mute and solo
//! - `proximity`: first-order proximity-effect shelf

pub mod convolution;
pub mod crossover;
pub mod eq_tables;
pub mod fft;
pub mod field_eq;
pub mod pattern;
pub mod proximity;

pub use convolution::{resample_ir, ConvolutionEngine};
pub use crossover::{
    design_lowpass, effective_cutoff, BandSignals, CrossoverDesign, CrossoverFilter,
    CrossoverFilterBank,
};
pub use fft::{fft_size_for, FftPlan};
pub use field_eq::FieldEqualizer;
pub use pattern::{mix_weights, PolarPatternSynthesizer};
pub use proximity::{ProximityCompensationFilter, ShelfCoeffs};
