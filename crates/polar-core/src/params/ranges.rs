//! Crossover lookup tables and control ranges
//!
//! Every band count has its own default crossover set and a permitted
//! `[start, end]` range per boundary. The ranges for one band count are
//! disjoint and ascending, so clamping each boundary into its range keeps
//! the crossovers strictly increasing.

use crate::types::{MAX_BANDS, MIN_BANDS};

/// Band gain range in dB
pub const GAIN_MIN_DB: f32 = -24.0;
pub const GAIN_MAX_DB: f32 = 18.0;

/// Proximity control range (0 = no compensation)
pub const PROXIMITY_MIN: f32 = -1.0;
pub const PROXIMITY_MAX: f32 = 1.0;

const INIT_XOVER_FREQS_2B: [f32; 1] = [1000.0];
const INIT_XOVER_FREQS_3B: [f32; 2] = [250.0, 3000.0];
const INIT_XOVER_FREQS_4B: [f32; 3] = [200.0, 1000.0, 5000.0];
const INIT_XOVER_FREQS_5B: [f32; 4] = [150.0, 600.0, 2600.0, 8000.0];

const XOVER_RANGE_2B: [(f32, f32); 1] = [(120.0, 12000.0)];
const XOVER_RANGE_3B: [(f32, f32); 2] = [(120.0, 1000.0), (2000.0, 12000.0)];
const XOVER_RANGE_4B: [(f32, f32); 3] = [(120.0, 450.0), (900.0, 2500.0), (4000.0, 12000.0)];
const XOVER_RANGE_5B: [(f32, f32); 4] = [
    (120.0, 200.0),
    (500.0, 1100.0),
    (2200.0, 4000.0),
    (7000.0, 12000.0),
];

/// Clamp a requested band count into the supported range
#[inline]
pub fn clamp_band_count(count: usize) -> usize {
    count.clamp(MIN_BANDS, MAX_BANDS)
}

/// Default crossover frequencies for a band count
pub fn default_crossovers(band_count: usize) -> &'static [f32] {
    match clamp_band_count(band_count) {
        2 => &INIT_XOVER_FREQS_2B,
        3 => &INIT_XOVER_FREQS_3B,
        4 => &INIT_XOVER_FREQS_4B,
        _ => &INIT_XOVER_FREQS_5B,
    }
}

/// Permitted range of one crossover boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverRange {
    /// Lowest permitted frequency in Hz
    pub start: f32,
    /// Highest permitted frequency in Hz
    pub end: f32,
}

impl CrossoverRange {
    /// Look up the range of boundary `index` for `band_count` bands
    ///
    /// Returns `None` for boundaries that don't exist at that band count.
    pub fn lookup(band_count: usize, index: usize) -> Option<Self> {
        let table: &[(f32, f32)] = match clamp_band_count(band_count) {
            2 => &XOVER_RANGE_2B,
            3 => &XOVER_RANGE_3B,
            4 => &XOVER_RANGE_4B,
            _ => &XOVER_RANGE_5B,
        };
        table
            .get(index)
            .map(|&(start, end)| Self { start, end })
    }

    /// Clamp a frequency into this range (NaN maps to the start)
    #[inline]
    pub fn clamp(&self, hz: f32) -> f32 {
        if hz.is_nan() {
            return self.start;
        }
        hz.clamp(self.start, self.end)
    }

    /// Whether a frequency lies inside this range
    #[inline]
    pub fn contains(&self, hz: f32) -> bool {
        hz >= self.start && hz <= self.end
    }

    /// Map a frequency to 0..1 on a logarithmic scale across the range
    pub fn hz_to_normalized(&self, hz: f32) -> f32 {
        let hz = self.clamp(hz);
        (hz / self.start).ln() / (self.end / self.start).ln()
    }

    /// Map a 0..1 slider position back to a frequency
    pub fn hz_from_normalized(&self, value: f32) -> f32 {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.clamp(self.start * (self.end / self.start).powf(value))
    }
}
