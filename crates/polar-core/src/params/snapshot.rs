//! Immutable parameter snapshot
//!
//! The audio thread only ever sees whole snapshots. All clamping lives here so
//! the store, the preset loader and the optimizer share one set of rules.

use serde::{Deserialize, Serialize};

use super::ranges::{
    clamp_band_count, default_crossovers, CrossoverRange, GAIN_MAX_DB, GAIN_MIN_DB, PROXIMITY_MAX,
    PROXIMITY_MIN,
};
use crate::types::{EqMode, MAX_BANDS, MAX_CROSSOVERS};

/// Per-band controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandParams {
    /// Band gain in dB
    pub gain_db: f32,
    /// Directivity factor: +1 omni, 0 cardioid, -1 figure-of-eight
    pub directivity: f32,
    pub solo: bool,
    pub mute: bool,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            gain_db: 0.0,
            directivity: 0.0,
            solo: false,
            mute: false,
        }
    }
}

/// Everything the UI can see and change, as one value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    /// Number of active bands (2-5)
    pub band_count: usize,
    /// Crossover frequencies in Hz; only the first `band_count - 1` are active
    pub crossovers: [f32; MAX_CROSSOVERS],
    pub bands: [BandParams; MAX_BANDS],
    pub eq_mode: EqMode,
    /// Proximity compensation amount (-1..1, 0 = off)
    pub proximity: f32,
    /// Allow directivity below 0 (towards figure-of-eight)
    pub allow_backwards: bool,
    /// Bypass the crossover bank for zero latency
    pub zero_delay: bool,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        let mut crossovers = [0.0; MAX_CROSSOVERS];
        crossovers.copy_from_slice(default_crossovers(MAX_BANDS));
        Self {
            band_count: MAX_BANDS,
            crossovers,
            bands: [BandParams::default(); MAX_BANDS],
            eq_mode: EqMode::Off,
            proximity: 0.0,
            allow_backwards: false,
            zero_delay: false,
        }
    }
}

/// Read-only view of one band for the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandView {
    pub index: usize,
    /// Lower band edge in Hz (0 for the lowest band)
    pub lower_hz: f32,
    /// Upper band edge in Hz (None for the highest band)
    pub upper_hz: Option<f32>,
    pub gain_db: f32,
    pub directivity: f32,
    pub solo: bool,
    pub mute: bool,
    /// Whether the band reaches the output after mute/solo gating
    pub audible: bool,
}

impl ParameterSnapshot {
    /// Active crossover frequencies (`band_count - 1` entries)
    #[inline]
    pub fn active_crossovers(&self) -> &[f32] {
        &self.crossovers[..self.band_count - 1]
    }

    /// Permitted directivity interval given the backwards flag
    #[inline]
    pub fn directivity_range(&self) -> (f32, f32) {
        if self.allow_backwards {
            (-1.0, 1.0)
        } else {
            (0.0, 1.0)
        }
    }

    /// Clamp a directivity into the permitted interval (NaN maps to cardioid)
    #[inline]
    pub fn clamp_directivity(&self, value: f32) -> f32 {
        let (lo, hi) = self.directivity_range();
        if value.is_nan() {
            return 0.0_f32.clamp(lo, hi);
        }
        value.clamp(lo, hi)
    }

    /// Whether any active band is soloed
    pub fn any_solo(&self) -> bool {
        self.bands[..self.band_count].iter().any(|b| b.solo)
    }

    /// Whether band `index` reaches the output after mute and solo gating
    ///
    /// Mute always wins. With any solo active, only soloed bands pass.
    pub fn band_audible(&self, index: usize) -> bool {
        if index >= self.band_count {
            return false;
        }
        let band = &self.bands[index];
        if band.mute {
            return false;
        }
        !self.any_solo() || band.solo
    }

    /// Reset the active crossovers to the defaults for the band count
    pub fn reset_crossovers(&mut self) {
        let defaults = default_crossovers(self.band_count);
        self.crossovers[..defaults.len()].copy_from_slice(defaults);
    }

    /// Set the band count, resetting crossovers when it changes
    pub fn set_band_count(&mut self, count: usize) -> bool {
        let count = clamp_band_count(count);
        if count == self.band_count {
            return false;
        }
        self.band_count = count;
        self.reset_crossovers();
        true
    }

    /// Set one crossover, clamped into its band-count range
    ///
    /// Writes to boundaries that don't exist at the current band count are
    /// ignored.
    pub fn set_crossover(&mut self, index: usize, hz: f32) -> bool {
        let Some(range) = CrossoverRange::lookup(self.band_count, index) else {
            return false;
        };
        let hz = range.clamp(hz);
        let changed = self.crossovers[index] != hz;
        self.crossovers[index] = hz;
        changed
    }

    pub fn set_gain_db(&mut self, band: usize, db: f32) -> bool {
        let Some(params) = self.bands.get_mut(band) else {
            return false;
        };
        let db = if db.is_nan() { 0.0 } else { db.clamp(GAIN_MIN_DB, GAIN_MAX_DB) };
        let changed = params.gain_db != db;
        params.gain_db = db;
        changed
    }

    pub fn set_directivity(&mut self, band: usize, value: f32) -> bool {
        if band >= MAX_BANDS {
            return false;
        }
        let value = self.clamp_directivity(value);
        let changed = self.bands[band].directivity != value;
        self.bands[band].directivity = value;
        changed
    }

    pub fn set_solo(&mut self, band: usize, solo: bool) -> bool {
        match self.bands.get_mut(band) {
            Some(params) if params.solo != solo => {
                params.solo = solo;
                true
            }
            _ => false,
        }
    }

    pub fn set_mute(&mut self, band: usize, mute: bool) -> bool {
        match self.bands.get_mut(band) {
            Some(params) if params.mute != mute => {
                params.mute = mute;
                true
            }
            _ => false,
        }
    }

    pub fn set_proximity(&mut self, value: f32) -> bool {
        let value = if value.is_nan() { 0.0 } else { value.clamp(PROXIMITY_MIN, PROXIMITY_MAX) };
        let changed = self.proximity != value;
        self.proximity = value;
        changed
    }

    /// Toggle backwards patterns; disallowing re-clamps every directivity
    pub fn set_allow_backwards(&mut self, allow: bool) -> bool {
        if self.allow_backwards == allow {
            return false;
        }
        self.allow_backwards = allow;
        for band in 0..MAX_BANDS {
            self.bands[band].directivity = self.clamp_directivity(self.bands[band].directivity);
        }
        true
    }

    /// Move every active band gain by `delta_db`, clamping each
    pub fn trim_gains(&mut self, delta_db: f32) -> bool {
        let mut changed = false;
        for band in 0..self.band_count {
            let target = self.bands[band].gain_db + delta_db;
            changed |= self.set_gain_db(band, target);
        }
        changed
    }

    /// Force every field into its legal range
    ///
    /// Used for snapshots that didn't come through the setters (presets,
    /// A/B layers). Crossovers outside their range are clamped individually.
    pub fn sanitize(&mut self) {
        self.band_count = clamp_band_count(self.band_count);
        for index in 0..self.band_count - 1 {
            if let Some(range) = CrossoverRange::lookup(self.band_count, index) {
                self.crossovers[index] = range.clamp(self.crossovers[index]);
            }
        }
        for band in 0..MAX_BANDS {
            let gain = self.bands[band].gain_db;
            self.set_gain_db(band, gain);
            self.bands[band].directivity = self.clamp_directivity(self.bands[band].directivity);
        }
        let proximity = self.proximity;
        self.set_proximity(proximity);
    }

    /// Whether the active crossovers are strictly increasing and in range
    pub fn crossovers_valid(&self) -> bool {
        let active = self.active_crossovers();
        let in_range = active.iter().enumerate().all(|(i, &hz)| {
            CrossoverRange::lookup(self.band_count, i).is_some_and(|r| r.contains(hz))
        });
        in_range && active.windows(2).all(|w| w[0] < w[1])
    }

    /// Per-band views for the UI
    pub fn band_views(&self) -> impl Iterator<Item = BandView> + '_ {
        (0..self.band_count).map(move |index| {
            let band = &self.bands[index];
            BandView {
                index,
                lower_hz: if index == 0 { 0.0 } else { self.crossovers[index - 1] },
                upper_hz: (index + 1 < self.band_count).then(|| self.crossovers[index]),
                gain_db: band.gain_db,
                directivity: band.directivity,
                solo: band.solo,
                mute: band.mute,
                audible: self.band_audible(index),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let snapshot = ParameterSnapshot::default();
        assert_eq!(snapshot.band_count, 5);
        assert!(snapshot.crossovers_valid());
        assert_eq!(snapshot.active_crossovers(), &[150.0, 600.0, 2600.0, 8000.0]);
    }

    #[test]
    fn test_crossover_write_clamped_to_boundary_range() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(3);
        assert_eq!(snapshot.active_crossovers(), &[250.0, 3000.0]);

        snapshot.set_crossover(0, 5000.0);
        assert_eq!(snapshot.crossovers[0], 1000.0);
        assert!(snapshot.crossovers_valid());
    }

    #[test]
    fn test_crossovers_stay_valid_under_arbitrary_writes() {
        let mut snapshot = ParameterSnapshot::default();
        let writes = [
            -100.0, 0.0, 50.0, 130.0, 999.0, 5000.0, 20000.0, f32::NAN, f32::INFINITY, 300.0,
        ];
        let mut seed = 7usize;
        for bands in [2, 3, 4, 5, 3, 2, 5] {
            snapshot.set_band_count(bands);
            for _ in 0..40 {
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                let index = (seed >> 8) % 5;
                let hz = writes[(seed >> 16) % writes.len()];
                snapshot.set_crossover(index, hz);
                assert!(snapshot.crossovers_valid(), "{:?}", snapshot.active_crossovers());
            }
        }
    }

    #[test]
    fn test_band_count_change_resets_crossovers() {
        let mut snapshot = ParameterSnapshot::default();
        assert!(snapshot.set_band_count(4));
        assert_eq!(snapshot.active_crossovers(), &[200.0, 1000.0, 5000.0]);
        assert!(!snapshot.set_band_count(4));
        snapshot.set_band_count(9);
        assert_eq!(snapshot.band_count, 5);
        snapshot.set_band_count(0);
        assert_eq!(snapshot.band_count, 2);
    }

    #[test]
    fn test_inactive_boundary_write_ignored() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(2);
        let before = snapshot;
        assert!(!snapshot.set_crossover(2, 4000.0));
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_directivity_clamped_by_backwards_flag() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_directivity(0, -0.7);
        assert_eq!(snapshot.bands[0].directivity, 0.0);

        snapshot.set_allow_backwards(true);
        snapshot.set_directivity(0, -0.7);
        assert_eq!(snapshot.bands[0].directivity, -0.7);
        snapshot.set_directivity(1, 3.0);
        assert_eq!(snapshot.bands[1].directivity, 1.0);

        snapshot.set_allow_backwards(false);
        assert_eq!(snapshot.bands[0].directivity, 0.0);
    }

    #[test]
    fn test_solo_and_mute_gating() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(3);
        assert!((0..3).all(|b| snapshot.band_audible(b)));

        snapshot.set_solo(0, true);
        snapshot.set_mute(2, true);
        assert!(snapshot.band_audible(0));
        assert!(!snapshot.band_audible(1));
        assert!(!snapshot.band_audible(2));

        // Mute wins over solo
        snapshot.set_mute(0, true);
        assert!(!snapshot.band_audible(0));
    }

    #[test]
    fn test_trim_clamps_each_band() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(2);
        snapshot.set_gain_db(0, 15.0);
        snapshot.trim_gains(6.0);
        assert_eq!(snapshot.bands[0].gain_db, GAIN_MAX_DB);
        assert_eq!(snapshot.bands[1].gain_db, 6.0);
        // Inactive bands untouched
        assert_eq!(snapshot.bands[4].gain_db, 0.0);
    }

    #[test]
    fn test_sanitize() {
        let mut snapshot = ParameterSnapshot {
            band_count: 11,
            crossovers: [10.0, 99999.0, 3000.0, -4.0],
            proximity: 7.0,
            ..Default::default()
        };
        snapshot.bands[2].gain_db = -90.0;
        snapshot.bands[3].directivity = -1.0;
        snapshot.sanitize();
        assert_eq!(snapshot.band_count, 5);
        assert!(snapshot.crossovers_valid());
        assert_eq!(snapshot.proximity, 1.0);
        assert_eq!(snapshot.bands[2].gain_db, GAIN_MIN_DB);
        assert_eq!(snapshot.bands[3].directivity, 0.0);
    }

    #[test]
    fn test_band_views_edges() {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(3);
        let views: Vec<BandView> = snapshot.band_views().collect();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].lower_hz, 0.0);
        assert_eq!(views[0].upper_hz, Some(250.0));
        assert_eq!(views[2].lower_hz, 3000.0);
        assert_eq!(views[2].upper_hz, None);
    }
}
