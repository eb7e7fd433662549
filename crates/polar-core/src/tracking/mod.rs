//! Energy tracking for the pattern optimizer
//!
//! While a recording session is active the audio thread adds each band's
//! `Σ omni²`, `Σ eight²` and `Σ omni·eight` to the accumulators of the kind
//! being recorded (disturber or signal). The control thread starts and stops
//! sessions and reads the sums once the writer is halted.
//!
//! # Handshake
//!
//! The audio thread is the only writer. Around each block it raises
//! `writer_busy`, reads `session`, accumulates if recording, then clears
//! `writer_busy`. The control thread halts it by storing `Idle` into
//! `session` and spinning until `writer_busy` is clear. All four accesses are
//! `SeqCst`, so once the spin ends no block can still be writing and every
//! later block sees `Idle`. The spin lasts at most one block's accumulation.

pub mod optimizer;

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::dsp::BandSignals;
use crate::types::MAX_BANDS;

pub use optimizer::{optimal_directivities, pattern_energy, PatternGoal};

/// Energy sums for one band
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandEnergy {
    /// Σ omni²
    pub omni: f64,
    /// Σ eight²
    pub eight: f64,
    /// Σ omni·eight
    pub cross: f64,
}

impl BandEnergy {
    /// Sums over one block of band signals
    pub fn measure(omni: &[f32], eight: &[f32]) -> Self {
        let mut e = Self::default();
        for (&x, &y) in omni.iter().zip(eight) {
            let (x, y) = (x as f64, y as f64);
            e.omni += x * x;
            e.eight += y * y;
            e.cross += x * y;
        }
        e
    }
}

/// f64 stored as bits in an `AtomicU64`
#[derive(Default)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    #[inline]
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Single-writer add
    #[inline]
    fn add(&self, value: f64) {
        self.store(self.load() + value);
    }
}

/// Running sums for one band and one recording kind
#[derive(Default)]
pub struct EnergyAccumulator {
    omni: AtomicF64,
    eight: AtomicF64,
    cross: AtomicF64,
    blocks: AtomicU64,
}

impl EnergyAccumulator {
    #[inline]
    fn add(&self, e: &BandEnergy) {
        self.omni.add(e.omni);
        self.eight.add(e.eight);
        self.cross.add(e.cross);
        self.blocks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn load(&self) -> BandEnergy {
        BandEnergy {
            omni: self.omni.load(),
            eight: self.eight.load(),
            cross: self.cross.load(),
        }
    }

    /// Blocks accumulated since the last reset
    pub fn blocks(&self) -> u64 {
        self.blocks.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.omni.store(0.0);
        self.eight.store(0.0);
        self.cross.store(0.0);
        self.blocks.store(0, Ordering::Relaxed);
    }
}

/// Which source a session records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingKind {
    Disturber,
    Signal,
}

/// Recording session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TrackingState {
    #[default]
    Idle = 0,
    RecordingDisturber = 1,
    RecordingSignal = 2,
}

impl TrackingState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => TrackingState::RecordingDisturber,
            2 => TrackingState::RecordingSignal,
            _ => TrackingState::Idle,
        }
    }

    pub fn recording(kind: RecordingKind) -> Self {
        match kind {
            RecordingKind::Disturber => TrackingState::RecordingDisturber,
            RecordingKind::Signal => TrackingState::RecordingSignal,
        }
    }

    /// Kind being recorded, if any
    pub fn kind(self) -> Option<RecordingKind> {
        match self {
            TrackingState::Idle => None,
            TrackingState::RecordingDisturber => Some(RecordingKind::Disturber),
            TrackingState::RecordingSignal => Some(RecordingKind::Signal),
        }
    }
}

/// Tracking state shared between the audio thread and the controller
#[derive(Default)]
pub struct TrackingShared {
    session: AtomicU8,
    writer_busy: AtomicBool,
    disturber: [EnergyAccumulator; MAX_BANDS],
    signal: [EnergyAccumulator; MAX_BANDS],
    disturber_recorded: AtomicBool,
    signal_recorded: AtomicBool,
}

impl TrackingShared {
    pub fn new() -> Self {
        Self::default()
    }

    fn accumulators(&self, kind: RecordingKind) -> &[EnergyAccumulator; MAX_BANDS] {
        match kind {
            RecordingKind::Disturber => &self.disturber,
            RecordingKind::Signal => &self.signal,
        }
    }

    fn recorded_flag(&self, kind: RecordingKind) -> &AtomicBool {
        match kind {
            RecordingKind::Disturber => &self.disturber_recorded,
            RecordingKind::Signal => &self.signal_recorded,
        }
    }

    // ─── Audio thread ────────────────────────────────────────────────────────

    /// Accumulate one block of band signals if a session is active
    ///
    /// Called once per processed block. Never blocks or allocates.
    pub fn observe(&self, bands: &BandSignals, band_count: usize, len: usize) {
        self.writer_busy.store(true, Ordering::SeqCst);
        if let Some(kind) = TrackingState::from_u8(self.session.load(Ordering::SeqCst)).kind() {
            let accumulators = self.accumulators(kind);
            for band in 0..band_count.min(MAX_BANDS) {
                let e = BandEnergy::measure(&bands.omni[band][..len], &bands.eight[band][..len]);
                accumulators[band].add(&e);
            }
        }
        self.writer_busy.store(false, Ordering::SeqCst);
    }

    // ─── Control thread ──────────────────────────────────────────────────────

    /// Stop accumulation and wait out a block in flight
    ///
    /// Returns the state that was active.
    pub fn halt_writer(&self) -> TrackingState {
        let previous = self.session.swap(TrackingState::Idle as u8, Ordering::SeqCst);
        while self.writer_busy.load(Ordering::SeqCst) {
            std::hint::spin_loop();
        }
        TrackingState::from_u8(previous)
    }

    /// Begin a session, discarding any active one
    ///
    /// The chosen kind's sums are zeroed and its recorded flag cleared. The
    /// previous session's partial sums are zeroed too.
    pub fn begin(&self, kind: RecordingKind) {
        if let Some(active) = self.halt_writer().kind() {
            for acc in self.accumulators(active) {
                acc.reset();
            }
            self.recorded_flag(active).store(false, Ordering::SeqCst);
        }
        for acc in self.accumulators(kind) {
            acc.reset();
        }
        self.recorded_flag(kind).store(false, Ordering::SeqCst);
        self.session
            .store(TrackingState::recording(kind) as u8, Ordering::SeqCst);
    }

    /// End the active session, marking its kind recorded
    ///
    /// Returns the kind that was being recorded, if any.
    pub fn finish(&self) -> Option<RecordingKind> {
        let kind = self.halt_writer().kind()?;
        self.recorded_flag(kind).store(true, Ordering::SeqCst);
        Some(kind)
    }

    pub fn state(&self) -> TrackingState {
        TrackingState::from_u8(self.session.load(Ordering::SeqCst))
    }

    pub fn is_recorded(&self, kind: RecordingKind) -> bool {
        self.recorded_flag(kind).load(Ordering::SeqCst)
    }

    /// Current sums for every band
    ///
    /// Only stable while no session of that kind is active.
    pub fn energies(&self, kind: RecordingKind) -> [BandEnergy; MAX_BANDS] {
        let accumulators = self.accumulators(kind);
        std::array::from_fn(|band| accumulators[band].load())
    }

    /// Blocks accumulated for a kind (taken from band 0)
    pub fn blocks(&self, kind: RecordingKind) -> u64 {
        self.accumulators(kind)[0].blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn bands_with(len: usize, omni: f32, eight: f32) -> BandSignals {
        let mut bands = BandSignals::new(len);
        for band in 0..MAX_BANDS {
            bands.omni[band].fill(omni);
            bands.eight[band].fill(eight);
        }
        bands
    }

    #[test]
    fn test_measure() {
        let e = BandEnergy::measure(&[1.0, 2.0], &[3.0, -1.0]);
        assert_eq!(e, BandEnergy { omni: 5.0, eight: 10.0, cross: 1.0 });
    }

    #[test]
    fn test_idle_ignores_blocks() {
        let shared = TrackingShared::new();
        shared.observe(&bands_with(16, 1.0, 1.0), 5, 16);
        assert_eq!(shared.energies(RecordingKind::Disturber)[0], BandEnergy::default());
        assert_eq!(shared.blocks(RecordingKind::Signal), 0);
    }

    #[test]
    fn test_session_lifecycle() {
        let shared = TrackingShared::new();
        let bands = bands_with(4, 1.0, 0.5);

        shared.begin(RecordingKind::Disturber);
        assert_eq!(shared.state(), TrackingState::RecordingDisturber);
        assert!(!shared.is_recorded(RecordingKind::Disturber));

        let mut last = 0.0;
        for _ in 0..3 {
            shared.observe(&bands, 3, 4);
            let e = shared.energies(RecordingKind::Disturber)[1];
            assert!(e.omni >= last);
            last = e.omni;
        }
        assert_eq!(shared.blocks(RecordingKind::Disturber), 3);
        assert_eq!(shared.energies(RecordingKind::Disturber)[1].omni, 12.0);
        // Bands beyond the active count stay empty
        assert_eq!(shared.energies(RecordingKind::Disturber)[4], BandEnergy::default());

        assert_eq!(shared.finish(), Some(RecordingKind::Disturber));
        assert_eq!(shared.state(), TrackingState::Idle);
        assert!(shared.is_recorded(RecordingKind::Disturber));

        // Nothing accumulates after stop
        shared.observe(&bands, 3, 4);
        assert_eq!(shared.energies(RecordingKind::Disturber)[1].omni, 12.0);
        assert_eq!(shared.finish(), None);
    }

    #[test]
    fn test_restart_zeroes_sums() {
        let shared = TrackingShared::new();
        let bands = bands_with(4, 1.0, 1.0);
        shared.begin(RecordingKind::Signal);
        shared.observe(&bands, 2, 4);
        shared.finish();
        assert!(shared.is_recorded(RecordingKind::Signal));

        shared.begin(RecordingKind::Signal);
        assert!(!shared.is_recorded(RecordingKind::Signal));
        assert_eq!(shared.energies(RecordingKind::Signal)[0], BandEnergy::default());
    }

    #[test]
    fn test_switching_session_discards_active_kind() {
        let shared = TrackingShared::new();
        let bands = bands_with(4, 1.0, 1.0);

        shared.begin(RecordingKind::Disturber);
        shared.observe(&bands, 2, 4);
        shared.finish();

        // Start signal, then jump straight into a new disturber recording
        shared.begin(RecordingKind::Signal);
        shared.observe(&bands, 2, 4);
        shared.begin(RecordingKind::Disturber);

        assert!(!shared.is_recorded(RecordingKind::Signal));
        assert_eq!(shared.energies(RecordingKind::Signal)[0], BandEnergy::default());
        assert_eq!(shared.state(), TrackingState::RecordingDisturber);
    }

    #[test]
    fn test_halt_with_concurrent_writer() {
        let shared = Arc::new(TrackingShared::new());
        shared.begin(RecordingKind::Disturber);

        let writer = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                let bands = bands_with(64, 0.5, 0.25);
                for _ in 0..20000 {
                    shared.observe(&bands, 5, 64);
                }
            })
        };

        std::thread::sleep(std::time::Duration::from_millis(2));
        shared.finish();
        let frozen = shared.energies(RecordingKind::Disturber);
        let blocks = shared.blocks(RecordingKind::Disturber);
        writer.join().unwrap();

        assert_eq!(shared.energies(RecordingKind::Disturber), frozen);
        assert_eq!(shared.blocks(RecordingKind::Disturber), blocks);
        // Every band saw the same number of whole blocks
        let per_block = 64.0 * 0.25;
        assert_eq!(frozen[0].omni, blocks as f64 * per_block);
    }
}
