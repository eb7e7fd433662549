//! Control-thread side of the engine
//!
//! `PolarController` is what the UI collaborator talks to. It owns the
//! `ParameterStore`, rebuilds crossover designs when the band layout changes,
//! drives recording sessions and runs the pattern optimizer. Nothing here runs
//! on the audio thread; every result reaches the processor through a
//! published snapshot or design.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use basedrop::Handle;

use super::design::DesignSlot;
use super::status::EngineStatus;
use crate::config::EngineConfig;
use crate::dsp::{CrossoverDesign, FftPlan};
use crate::error::{PresetResult, TrackingError, TrackingResult};
use crate::params::preset::{load_preset, save_preset};
use crate::params::{
    AbLayer, BandView, ChangeFlags, CrossoverRange, ParameterSnapshot, ParameterStore,
    PresetWarning, SyncChannel, SyncRegistry,
};
use crate::tracking::{
    optimal_directivities, PatternGoal, RecordingKind, TrackingShared, TrackingState,
};
use crate::types::{EqMode, MAX_BANDS};

/// Processor configuration a design is built for
#[derive(Debug, Clone, Copy, PartialEq)]
struct DesignTarget {
    sample_rate: f64,
    fft_size: usize,
    order: usize,
}

/// Control-side handle to a running engine
pub struct PolarController {
    config: EngineConfig,
    handle: Handle,
    store: ParameterStore,
    designs: Arc<DesignSlot>,
    tracking: Arc<TrackingShared>,
    status: Arc<EngineStatus>,
    /// Plan matching the processor's bank, rebuilt when its FFT size changes
    plan: Option<FftPlan>,
}

impl PolarController {
    pub(crate) fn new(
        config: EngineConfig,
        handle: Handle,
        store: ParameterStore,
        designs: Arc<DesignSlot>,
        tracking: Arc<TrackingShared>,
        status: Arc<EngineStatus>,
    ) -> Self {
        Self {
            config,
            handle,
            store,
            designs,
            tracking,
            status,
            plan: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Readers
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn snapshot(&self) -> &ParameterSnapshot {
        self.store.snapshot()
    }

    /// Per-band view for the editor
    pub fn band_views(&self) -> Vec<BandView> {
        self.store.snapshot().band_views().collect()
    }

    /// Permitted range of crossover `index` at the current band count
    pub fn crossover_range(&self, index: usize) -> Option<CrossoverRange> {
        CrossoverRange::lookup(self.store.snapshot().band_count, index)
    }

    pub fn flags(&self) -> Arc<ChangeFlags> {
        self.store.flags()
    }

    pub fn status(&self) -> &EngineStatus {
        &self.status
    }

    /// Latency the processor currently reports, in samples
    pub fn latency_samples(&self) -> u32 {
        self.status.latency()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Parameter writes
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply a store write, redesigning if the band layout moved
    ///
    /// The layout can also move through a sync group, so every write checks.
    fn write(&mut self, apply: impl FnOnce(&mut ParameterStore) -> bool) -> bool {
        let before = *self.store.snapshot();
        let changed = apply(&mut self.store);
        self.redesign_if_layout_changed(&before);
        changed
    }

    pub fn set_band_count(&mut self, count: usize) -> bool {
        let changed = self.write(|store| store.set_band_count(count));
        if changed {
            log::info!("Band count set to {}", self.store.snapshot().band_count);
        }
        changed
    }

    pub fn set_crossover(&mut self, index: usize, hz: f32) -> bool {
        self.write(|store| store.set_crossover(index, hz))
    }

    /// Set a crossover from a 0..1 slider position (log scale within its range)
    pub fn set_crossover_normalized(&mut self, index: usize, value: f32) -> bool {
        match self.crossover_range(index) {
            Some(range) => self.set_crossover(index, range.hz_from_normalized(value)),
            None => false,
        }
    }

    pub fn set_band_gain(&mut self, band: usize, db: f32) -> bool {
        self.write(|store| store.set_gain_db(band, db))
    }

    pub fn set_directivity(&mut self, band: usize, value: f32) -> bool {
        self.write(|store| store.set_directivity(band, value))
    }

    pub fn set_solo(&mut self, band: usize, solo: bool) -> bool {
        self.write(|store| store.set_solo(band, solo))
    }

    pub fn set_mute(&mut self, band: usize, mute: bool) -> bool {
        self.write(|store| store.set_mute(band, mute))
    }

    pub fn set_eq_mode(&mut self, mode: EqMode) -> bool {
        self.write(|store| store.set_eq_mode(mode))
    }

    pub fn set_proximity(&mut self, value: f32) -> bool {
        self.write(|store| store.set_proximity(value))
    }

    pub fn set_allow_backwards(&mut self, allow: bool) -> bool {
        self.write(|store| store.set_allow_backwards(allow))
    }

    pub fn set_zero_delay(&mut self, enabled: bool) -> bool {
        let changed = self.write(|store| store.set_zero_delay(enabled));
        if changed {
            log::info!("Zero-delay mode {}", if enabled { "on" } else { "off" });
        }
        changed
    }

    /// Move every active band gain by `delta_db`
    pub fn trim_gains(&mut self, delta_db: f32) -> bool {
        self.write(|store| store.trim_gains(delta_db))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Sync channels
    // ═══════════════════════════════════════════════════════════════════════

    /// Join a sync channel in the process-wide registry, or leave with `None`
    pub fn join_sync_channel(&mut self, channel: Option<SyncChannel>) {
        let before = *self.store.snapshot();
        match channel {
            Some(channel) => {
                self.store.join_sync(SyncRegistry::global(), channel);
                log::info!("Joined sync channel {}", channel.number());
            }
            None => {
                self.store.leave_sync();
                log::info!("Left sync channel");
            }
        }
        self.redesign_if_layout_changed(&before);
    }

    pub fn sync_channel(&self) -> Option<SyncChannel> {
        self.store.sync_channel()
    }

    /// Adopt parameters written by other members of the sync channel
    ///
    /// Call from the editor's timer. Returns true if anything changed.
    pub fn poll_sync(&mut self) -> bool {
        self.write(ParameterStore::pull_sync)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // A/B layers
    // ═══════════════════════════════════════════════════════════════════════

    pub fn active_layer(&self) -> AbLayer {
        self.store.active_layer()
    }

    pub fn switch_layer(&mut self, layer: AbLayer) -> bool {
        let switched = self.write(|store| store.switch_layer(layer));
        if switched {
            log::info!("Switched to layer {:?}", layer);
        }
        switched
    }

    /// Copy the active layer's parameters into the other layer
    pub fn copy_layer(&mut self) {
        self.store.copy_to_other_layer();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Crossover design
    // ═══════════════════════════════════════════════════════════════════════

    fn redesign_if_layout_changed(&mut self, before: &ParameterSnapshot) {
        let after = self.store.snapshot();
        if before.band_count != after.band_count
            || before.active_crossovers() != after.active_crossovers()
        {
            self.redesign();
        }
    }

    fn prepared_target(&self) -> Option<DesignTarget> {
        Some(DesignTarget {
            sample_rate: self.status.sample_rate()?,
            fft_size: self.status.fft_size(),
            order: self.status.crossover_order(),
        })
    }

    /// Build and publish a design for the current band layout
    ///
    /// Does nothing before the processor is prepared; `prepare` designs for
    /// whatever parameters are current at that point.
    fn redesign(&mut self) {
        if let Some(target) = self.prepared_target() {
            self.redesign_from(target);
        }
    }

    /// Publish for `target`, then again while the processor was re-prepared
    /// in the meantime
    fn redesign_from(&mut self, mut target: DesignTarget) {
        loop {
            self.publish_design(target);
            match self.prepared_target() {
                Some(now) if now != target => {
                    log::debug!("Processor re-prepared at {} Hz, designing again", now.sample_rate);
                    target = now;
                }
                _ => break,
            }
        }
    }

    fn publish_design(&mut self, target: DesignTarget) {
        if self.plan.as_ref().map(FftPlan::size) != Some(target.fft_size) {
            self.plan = Some(FftPlan::new(target.fft_size));
        }
        let Some(plan) = self.plan.as_ref() else {
            return;
        };

        let generation = self.designs.next_generation();
        let design = CrossoverDesign::build(
            self.store.snapshot(),
            target.sample_rate,
            target.order,
            plan,
            generation,
        );
        log::debug!(
            "Publishing crossover design {}: {} bands at {:?} Hz",
            generation,
            design.band_count(),
            design.cutoffs()
        );
        self.designs.publish(&self.handle, design);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Recording & optimization
    // ═══════════════════════════════════════════════════════════════════════

    /// Start recording the disturber (`true`) or the wanted signal (`false`)
    ///
    /// An active session is stopped and its partial sums discarded.
    pub fn start_tracking(&mut self, is_disturber: bool) {
        let kind = if is_disturber {
            RecordingKind::Disturber
        } else {
            RecordingKind::Signal
        };
        self.tracking.begin(kind);
        log::info!("Recording {:?} started", kind);
    }

    /// Stop the active session, optionally applying the natural goal
    ///
    /// Disturber recordings minimize disturbance. Signal recordings maximize
    /// the signal-to-disturbance ratio when a disturber is recorded, else the
    /// signal energy. Returns the kind that was recorded.
    pub fn stop_tracking(&mut self, apply: bool) -> Option<RecordingKind> {
        let kind = self.tracking.finish()?;
        log::info!(
            "Recording {:?} stopped after {} blocks",
            kind,
            self.tracking.blocks(kind)
        );

        if apply {
            let goal = match kind {
                RecordingKind::Disturber => PatternGoal::MinimizeDisturbance,
                RecordingKind::Signal if self.disturber_recorded() => {
                    PatternGoal::MaximizeSignalToDisturbance
                }
                RecordingKind::Signal => PatternGoal::MaximizeSignal,
            };
            if let Err(e) = self.apply_optimal_pattern(goal) {
                log::warn!("Could not apply {:?}: {}", goal, e);
            }
        }
        Some(kind)
    }

    /// Compute and apply the directivities for `goal`
    ///
    /// Fails without touching any parameter if a needed recording is missing.
    pub fn apply_optimal_pattern(&mut self, goal: PatternGoal) -> TrackingResult<()> {
        let disturber = self.disturber_recorded();
        let signal = self.signal_recorded();
        match goal {
            PatternGoal::MinimizeDisturbance if !disturber => {
                return Err(TrackingError::DisturberNotRecorded)
            }
            PatternGoal::MaximizeSignal if !signal => return Err(TrackingError::SignalNotRecorded),
            PatternGoal::MaximizeSignalToDisturbance if !(disturber && signal) => {
                return Err(TrackingError::RecordingsIncomplete { disturber, signal })
            }
            _ => {}
        }

        let snapshot = *self.store.snapshot();
        let previous: [f32; MAX_BANDS] =
            std::array::from_fn(|band| snapshot.bands[band].directivity);
        let result = optimal_directivities(
            goal,
            &self.tracking.energies(RecordingKind::Disturber),
            &self.tracking.energies(RecordingKind::Signal),
            &previous,
            snapshot.band_count,
            snapshot.directivity_range(),
        );
        self.write(|store| store.apply_directivities(&result));

        log::info!(
            "Applied {:?}: {:?}",
            goal,
            &self.store.snapshot().bands[..snapshot.band_count]
                .iter()
                .map(|b| b.directivity)
                .collect::<Vec<_>>()
        );
        Ok(())
    }

    pub fn disturber_recorded(&self) -> bool {
        self.tracking.is_recorded(RecordingKind::Disturber)
    }

    pub fn signal_recorded(&self) -> bool {
        self.tracking.is_recorded(RecordingKind::Signal)
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking.state()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Presets
    // ═══════════════════════════════════════════════════════════════════════

    /// Path of a named preset in the configured preset directory
    pub fn preset_path(&self, name: &str) -> PathBuf {
        self.config.preset_dir().join(format!("{}.json", name))
    }

    /// Load a preset file and apply it
    ///
    /// The zero-delay flag is left as it is; backwards patterns are enabled
    /// when the preset stores any. Returns the field-level warnings.
    pub fn load_preset(&mut self, path: &Path) -> PresetResult<Vec<PresetWarning>> {
        let load = load_preset(path)?;
        let before = *self.store.snapshot();

        let mut snapshot = load.snapshot;
        snapshot.zero_delay = before.zero_delay;
        snapshot.allow_backwards |= before.allow_backwards;
        self.write(|store| {
            store.replace(snapshot);
            true
        });

        log::info!("Preset loaded with {} warnings", load.warnings.len());
        Ok(load.warnings)
    }

    /// Save the current parameters as a preset file
    pub fn save_preset(&self, path: &Path) -> PresetResult<()> {
        save_preset(self.store.snapshot(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{create_engine, PolarProcessor};

    const BLOCK: usize = 256;

    fn run_block(processor: &mut PolarProcessor) {
        let mut first = vec![0.1; BLOCK];
        let mut second = vec![0.0; BLOCK];
        processor.process(&mut first, &mut second);
    }

    #[test]
    fn test_redesign_follows_reprepare() {
        let (mut controller, mut processor) = create_engine(EngineConfig::default());
        processor.prepare(48000.0, BLOCK);
        let stale = controller.prepared_target().unwrap();

        // The processor moves to a new rate while a write is being designed
        processor.prepare(44100.0, BLOCK);
        controller.store.set_band_count(3);
        controller.redesign_from(stale);

        let latest = controller.designs.latest();
        let design = (*latest).as_ref().unwrap();
        assert!(design.fits(44100.0, controller.status.fft_size()));
        assert_eq!(design.band_count(), 3);

        run_block(&mut processor);
        assert_eq!(controller.status().active_design(), design.generation());
    }

    #[test]
    fn test_sync_channel_links_controllers() {
        let channel = SyncChannel::new(4).unwrap();
        let (mut first, mut first_processor) = create_engine(EngineConfig::default());
        let (mut second, mut second_processor) = create_engine(EngineConfig::default());
        first_processor.prepare(48000.0, BLOCK);
        second_processor.prepare(48000.0, BLOCK);

        first.join_sync_channel(Some(channel));
        second.join_sync_channel(Some(channel));
        assert_eq!(second.sync_channel(), Some(channel));

        let adopted = second.status().active_design();
        assert!(first.set_band_count(3));
        assert!(first.set_band_gain(1, -2.0));
        assert!(second.poll_sync());
        assert_eq!(second.snapshot().band_count, 3);
        assert_eq!(second.snapshot().bands[1].gain_db, -2.0);
        assert!(!second.poll_sync());

        // The layout change reached the second processor as a new design
        run_block(&mut second_processor);
        assert!(second.status().active_design() > adopted);

        second.join_sync_channel(None);
        assert_eq!(second.sync_channel(), None);
        first.set_band_gain(1, 0.0);
        assert!(!second.poll_sync());
        assert_eq!(second.snapshot().bands[1].gain_db, -2.0);
        first.join_sync_channel(None);
    }
}
