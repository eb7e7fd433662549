//! Control-side parameter store
//!
//! The store owns the authoritative `ParameterSnapshot`. Every accepted write
//! is clamped, then the whole snapshot is published through a
//! `basedrop::SharedCell`. The audio thread grabs the current pointer once per
//! block, so it sees either the old or the new snapshot, never a mix.
//!
//! Replaced snapshots are dropped through the basedrop collector, so even
//! when the audio thread holds the last reference nothing is freed there.
//!
//! A store can join a sync channel (see `sync`); its writes then reach every
//! other store on that channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use basedrop::{Handle, Shared, SharedCell};

use super::snapshot::ParameterSnapshot;
use super::sync::{SyncChannel, SyncRegistry};
use crate::types::{EqMode, MAX_BANDS};

/// Change notifications for the UI collaborator
///
/// The store raises flags; the UI reads and clears them with the `take_*`
/// methods. All flags start raised so a freshly opened UI paints everything.
#[derive(Debug)]
pub struct ChangeFlags {
    repaint_directivity_eq: AtomicBool,
    band_count_changed: AtomicBool,
    zero_delay_changed: AtomicBool,
    eq_mode_changed: AtomicBool,
}

impl ChangeFlags {
    pub fn new() -> Self {
        Self {
            repaint_directivity_eq: AtomicBool::new(true),
            band_count_changed: AtomicBool::new(true),
            zero_delay_changed: AtomicBool::new(true),
            eq_mode_changed: AtomicBool::new(true),
        }
    }

    /// Band parameters changed (gain, directivity, solo/mute, crossovers)
    #[inline]
    pub fn take_repaint(&self) -> bool {
        self.repaint_directivity_eq.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn take_band_count_changed(&self) -> bool {
        self.band_count_changed.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn take_zero_delay_changed(&self) -> bool {
        self.zero_delay_changed.swap(false, Ordering::AcqRel)
    }

    #[inline]
    pub fn take_eq_mode_changed(&self) -> bool {
        self.eq_mode_changed.swap(false, Ordering::AcqRel)
    }

    fn raise_repaint(&self) {
        self.repaint_directivity_eq.store(true, Ordering::Release);
    }

    fn raise_band_count(&self) {
        self.band_count_changed.store(true, Ordering::Release);
        self.raise_repaint();
    }

    fn raise_zero_delay(&self) {
        self.zero_delay_changed.store(true, Ordering::Release);
    }

    fn raise_eq_mode(&self) {
        self.eq_mode_changed.store(true, Ordering::Release);
    }
}

impl Default for ChangeFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// A/B comparison layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AbLayer {
    #[default]
    A = 0,
    B = 1,
}

impl AbLayer {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn other(self) -> Self {
        match self {
            AbLayer::A => AbLayer::B,
            AbLayer::B => AbLayer::A,
        }
    }
}

/// A store's place in a sync group
struct SyncMembership {
    registry: Arc<SyncRegistry>,
    channel: SyncChannel,
    /// Group generation this store last matched
    seen: u64,
}

/// Authoritative parameter set, owned by the control thread
pub struct ParameterStore {
    current: ParameterSnapshot,
    published: Arc<SharedCell<ParameterSnapshot>>,
    handle: Handle,
    flags: Arc<ChangeFlags>,
    /// Stored state of each A/B layer (the active one is refreshed on switch)
    layers: [ParameterSnapshot; 2],
    active_layer: AbLayer,
    sync: Option<SyncMembership>,
}

impl ParameterStore {
    /// Create a store with default parameters
    pub fn new(handle: &Handle) -> Self {
        Self::with_snapshot(handle, ParameterSnapshot::default())
    }

    /// Create a store from an initial snapshot (sanitized first)
    pub fn with_snapshot(handle: &Handle, mut snapshot: ParameterSnapshot) -> Self {
        snapshot.sanitize();
        Self {
            current: snapshot,
            published: Arc::new(SharedCell::new(Shared::new(handle, snapshot))),
            handle: handle.clone(),
            flags: Arc::new(ChangeFlags::new()),
            layers: [snapshot; 2],
            active_layer: AbLayer::A,
            sync: None,
        }
    }

    /// Current parameters as seen by the control thread
    #[inline]
    pub fn snapshot(&self) -> &ParameterSnapshot {
        &self.current
    }

    /// The cell the audio thread reads snapshots from
    pub fn published(&self) -> Arc<SharedCell<ParameterSnapshot>> {
        Arc::clone(&self.published)
    }

    /// Change notification flags (shared with the UI)
    pub fn flags(&self) -> Arc<ChangeFlags> {
        Arc::clone(&self.flags)
    }

    fn publish(&self) {
        self.published.set(Shared::new(&self.handle, self.current));
    }

    fn update(&mut self, apply: impl FnOnce(&mut ParameterSnapshot) -> bool) -> bool {
        self.pull_sync();
        let changed = apply(&mut self.current);
        if changed {
            self.publish();
            self.push_sync();
        }
        changed
    }

    /// Set the active band count (resets crossovers to that count's defaults)
    pub fn set_band_count(&mut self, count: usize) -> bool {
        let changed = self.update(|s| s.set_band_count(count));
        if changed {
            self.flags.raise_band_count();
        }
        changed
    }

    /// Set crossover `index` in Hz, clamped to its permitted range
    pub fn set_crossover(&mut self, index: usize, hz: f32) -> bool {
        let changed = self.update(|s| s.set_crossover(index, hz));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_gain_db(&mut self, band: usize, db: f32) -> bool {
        let changed = self.update(|s| s.set_gain_db(band, db));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_directivity(&mut self, band: usize, value: f32) -> bool {
        let changed = self.update(|s| s.set_directivity(band, value));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_solo(&mut self, band: usize, solo: bool) -> bool {
        let changed = self.update(|s| s.set_solo(band, solo));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_mute(&mut self, band: usize, mute: bool) -> bool {
        let changed = self.update(|s| s.set_mute(band, mute));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_eq_mode(&mut self, mode: EqMode) -> bool {
        let changed = self.update(|s| {
            let changed = s.eq_mode != mode;
            s.eq_mode = mode;
            changed
        });
        if changed {
            self.flags.raise_eq_mode();
        }
        changed
    }

    pub fn set_proximity(&mut self, value: f32) -> bool {
        let changed = self.update(|s| s.set_proximity(value));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_allow_backwards(&mut self, allow: bool) -> bool {
        let changed = self.update(|s| s.set_allow_backwards(allow));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    pub fn set_zero_delay(&mut self, enabled: bool) -> bool {
        let changed = self.update(|s| {
            let changed = s.zero_delay != enabled;
            s.zero_delay = enabled;
            changed
        });
        if changed {
            self.flags.raise_zero_delay();
        }
        changed
    }

    /// Move all active band gains by `delta_db`
    pub fn trim_gains(&mut self, delta_db: f32) -> bool {
        let changed = self.update(|s| s.trim_gains(delta_db));
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    /// Write several directivities in one publish
    ///
    /// `None` leaves a band untouched. Values are clamped to the permitted
    /// range.
    pub fn apply_directivities(&mut self, values: &[Option<f32>; MAX_BANDS]) -> bool {
        let changed = self.update(|s| {
            let mut changed = false;
            for (band, value) in values.iter().enumerate() {
                if let Some(value) = value {
                    changed |= s.set_directivity(band, *value);
                }
            }
            changed
        });
        if changed {
            self.flags.raise_repaint();
        }
        changed
    }

    /// Replace the whole parameter set (preset load, layer switch)
    pub fn replace(&mut self, snapshot: ParameterSnapshot) {
        self.adopt(snapshot);
        self.push_sync();
    }

    /// Install a snapshot locally; returns true if anything changed
    fn adopt(&mut self, mut snapshot: ParameterSnapshot) -> bool {
        snapshot.sanitize();
        let previous = self.current;
        if previous == snapshot {
            return false;
        }
        self.current = snapshot;
        self.publish();

        if previous.band_count != snapshot.band_count {
            self.flags.raise_band_count();
        }
        if previous.eq_mode != snapshot.eq_mode {
            self.flags.raise_eq_mode();
        }
        if previous.zero_delay != snapshot.zero_delay {
            self.flags.raise_zero_delay();
        }
        self.flags.raise_repaint();
        true
    }

    /// Currently active A/B layer
    pub fn active_layer(&self) -> AbLayer {
        self.active_layer
    }

    /// Switch to another A/B layer, stashing the current parameters
    pub fn switch_layer(&mut self, layer: AbLayer) -> bool {
        if layer == self.active_layer {
            return false;
        }
        self.layers[self.active_layer.index()] = self.current;
        self.active_layer = layer;
        let next = self.layers[layer.index()];
        self.replace(next);
        true
    }

    /// Copy the current parameters into the inactive layer
    pub fn copy_to_other_layer(&mut self) {
        self.layers[self.active_layer.other().index()] = self.current;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Sync channels
    // ═══════════════════════════════════════════════════════════════════════

    /// Join a sync channel, leaving the current one first
    ///
    /// Adopts the group's parameters if the channel already has members,
    /// else seeds the group with this store's parameters.
    pub fn join_sync(&mut self, registry: Arc<SyncRegistry>, channel: SyncChannel) {
        self.leave_sync();
        let (state, seen) = registry.join(channel, &self.current);
        self.sync = Some(SyncMembership {
            registry,
            channel,
            seen,
        });
        if let Some(state) = state {
            self.adopt_synced(state);
        }
    }

    pub fn leave_sync(&mut self) {
        if let Some(membership) = self.sync.take() {
            membership.registry.leave(membership.channel);
        }
    }

    pub fn sync_channel(&self) -> Option<SyncChannel> {
        self.sync.as_ref().map(|m| m.channel)
    }

    /// Adopt newer parameters from the sync group
    ///
    /// Returns true if anything changed.
    pub fn pull_sync(&mut self) -> bool {
        let Some(membership) = self.sync.as_mut() else {
            return false;
        };
        let Some((state, generation)) = membership
            .registry
            .newer_than(membership.channel, membership.seen)
        else {
            return false;
        };
        membership.seen = generation;
        self.adopt_synced(state)
    }

    fn adopt_synced(&mut self, mut state: ParameterSnapshot) -> bool {
        state.zero_delay = self.current.zero_delay;
        self.adopt(state)
    }

    fn push_sync(&mut self) {
        if let Some(membership) = self.sync.as_mut() {
            membership.seen = membership.registry.publish(membership.channel, &self.current);
        }
    }
}

impl Drop for ParameterStore {
    fn drop(&mut self) {
        self.leave_sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gc::gc_handle;

    fn drain(flags: &ChangeFlags) {
        flags.take_repaint();
        flags.take_band_count_changed();
        flags.take_zero_delay_changed();
        flags.take_eq_mode_changed();
    }

    #[test]
    fn test_writes_are_published() {
        let mut store = ParameterStore::new(&gc_handle());
        let cell = store.published();

        store.set_gain_db(1, -6.0);
        store.set_band_count(3);
        store.set_crossover(0, 5000.0);

        let seen = cell.get();
        assert_eq!(seen.bands[1].gain_db, -6.0);
        assert_eq!(seen.band_count, 3);
        assert_eq!(seen.crossovers[0], 1000.0);
        assert_eq!(*seen, *store.snapshot());
    }

    #[test]
    fn test_flags_start_raised_and_clear_on_take() {
        let store = ParameterStore::new(&gc_handle());
        let flags = store.flags();
        assert!(flags.take_repaint());
        assert!(!flags.take_repaint());
        assert!(flags.take_band_count_changed());
        assert!(flags.take_zero_delay_changed());
        assert!(flags.take_eq_mode_changed());
    }

    #[test]
    fn test_flags_raised_by_matching_setters() {
        let mut store = ParameterStore::new(&gc_handle());
        let flags = store.flags();
        drain(&flags);

        store.set_eq_mode(EqMode::DiffuseField);
        assert!(flags.take_eq_mode_changed());
        assert!(!flags.take_band_count_changed());

        store.set_band_count(2);
        assert!(flags.take_band_count_changed());
        assert!(flags.take_repaint());

        store.set_zero_delay(true);
        assert!(flags.take_zero_delay_changed());
        assert!(!flags.take_repaint());

        // No-op write raises nothing
        store.set_zero_delay(true);
        assert!(!flags.take_zero_delay_changed());

        store.set_proximity(0.4);
        assert!(flags.take_repaint());
        store.set_proximity(0.4);
        assert!(!flags.take_repaint());
    }

    #[test]
    fn test_apply_directivities_single_publish_clamped() {
        let mut store = ParameterStore::new(&gc_handle());
        let values = [Some(-0.5), None, Some(0.25), Some(2.0), None];
        assert!(store.apply_directivities(&values));

        let seen = store.published().get();
        assert_eq!(seen.bands[0].directivity, 0.0);
        assert_eq!(seen.bands[1].directivity, 0.0);
        assert_eq!(seen.bands[2].directivity, 0.25);
        assert_eq!(seen.bands[3].directivity, 1.0);
    }

    #[test]
    fn test_ab_layers() {
        let mut store = ParameterStore::new(&gc_handle());
        store.set_gain_db(0, 3.0);
        assert!(store.switch_layer(AbLayer::B));
        // B starts from the initial state
        assert_eq!(store.snapshot().bands[0].gain_db, 0.0);

        store.set_gain_db(0, -9.0);
        store.switch_layer(AbLayer::A);
        assert_eq!(store.snapshot().bands[0].gain_db, 3.0);
        store.switch_layer(AbLayer::B);
        assert_eq!(store.snapshot().bands[0].gain_db, -9.0);
        assert!(!store.switch_layer(AbLayer::B));

        store.copy_to_other_layer();
        store.switch_layer(AbLayer::A);
        assert_eq!(store.snapshot().bands[0].gain_db, -9.0);
    }

    fn synced_pair(
        registry: &Arc<SyncRegistry>,
        number: usize,
    ) -> (ParameterStore, ParameterStore) {
        let channel = SyncChannel::new(number).unwrap();
        let mut first = ParameterStore::new(&gc_handle());
        let mut second = ParameterStore::new(&gc_handle());
        first.join_sync(Arc::clone(registry), channel);
        second.join_sync(Arc::clone(registry), channel);
        (first, second)
    }

    #[test]
    fn test_sync_join_adopts_group_state() {
        let registry = Arc::new(SyncRegistry::new());
        let channel = SyncChannel::new(1).unwrap();
        let mut first = ParameterStore::new(&gc_handle());
        first.set_gain_db(2, -3.0);
        first.join_sync(Arc::clone(&registry), channel);

        let mut second = ParameterStore::new(&gc_handle());
        let flags = second.flags();
        drain(&flags);
        second.join_sync(Arc::clone(&registry), channel);
        assert_eq!(second.sync_channel(), Some(channel));
        assert_eq!(second.snapshot().bands[2].gain_db, -3.0);
        assert_eq!(second.published().get().bands[2].gain_db, -3.0);
        assert!(flags.take_repaint());
    }

    #[test]
    fn test_sync_writes_reach_other_members() {
        let registry = Arc::new(SyncRegistry::new());
        let (mut first, mut second) = synced_pair(&registry, 1);

        first.set_band_count(3);
        first.set_directivity(1, 0.6);
        assert!(second.pull_sync());
        assert_eq!(second.snapshot().band_count, 3);
        assert_eq!(second.snapshot().bands[1].directivity, 0.6);
        assert!(!second.pull_sync());

        // A write pulls first, so the other member's edits are not lost
        second.set_mute(0, true);
        assert_eq!(second.snapshot().band_count, 3);
        first.set_gain_db(2, 2.0);
        assert!(first.snapshot().bands[0].mute);
        assert_eq!(first.snapshot().bands[2].gain_db, 2.0);
    }

    #[test]
    fn test_sync_keeps_zero_delay_local() {
        let registry = Arc::new(SyncRegistry::new());
        let (mut first, mut second) = synced_pair(&registry, 2);
        first.set_zero_delay(true);
        first.set_eq_mode(EqMode::FreeField);
        second.pull_sync();
        assert!(!second.snapshot().zero_delay);
        assert_eq!(second.snapshot().eq_mode, EqMode::FreeField);
    }

    #[test]
    fn test_sync_leave_and_drop() {
        let registry = Arc::new(SyncRegistry::new());
        let channel = SyncChannel::new(3).unwrap();
        let (mut first, second) = synced_pair(&registry, 3);
        assert_eq!(registry.members(channel), 2);

        first.leave_sync();
        assert_eq!(first.sync_channel(), None);
        first.set_gain_db(0, 5.0);
        drop(second);
        assert_eq!(registry.members(channel), 0);
        assert!(!first.pull_sync());
    }

    #[test]
    fn test_replace_sanitizes() {
        let mut store = ParameterStore::new(&gc_handle());
        let mut snapshot = ParameterSnapshot {
            band_count: 3,
            ..Default::default()
        };
        snapshot.crossovers[0] = 5000.0;
        snapshot.bands[0].directivity = -1.0;
        store.replace(snapshot);
        assert_eq!(store.snapshot().crossovers[0], 1000.0);
        assert_eq!(store.snapshot().bands[0].directivity, 0.0);
    }
}
