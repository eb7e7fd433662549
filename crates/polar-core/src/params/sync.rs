//! Sync channels linking the parameters of several engine instances
//!
//! A process-wide [`SyncRegistry`] holds [`SYNC_CHANNELS`] groups. A
//! `ParameterStore` that joins a channel pushes every accepted write to its
//! group, and pulls newer group state before each of its own writes and on
//! `pull_sync`. The first member seeds an empty group; later members adopt
//! the group's state when they join. A group forgets its state once its last
//! member leaves.
//!
//! Zero-delay is not synced: it changes the latency each host compensates
//! for, so it stays per instance.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use super::snapshot::ParameterSnapshot;

/// Number of sync channels
pub const SYNC_CHANNELS: usize = 4;

static GLOBAL: OnceLock<Arc<SyncRegistry>> = OnceLock::new();

/// One sync channel, numbered 1..=SYNC_CHANNELS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncChannel(usize);

impl SyncChannel {
    /// Channel from its 1-based number
    pub fn new(number: usize) -> Option<Self> {
        (1..=SYNC_CHANNELS).contains(&number).then_some(Self(number - 1))
    }

    pub fn number(self) -> usize {
        self.0 + 1
    }
}

#[derive(Debug, Default)]
struct SyncGroup {
    state: Option<ParameterSnapshot>,
    generation: u64,
    members: usize,
}

/// Shared state of every sync channel
#[derive(Debug, Default)]
pub struct SyncRegistry {
    groups: [Mutex<SyncGroup>; SYNC_CHANNELS],
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every engine in the process
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    fn group(&self, channel: SyncChannel) -> MutexGuard<'_, SyncGroup> {
        // Groups hold plain values, so a poisoned lock is still consistent
        self.groups[channel.0]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stores currently on `channel`
    pub fn members(&self, channel: SyncChannel) -> usize {
        self.group(channel).members
    }

    /// Join `channel`
    ///
    /// Returns the group's state if it already has one (the caller adopts
    /// it), else seeds the group with `current`. Also returns the generation
    /// the caller is now in step with.
    pub(crate) fn join(
        &self,
        channel: SyncChannel,
        current: &ParameterSnapshot,
    ) -> (Option<ParameterSnapshot>, u64) {
        let mut group = self.group(channel);
        group.members += 1;
        if let Some(state) = group.state {
            return (Some(state), group.generation);
        }
        group.state = Some(*current);
        group.generation += 1;
        (None, group.generation)
    }

    pub(crate) fn leave(&self, channel: SyncChannel) {
        let mut group = self.group(channel);
        group.members = group.members.saturating_sub(1);
        if group.members == 0 {
            group.state = None;
        }
    }

    /// Store a member's new state; returns the new generation
    pub(crate) fn publish(&self, channel: SyncChannel, snapshot: &ParameterSnapshot) -> u64 {
        let mut group = self.group(channel);
        group.state = Some(*snapshot);
        group.generation += 1;
        group.generation
    }

    /// Group state if it moved past generation `seen`
    pub(crate) fn newer_than(
        &self,
        channel: SyncChannel,
        seen: u64,
    ) -> Option<(ParameterSnapshot, u64)> {
        let group = self.group(channel);
        if group.generation == seen {
            return None;
        }
        group.state.map(|state| (state, group.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_numbers() {
        assert!(SyncChannel::new(0).is_none());
        assert!(SyncChannel::new(SYNC_CHANNELS + 1).is_none());
        for number in 1..=SYNC_CHANNELS {
            assert_eq!(SyncChannel::new(number).map(SyncChannel::number), Some(number));
        }
    }

    #[test]
    fn test_first_member_seeds_group() {
        let registry = SyncRegistry::new();
        let channel = SyncChannel::new(1).unwrap();
        let mut seeded = ParameterSnapshot::default();
        seeded.set_gain_db(0, 4.0);

        let (state, generation) = registry.join(channel, &seeded);
        assert!(state.is_none());
        assert!(registry.newer_than(channel, generation).is_none());

        let (state, _) = registry.join(channel, &ParameterSnapshot::default());
        assert_eq!(state, Some(seeded));
        assert_eq!(registry.members(channel), 2);
    }

    #[test]
    fn test_publish_and_forget_on_last_leave() {
        let registry = SyncRegistry::new();
        let channel = SyncChannel::new(2).unwrap();
        let (_, seen) = registry.join(channel, &ParameterSnapshot::default());

        let mut next = ParameterSnapshot::default();
        next.set_band_count(3);
        let generation = registry.publish(channel, &next);
        assert_eq!(registry.newer_than(channel, seen), Some((next, generation)));

        registry.leave(channel);
        assert_eq!(registry.members(channel), 0);
        let (state, _) = registry.join(channel, &ParameterSnapshot::default());
        assert!(state.is_none());

        // Channels are independent
        let other = SyncChannel::new(3).unwrap();
        assert_eq!(registry.members(other), 0);
    }
}
