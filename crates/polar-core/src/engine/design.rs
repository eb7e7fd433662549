//! Crossover design publication
//!
//! Designs are built off the audio thread (by `prepare` or the controller) and
//! swapped into a `SharedCell`. The processor compares generations once per
//! block and adopts a newer design if it fits its prepared FFT size.

use std::sync::atomic::{AtomicU64, Ordering};

use basedrop::{Handle, Shared, SharedCell};

use crate::dsp::CrossoverDesign;

/// Latest crossover design plus a generation counter
pub struct DesignSlot {
    cell: SharedCell<Option<CrossoverDesign>>,
    generation: AtomicU64,
}

impl DesignSlot {
    pub fn new(handle: &Handle) -> Self {
        Self {
            cell: SharedCell::new(Shared::new(handle, None)),
            generation: AtomicU64::new(0),
        }
    }

    /// Reserve the generation number for a new design
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Swap in a new design; returns the value that was stored
    pub fn publish(
        &self,
        handle: &Handle,
        design: CrossoverDesign,
    ) -> Shared<Option<CrossoverDesign>> {
        let shared = Shared::new(handle, Some(design));
        self.cell.set(Shared::clone(&shared));
        shared
    }

    /// Current design (RT-safe: bumps a reference count)
    #[inline]
    pub fn latest(&self) -> Shared<Option<CrossoverDesign>> {
        self.cell.get()
    }
}
