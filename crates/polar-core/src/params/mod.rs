//! Live parameter set shared between the control thread and the audio thread
//!
//! - `ranges`: per-band-count crossover defaults and permitted ranges
//! - `snapshot`: the immutable `ParameterSnapshot` read by the audio thread
//! - `store`: the control-side `ParameterStore` that clamps writes and
//!   publishes snapshots atomically
//! - `preset`: the flat 27-field preset schema
//! - `sync`: sync channels linking the stores of several engines

pub mod preset;
pub mod ranges;
mod snapshot;
mod store;
pub mod sync;

pub use preset::{PresetLoad, PresetWarning, PresetWarningKind, PRESET_FIELDS};
pub use ranges::{CrossoverRange, GAIN_MAX_DB, GAIN_MIN_DB, PROXIMITY_MAX, PROXIMITY_MIN};
pub use snapshot::{BandParams, BandView, ParameterSnapshot};
pub use store::{AbLayer, ChangeFlags, ParameterStore};
pub use sync::{SyncChannel, SyncRegistry, SYNC_CHANNELS};
