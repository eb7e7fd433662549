//! Polar Core - Multi-band directivity synthesis for dual-capsule microphones
//!
//! Takes an omni and a figure-of-eight capsule signal, splits both into up to
//! five bands and blends them per band into an arbitrary first-order polar
//! pattern. Energy recorded from a disturbing source (and optionally a wanted
//! signal) drives a closed-form optimizer for the per-band directivity.

pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod params;
pub mod tracking;
pub mod types;

pub use engine::{create_engine, BusLayout, PolarController, PolarProcessor};
pub use error::{LayoutError, PresetError, TrackingError};
pub use params::{ParameterSnapshot, ParameterStore};
pub use types::*;
