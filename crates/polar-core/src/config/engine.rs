//! Engine configuration
//!
//! Tunables that are fixed for the lifetime of an engine instance. Live
//! controls (gains, crossovers, directivity...) live in the parameter store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::InputFormat;

/// Engine configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How host channels map onto the capsules
    /// Default: omni on channel 0, eight on channel 1
    pub input_format: InputFormat,

    /// Crossover FIR order at 48 kHz (scaled with sample rate, forced even)
    /// Default: 400 (401 taps, 200 samples latency at 48 kHz)
    pub crossover_order_48k: usize,

    /// Minimum proximity change that triggers a filter redesign
    /// Default: 0.001
    pub proximity_epsilon: f32,

    /// Ramp gain and directivity changes across one block
    /// Default: true
    pub ramp_parameters: bool,

    /// Directory for user presets (None = platform default)
    pub preset_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_format: InputFormat::OmniEight,
            crossover_order_48k: 400,
            proximity_epsilon: 1e-3,
            ramp_parameters: true,
            preset_dir: None,
        }
    }
}

impl EngineConfig {
    /// Crossover FIR order for a sample rate (always even, at least 16)
    pub fn crossover_order(&self, sample_rate: f64) -> usize {
        let scaled = self.crossover_order_48k as f64 * sample_rate / 48000.0;
        let half = (scaled / 2.0).round().max(8.0) as usize;
        half * 2
    }

    /// Preset directory, falling back to the platform default
    pub fn preset_dir(&self) -> PathBuf {
        self.preset_dir
            .clone()
            .unwrap_or_else(super::default_preset_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossover_order_is_even() {
        let config = EngineConfig::default();
        for rate in [44100.0, 48000.0, 88200.0, 96000.0, 22050.0] {
            let order = config.crossover_order(rate);
            assert_eq!(order % 2, 0, "order {} at {}", order, rate);
        }
        assert_eq!(config.crossover_order(48000.0), 400);
        assert_eq!(config.crossover_order(96000.0), 800);
    }

    #[test]
    fn test_crossover_order_floor() {
        let config = EngineConfig {
            crossover_order_48k: 2,
            ..Default::default()
        };
        assert_eq!(config.crossover_order(48000.0), 16);
    }
}
