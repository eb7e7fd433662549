//! Engine wiring
//!
//! `create_engine` returns the two halves of one engine instance:
//!
//! - `PolarController` stays on the control thread. It owns the parameter
//!   store, designs crossovers and runs the optimizer.
//! - `PolarProcessor` moves to the audio thread. It reads published snapshots
//!   and designs lock-free and never allocates after `prepare`.
//!
//! The halves share `basedrop` cells for parameters and designs, atomics for
//! status, and the tracking handshake. Retired values are freed by the
//! collector thread in `gc`.

mod controller;
mod design;
pub mod gc;
mod layout;
mod processor;
mod status;

use std::sync::Arc;

pub use controller::PolarController;
pub use design::DesignSlot;
pub use layout::BusLayout;
pub use processor::PolarProcessor;
pub use status::EngineStatus;

use crate::config::EngineConfig;
use crate::params::ParameterStore;
use crate::tracking::TrackingShared;

/// Create a connected controller/processor pair
pub fn create_engine(config: EngineConfig) -> (PolarController, PolarProcessor) {
    let handle = gc::gc_handle();
    let store = ParameterStore::new(&handle);
    let designs = Arc::new(DesignSlot::new(&handle));
    let tracking = Arc::new(TrackingShared::new());
    let status = Arc::new(EngineStatus::new());

    let processor = PolarProcessor::new(
        config.clone(),
        handle.clone(),
        store.published(),
        Arc::clone(&designs),
        Arc::clone(&tracking),
        Arc::clone(&status),
    );
    let controller = PolarController::new(config, handle, store, designs, tracking, status);

    log::debug!("Engine created");
    (controller, processor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackingError;
    use crate::params::AbLayer;
    use crate::tracking::{PatternGoal, RecordingKind, TrackingState};
    use crate::types::{EqMode, MAX_BANDS};
    use tempfile::TempDir;

    const RATE: f64 = 48000.0;
    const BLOCK: usize = 256;

    /// Deterministic white noise in -1..1
    fn noise(len: usize, seed: u32) -> Vec<f32> {
        let mut state = seed.max(1);
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    fn prepared_engine() -> (PolarController, PolarProcessor) {
        let (controller, mut processor) = create_engine(EngineConfig::default());
        processor.prepare(RATE, BLOCK);
        (controller, processor)
    }

    /// Feed `blocks` blocks of a source seen by both capsules with the given
    /// eight/omni ratio (1 = front, -1 = rear, 0 = side)
    fn feed_source(processor: &mut PolarProcessor, blocks: usize, eight_ratio: f32, seed: u32) {
        let source = noise(blocks * BLOCK, seed);
        for chunk in source.chunks(BLOCK) {
            let mut omni = chunk.to_vec();
            let mut eight: Vec<f32> = chunk.iter().map(|&s| s * eight_ratio).collect();
            processor.process(&mut omni, &mut eight);
        }
    }

    #[test]
    fn test_unprepared_processor_outputs_silence() {
        let (_controller, mut processor) = create_engine(EngineConfig::default());
        let mut first = vec![1.0; 64];
        let mut second = vec![1.0; 64];
        processor.process(&mut first, &mut second);
        assert!(first.iter().chain(&second).all(|&s| s == 0.0));
        assert_eq!(processor.latency_samples(), 0);
    }

    #[test]
    fn test_banded_path_is_delayed_cardioid() {
        let (controller, mut processor) = prepared_engine();
        let latency = controller.latency_samples() as usize;
        assert_eq!(latency, 200);
        assert_eq!(processor.latency_samples() as usize, latency);

        // Impulse on the omni capsule; cardioid halves it
        let mut first = vec![0.0; 2 * BLOCK];
        let mut second = vec![0.0; 2 * BLOCK];
        first[0] = 1.0;
        processor.process(&mut first, &mut second);

        for (i, &s) in first.iter().enumerate() {
            let expected = if i == latency { 0.5 } else { 0.0 };
            assert!((s - expected).abs() < 1e-3, "sample {}: {}", i, s);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_delay_switch() {
        let (mut controller, mut processor) = prepared_engine();
        feed_source(&mut processor, 2, 0.3, 7);

        assert!(controller.set_zero_delay(true));
        feed_source(&mut processor, 1, 0.3, 8);
        assert_eq!(controller.latency_samples(), 0);
        assert_eq!(processor.latency_samples(), 0);

        // After the crossfade block: unsplit cardioid, no delay
        let omni = noise(BLOCK, 9);
        let eight = noise(BLOCK, 10);
        let (mut first, mut second) = (omni.clone(), eight.clone());
        processor.process(&mut first, &mut second);
        for i in 0..BLOCK {
            let expected = 0.5 * omni[i] + 0.5 * eight[i];
            assert!((first[i] - expected).abs() < 1e-6);
        }

        assert!(controller.set_zero_delay(false));
        feed_source(&mut processor, 1, 0.3, 11);
        assert_eq!(controller.latency_samples(), 200);
    }

    #[test]
    fn test_interleaved_matches_planar() {
        let (_c1, mut planar) = prepared_engine();
        let (_c2, mut interleaved) = prepared_engine();

        let omni = noise(3 * BLOCK, 21);
        let eight = noise(3 * BLOCK, 22);
        let (mut first, mut second) = (omni.clone(), eight.clone());
        planar.process(&mut first, &mut second);

        let mut frames: Vec<f32> = omni.iter().zip(&eight).flat_map(|(&o, &e)| [o, e]).collect();
        interleaved.process_interleaved(&mut frames);
        for (i, pair) in frames.chunks(2).enumerate() {
            assert!((pair[0] - first[i]).abs() < 1e-6);
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rear_disturber_gives_cardioid() {
        let (mut controller, mut processor) = prepared_engine();
        controller.set_allow_backwards(true);
        for band in 0..MAX_BANDS {
            controller.set_directivity(band, 1.0);
        }

        controller.start_tracking(true);
        assert_eq!(controller.tracking_state(), TrackingState::RecordingDisturber);
        feed_source(&mut processor, 16, -1.0, 3);
        assert_eq!(controller.stop_tracking(true), Some(RecordingKind::Disturber));
        assert_eq!(controller.tracking_state(), TrackingState::Idle);
        assert!(controller.disturber_recorded());

        for view in controller.band_views() {
            assert!(view.directivity.abs() < 1e-3, "band {}: {}", view.index, view.directivity);
        }
    }

    #[test]
    fn test_side_disturber_respects_backwards_flag() {
        let (mut controller, mut processor) = prepared_engine();
        controller.start_tracking(true);
        feed_source(&mut processor, 16, 0.0, 5);
        controller.stop_tracking(false);

        // Figure-of-eight is the optimum but only the forward range is allowed
        controller.apply_optimal_pattern(PatternGoal::MinimizeDisturbance).unwrap();
        assert!(controller.band_views().iter().all(|v| v.directivity == 0.0));

        controller.set_allow_backwards(true);
        controller.apply_optimal_pattern(PatternGoal::MinimizeDisturbance).unwrap();
        for view in controller.band_views() {
            assert!(
                (view.directivity + 1.0).abs() < 1e-3,
                "band {}: {}",
                view.index,
                view.directivity
            );
        }
    }

    #[test]
    fn test_optimizer_requires_recordings() {
        let (mut controller, mut processor) = prepared_engine();
        controller.set_directivity(0, 0.7);
        let before = *controller.snapshot();

        assert_eq!(
            controller.apply_optimal_pattern(PatternGoal::MinimizeDisturbance),
            Err(TrackingError::DisturberNotRecorded)
        );
        assert_eq!(
            controller.apply_optimal_pattern(PatternGoal::MaximizeSignal),
            Err(TrackingError::SignalNotRecorded)
        );

        controller.start_tracking(false);
        feed_source(&mut processor, 4, 1.0, 12);
        controller.stop_tracking(false);
        assert_eq!(
            controller.apply_optimal_pattern(PatternGoal::MaximizeSignalToDisturbance),
            Err(TrackingError::RecordingsIncomplete {
                disturber: false,
                signal: true
            })
        );
        assert_eq!(*controller.snapshot(), before);
    }

    #[test]
    fn test_band_count_change_reaches_processor() {
        let (mut controller, mut processor) = prepared_engine();
        let initial = controller.status().active_design();

        assert!(controller.set_band_count(3));
        feed_source(&mut processor, 1, 0.5, 13);
        let adopted = controller.status().active_design();
        assert!(adopted > initial);

        // Layer B still has five bands
        assert!(controller.switch_layer(AbLayer::B));
        feed_source(&mut processor, 1, 0.5, 14);
        assert!(controller.status().active_design() > adopted);
        assert_eq!(controller.band_views().len(), 5);
    }

    #[test]
    fn test_preset_load_keeps_zero_delay() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("presets").join("vocal.json");

        let (mut controller, _processor) = prepared_engine();
        controller.set_band_gain(1, -4.5);
        controller.set_eq_mode(EqMode::DiffuseField);
        controller.save_preset(&path).unwrap();

        controller.set_band_gain(1, 0.0);
        controller.set_eq_mode(EqMode::Off);
        controller.set_zero_delay(true);

        let warnings = controller.load_preset(&path).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(controller.snapshot().bands[1].gain_db, -4.5);
        assert_eq!(controller.snapshot().eq_mode, EqMode::DiffuseField);
        assert!(controller.snapshot().zero_delay);
    }
}
