//! Common types for the polar designer
//!
//! Sample type, band limits and the small enums shared by the DSP, the
//! parameter store and the preset schema.

use serde::{Deserialize, Serialize};

/// Audio sample type
pub type Sample = f32;

/// Maximum number of bands
pub const MAX_BANDS: usize = 5;

/// Minimum number of bands
pub const MIN_BANDS: usize = 2;

/// Maximum number of crossover boundaries (MAX_BANDS - 1)
pub const MAX_CROSSOVERS: usize = MAX_BANDS - 1;

/// Number of capsule input channels (omni + eight)
pub const NUM_INPUT_CHANNELS: usize = 2;

/// Reference sample rate of the embedded field EQ responses
pub const EQ_SAMPLE_RATE: u32 = 48000;

/// One frame of the interleaved two-channel host buffer
///
/// Uses `#[repr(C)]` so `&[f32]` interleaved host audio can be viewed as
/// `&[CapsuleFrame]` without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CapsuleFrame {
    /// Channel 0 (omni, or front cardioid for `InputFormat::FrontBack`)
    pub first: Sample,
    /// Channel 1 (eight, or back cardioid for `InputFormat::FrontBack`)
    pub second: Sample,
}

impl CapsuleFrame {
    #[inline]
    pub fn new(first: Sample, second: Sample) -> Self {
        Self { first, second }
    }
}

/// Field equalization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum EqMode {
    /// Bit-exact bypass
    #[default]
    Off = 0,
    /// Free-field correction
    FreeField = 1,
    /// Diffuse-field correction
    DiffuseField = 2,
}

impl EqMode {
    pub const ALL: [EqMode; 3] = [EqMode::Off, EqMode::FreeField, EqMode::DiffuseField];

    /// Convert from the numeric preset value (0, 1, 2)
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(EqMode::Off),
            1 => Some(EqMode::FreeField),
            2 => Some(EqMode::DiffuseField),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EqMode::Off => "Off",
            EqMode::FreeField => "Free Field",
            EqMode::DiffuseField => "Diffuse Field",
        }
    }
}

/// How the two host input channels map onto the capsules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Channel 0 = omni, channel 1 = figure-of-eight
    #[default]
    OmniEight,
    /// Channel 0 = front cardioid, channel 1 = back cardioid
    ///
    /// omni = (front + back) / 2, eight = (front - back) / 2
    FrontBack,
}

/// Convert decibels to a linear gain factor
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_mode_index_roundtrip() {
        for mode in EqMode::ALL {
            assert_eq!(EqMode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(EqMode::from_index(3), None);
    }

    #[test]
    fn test_frame_is_two_floats() {
        let interleaved = [0.25_f32, -0.5, 1.0, 0.0];
        let frames: &[CapsuleFrame] = bytemuck::cast_slice(&interleaved);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], CapsuleFrame::new(0.25, -0.5));
        assert_eq!(frames[1].first, 1.0);
    }

    #[test]
    fn test_db_to_gain() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-6.0206) - 0.5).abs() < 1e-4);
    }
}
