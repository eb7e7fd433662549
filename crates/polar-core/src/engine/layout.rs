//! Host channel layout negotiation

use crate::error::{LayoutError, LayoutResult};
use crate::types::NUM_INPUT_CHANNELS;

/// Channel counts offered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    pub inputs: usize,
    pub outputs: usize,
}

impl BusLayout {
    pub const STEREO: Self = Self {
        inputs: 2,
        outputs: 2,
    };

    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self { inputs, outputs }
    }

    /// Accept two capsule inputs and a mono or stereo output
    pub fn validate(&self) -> LayoutResult<()> {
        if self.inputs != NUM_INPUT_CHANNELS {
            return Err(LayoutError::UnsupportedInputs(self.inputs));
        }
        if !(1..=2).contains(&self.outputs) {
            return Err(LayoutError::UnsupportedOutputs(self.outputs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(BusLayout::STEREO.validate().is_ok());
        assert!(BusLayout::new(2, 1).validate().is_ok());
        assert_eq!(BusLayout::new(1, 2).validate(), Err(LayoutError::UnsupportedInputs(1)));
        assert_eq!(BusLayout::new(4, 2).validate(), Err(LayoutError::UnsupportedInputs(4)));
        assert_eq!(BusLayout::new(2, 0).validate(), Err(LayoutError::UnsupportedOutputs(0)));
        assert_eq!(BusLayout::new(2, 6).validate(), Err(LayoutError::UnsupportedOutputs(6)));
    }
}
