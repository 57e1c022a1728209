//! Duty-cycle table shared by every pulse oscillator.

use super::oscillator::OscillatorError;

/// Fraction of each wave cycle spent at full amplitude, in table order.
pub const DUTY_RATIOS: [f32; 3] = [0.125, 0.25, 0.5];

/// Validated index into [`DUTY_RATIOS`].
///
/// Out-of-range indices are rejected here so the render path can index the
/// table without checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DutyIndex(usize);

impl DutyIndex {
    pub const COUNT: usize = DUTY_RATIOS.len();

    pub fn new(index: usize) -> Result<Self, OscillatorError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(OscillatorError::InvalidDutyIndex(index))
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn ratio(self) -> f32 {
        DUTY_RATIOS[self.0]
    }

    /// Next entry in the table, wrapping back to the first.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % Self::COUNT)
    }
}
