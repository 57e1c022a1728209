//! Pulse oscillator that walks through the duty table on its own.
//!
//! Each duty ratio is held for a fixed number of completed wave cycles, then
//! the oscillator moves to the next ratio, wrapping after the last one. A
//! single sustained note therefore morphs 1/8 → 1/4 → 1/2 → 1/8 → ...

use super::{
    duty::DutyIndex,
    pulse::{Frequency, PulseOscillator},
};

/// Completed wave cycles spent on each duty ratio.
pub const CYCLES_PER_DUTY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedPulseOscillator {
    osc: PulseOscillator,
    duty: DutyIndex,
    cycles_since_duty_change: u32,
    cycles_per_duty: u32,
}

impl ComposedPulseOscillator {
    pub fn new() -> Self {
        Self::with_cycles_per_duty(CYCLES_PER_DUTY)
    }

    /// `cycles_per_duty` of zero is treated as one.
    pub fn with_cycles_per_duty(cycles_per_duty: u32) -> Self {
        Self {
            osc: PulseOscillator::new(),
            duty: DutyIndex::default(),
            cycles_since_duty_change: 0,
            cycles_per_duty: cycles_per_duty.max(1),
        }
    }

    pub fn render_sample(&mut self, frequency: Frequency, sample_rate: f32) -> f32 {
        let (sample, wrapped) = self.osc.step(frequency, self.duty, sample_rate);

        // Only ever advance on a wrap, so the duty never changes mid-cycle.
        if wrapped {
            self.cycles_since_duty_change += 1;
            if self.cycles_since_duty_change >= self.cycles_per_duty {
                self.cycles_since_duty_change = 0;
                self.duty = self.duty.next();
            }
        }

        sample
    }

    pub fn duty(&self) -> DutyIndex {
        self.duty
    }

    pub fn phase(&self) -> u32 {
        self.osc.phase()
    }

    pub fn cycles_per_duty(&self) -> u32 {
        self.cycles_per_duty
    }
}

impl Default for ComposedPulseOscillator {
    fn default() -> Self {
        Self::new()
    }
}
