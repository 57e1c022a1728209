use super::{duty::DutyIndex, oscillator::OscillatorError};

/*
Pulse Oscillator
================

A pulse wave is a square wave whose "on" portion can be narrower than half
the cycle. The fraction of the cycle spent high is the duty ratio:

    duty 1/2 (square)     duty 1/4             duty 1/8
    ┌──┐  ┌──┐  ┌──      ┌─┐   ┌─┐   ┌─      ┐    ┐    ┐
    │  │  │  │  │         │ │   │ │   │       │    │    │
    ┘  └──┘  └──┘      ───┘ └───┘ └───┘    ───┘────┘────┘

Narrow pulses sound thinner and more nasal; the classic 8-bit console
voices are exactly these three shapes.


Counting Samples Instead of Tracking Phase
------------------------------------------

Instead of a floating-point phase accumulator we count samples:

    samples_per_cycle = floor(sample_rate / frequency)
    on_samples        = floor(samples_per_cycle * duty_ratio)

The output is full scale while `phase < on_samples`, zero otherwise. After
every sample the counter increments, and once it passes `samples_per_cycle`
it returns to zero. The counter is allowed to reach `samples_per_cycle`
itself, so one realized cycle lasts `samples_per_cycle + 1` samples.

Example: A4 (440 Hz) at 48 kHz with duty 1/4

    samples_per_cycle = floor(48000 / 440) = 109
    on_samples        = floor(109 * 0.25)  = 27

    samples   0..27   → 1.0
    samples  27..110  → 0.0
    sample  110       → 1.0 (next cycle)


Per-Sample Recompute
--------------------

Both lengths are recomputed on every sample from the frequency and duty
passed in, so automation lands on the very next sample. Changing frequency
mid-cycle keeps the counter where it is, which can shorten or stretch the
cycle in progress. That discontinuity is accepted.
*/

/// Output level while the pulse is high.
pub const FULL_SCALE: f32 = 1.0;

/// Oscillator frequency in Hz, guaranteed finite and greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frequency(f32);

impl Frequency {
    pub fn new(hz: f32) -> Result<Self, OscillatorError> {
        if hz.is_finite() && hz > 0.0 {
            Ok(Self(hz))
        } else {
            Err(OscillatorError::InvalidFrequency(hz))
        }
    }

    pub fn hz(self) -> f32 {
        self.0
    }
}

/// Whole samples in one nominal wave cycle.
#[inline]
pub fn samples_per_cycle(frequency: Frequency, sample_rate: f32) -> u32 {
    (sample_rate / frequency.hz()).floor() as u32
}

/// Samples at full scale at the start of each cycle.
#[inline]
pub fn on_samples(samples_per_cycle: u32, duty: DutyIndex) -> u32 {
    (samples_per_cycle as f32 * duty.ratio()).floor() as u32
}

/// Sample-counting pulse oscillator with an externally supplied duty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseOscillator {
    phase: u32,
}

impl PulseOscillator {
    pub fn new() -> Self {
        Self { phase: 0 }
    }

    /// Produce one sample and advance the counter.
    pub fn render_sample(&mut self, frequency: Frequency, duty: DutyIndex, sample_rate: f32) -> f32 {
        self.step(frequency, duty, sample_rate).0
    }

    /// Same as [`render_sample`](Self::render_sample), also reporting whether
    /// the counter wrapped back to zero on this sample.
    #[inline]
    pub(crate) fn step(&mut self, frequency: Frequency, duty: DutyIndex, sample_rate: f32) -> (f32, bool) {
        let cycle = samples_per_cycle(frequency, sample_rate);
        let on = on_samples(cycle, duty);

        let sample = if self.phase < on { FULL_SCALE } else { 0.0 };

        self.phase += 1;
        let wrapped = self.phase > cycle;
        if wrapped {
            self.phase = 0;
        }

        (sample, wrapped)
    }

    /// Samples rendered since the last wrap.
    pub fn phase(&self) -> u32 {
        self.phase
    }
}
