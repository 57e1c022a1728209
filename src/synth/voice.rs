use crate::dsp::{Frequency, PulseOsc};

use super::gate::{LatePolicy, VoiceGate, VoiceState};

/// A single triggered note: one pulse oscillator behind a start/stop gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    osc: PulseOsc,
    frequency: Frequency,
    gate: VoiceGate,
}

impl Voice {
    pub fn new(osc: PulseOsc, frequency: Frequency, policy: LatePolicy) -> Self {
        Self {
            osc,
            frequency,
            gate: VoiceGate::new(policy),
        }
    }

    pub fn start(&mut self, at: u64) {
        self.gate.start(at);
    }

    pub fn stop(&mut self, at: u64) {
        self.gate.stop(at);
    }

    /// Add this voice's output for the block beginning at frame `now` onto
    /// `mix`.
    ///
    /// The gate is consulted per sample, so start and stop times inside the
    /// block are honoured exactly. The oscillator only advances on samples
    /// it actually emits.
    pub fn render(&mut self, mix: &mut [f32], now: u64, sample_rate: f32) {
        for (frame, out) in (now..).zip(mix.iter_mut()) {
            if self.gate.should_render(frame) {
                *out += self.osc.next_sample(self.frequency, sample_rate);
            }
        }
    }

    pub fn is_finished(&self, now: u64) -> bool {
        self.gate.is_finished(now)
    }

    pub fn state(&self, now: u64) -> VoiceState {
        self.gate.state(now)
    }

    pub fn gate(&self) -> &VoiceGate {
        &self.gate
    }
}
