//! Control-domain half of the voice lifecycle.
//!
//! A trigger builds and validates a voice on the calling thread, then hands
//! it to the render domain together with its start and stop times. Nothing
//! invalid ever crosses the queue.

use std::fmt;

use rtrb::Producer;
use tracing::debug;

use crate::{
    config::MIN_QUEUE_CAPACITY,
    dsp::{Frequency, OscillatorError, PulseOsc, PulseType},
};

use super::{
    clock::{seconds_to_frames, RenderClock},
    gate::LatePolicy,
    message::SynthMessage,
    pool::VoiceHandle,
    voice::Voice,
};

pub struct VoiceTrigger {
    tx: Producer<SynthMessage>,
    clock: RenderClock,
    sample_rate: f32,
    policy: LatePolicy,
    next_id: u64,
}

impl VoiceTrigger {
    pub fn new(
        tx: Producer<SynthMessage>,
        clock: RenderClock,
        sample_rate: f32,
        policy: LatePolicy,
    ) -> Self {
        Self {
            tx,
            clock,
            sample_rate,
            policy,
            next_id: 0,
        }
    }

    /// Start a voice `start_offset` seconds from now and stop it `duration`
    /// seconds later.
    pub fn trigger(
        &mut self,
        pulse: PulseType,
        frequency_hz: f32,
        start_offset: f64,
        duration: f64,
    ) -> Result<VoiceHandle, TriggerError> {
        let frequency = Frequency::new(frequency_hz)?;
        let osc = PulseOsc::new(pulse)?;
        if !is_valid_span(start_offset) || !is_valid_span(duration) {
            return Err(TriggerError::InvalidTiming { start_offset, duration });
        }
        // The last slot is reserved so all-notes-off can always get through.
        if self.tx.slots() < MIN_QUEUE_CAPACITY {
            return Err(TriggerError::QueueFull);
        }

        let handle = VoiceHandle::from_raw(self.next_id);
        self.next_id += 1;

        let start_at = self.at_offset(start_offset)?;
        let stop_at = start_at.saturating_add(seconds_to_frames(duration, self.sample_rate));
        let voice = Voice::new(osc, frequency, self.policy);

        self.push(SynthMessage::Spawn { handle, voice })?;
        self.push(SynthMessage::Start { handle, at: start_at })?;
        self.push(SynthMessage::Stop { handle, at: stop_at })?;

        debug!(
            voice = handle.id(),
            %pulse,
            frequency = frequency_hz,
            start_at,
            stop_at,
            "voice triggered"
        );
        Ok(handle)
    }

    /// Re-stamp a voice's start time, `offset` seconds from now.
    pub fn start(&mut self, handle: VoiceHandle, offset: f64) -> Result<(), TriggerError> {
        let at = self.at_offset(offset)?;
        self.push(SynthMessage::Start { handle, at })
    }

    /// Re-stamp a voice's stop time, `offset` seconds from now.
    pub fn stop(&mut self, handle: VoiceHandle, offset: f64) -> Result<(), TriggerError> {
        let at = self.at_offset(offset)?;
        self.push(SynthMessage::Stop { handle, at })
    }

    /// Silence and release every pending or sounding voice.
    pub fn all_notes_off(&mut self) -> Result<(), TriggerError> {
        self.push(SynthMessage::AllNotesOff)
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn at_offset(&self, offset: f64) -> Result<u64, TriggerError> {
        if !is_valid_span(offset) {
            return Err(TriggerError::InvalidTiming { start_offset: offset, duration: 0.0 });
        }
        Ok(self.clock.now().saturating_add(seconds_to_frames(offset, self.sample_rate)))
    }

    fn push(&mut self, msg: SynthMessage) -> Result<(), TriggerError> {
        self.tx.push(msg).map_err(|_| TriggerError::QueueFull)
    }
}

fn is_valid_span(seconds: f64) -> bool {
    seconds.is_finite() && seconds >= 0.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerError {
    Oscillator(OscillatorError),
    InvalidTiming { start_offset: f64, duration: f64 },
    /// The render side has not drained enough commands yet.
    QueueFull,
}

impl From<OscillatorError> for TriggerError {
    fn from(err: OscillatorError) -> Self {
        TriggerError::Oscillator(err)
    }
}

impl fmt::Display for TriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerError::Oscillator(err) => write!(f, "invalid voice: {err}"),
            TriggerError::InvalidTiming { start_offset, duration } => write!(
                f,
                "offsets must be finite and >= 0 s (start {start_offset}, duration {duration})"
            ),
            TriggerError::QueueFull => f.write_str("command queue is full"),
        }
    }
}

impl std::error::Error for TriggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TriggerError::Oscillator(err) => Some(err),
            _ => None,
        }
    }
}
