//! Engine-wide settings, validated before any audio is produced.

use std::fmt;

use crate::{dsp::PulseType, sequencing::beat::tick_interval, synth::gate::LatePolicy};

/// Messages one triggered note needs: spawn, start and stop.
pub const MESSAGES_PER_NOTE: usize = 3;

/// Smallest usable command ring: one note plus the slot kept free for
/// all-notes-off.
pub const MIN_QUEUE_CAPACITY: usize = MESSAGES_PER_NOTE + 1;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Render sample rate in Hz. Replaced by the device rate at runtime.
    pub sample_rate: f32,
    /// Upper bound on simultaneously live voices.
    pub max_voices: usize,
    /// Capacity of the control → render command ring.
    pub queue_capacity: usize,
    /// Mix bus gain applied after summing every voice.
    pub gain: f32,
    /// Seconds each triggered note sounds.
    pub note_length: f64,
    /// MIDI note that grid row 0 maps to.
    pub base_note: u8,
    /// Beat clock subdivisions per beat.
    pub resolution: u32,
    /// Beats per minute.
    pub tempo: f64,
    pub pulse_type: PulseType,
    pub late_policy: LatePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_voices: 256,
            queue_capacity: 1024,
            gain: 0.2,
            note_length: 0.1,
            base_note: 69, // A4, 440 Hz
            resolution: 8,
            tempo: 60.0,
            pulse_type: PulseType::default(),
            late_policy: LatePolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if self.max_voices == 0 {
            return Err(ConfigError::NoVoices);
        }
        if self.queue_capacity < MIN_QUEUE_CAPACITY {
            return Err(ConfigError::QueueTooSmall(self.queue_capacity));
        }
        if !(0.0..=1.0).contains(&self.gain) {
            return Err(ConfigError::Gain(self.gain));
        }
        if !(self.note_length.is_finite() && self.note_length > 0.0) {
            return Err(ConfigError::NoteLength(self.note_length));
        }
        if self.base_note > 127 {
            return Err(ConfigError::BaseNote(self.base_note));
        }
        if self.resolution == 0 {
            return Err(ConfigError::Resolution);
        }
        if tick_interval(self.tempo, self.resolution).is_err() {
            return Err(ConfigError::Tempo(self.tempo));
        }
        if let PulseType::Plain(duty) = self.pulse_type {
            crate::dsp::DutyIndex::new(duty).map_err(|_| ConfigError::PulseType(self.pulse_type))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    SampleRate(f32),
    NoVoices,
    QueueTooSmall(usize),
    Gain(f32),
    NoteLength(f64),
    BaseNote(u8),
    Resolution,
    Tempo(f64),
    PulseType(PulseType),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SampleRate(rate) => write!(f, "sample rate must be > 0 Hz, got {rate}"),
            ConfigError::NoVoices => f.write_str("max_voices must be at least 1"),
            ConfigError::QueueTooSmall(capacity) => write!(
                f,
                "queue capacity {capacity} is below the minimum of {MIN_QUEUE_CAPACITY}"
            ),
            ConfigError::Gain(gain) => write!(f, "gain must be within 0.0..=1.0, got {gain}"),
            ConfigError::NoteLength(secs) => write!(f, "note length must be > 0 s, got {secs}"),
            ConfigError::BaseNote(note) => write!(f, "base note {note} is not a MIDI note (0..=127)"),
            ConfigError::Resolution => f.write_str("resolution must be at least 1 tick per beat"),
            ConfigError::Tempo(bpm) => write!(f, "tempo must be > 0 BPM, got {bpm}"),
            ConfigError::PulseType(pulse) => write!(f, "invalid pulse type {pulse}"),
        }
    }
}

impl std::error::Error for ConfigError {}
