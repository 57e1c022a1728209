// Purpose: voice lifecycle across the control and render domains.
// The control side (trigger) builds voices and stamps commands; the render
// side (engine, pool) admits, renders and reclaims them.

pub mod clock;
pub mod engine;
pub mod gate;
pub mod message;
pub mod pool;
pub mod trigger;
pub mod voice;

use rtrb::RingBuffer;

use crate::config::{ConfigError, EngineConfig};

pub use clock::RenderClock;
pub use engine::PulseSynth;
pub use gate::{LatePolicy, VoiceGate, VoiceState};
pub use message::SynthMessage;
pub use pool::{VoiceHandle, VoicePool};
pub use trigger::{TriggerError, VoiceTrigger};
pub use voice::Voice;

/// Build a connected render/control pair sharing one clock and one command
/// ring. Move the [`PulseSynth`] into the audio callback and keep the
/// [`VoiceTrigger`] on the control side.
pub fn pulse_synth(config: &EngineConfig) -> Result<(PulseSynth, VoiceTrigger), ConfigError> {
    config.validate()?;

    let (tx, rx) = RingBuffer::<SynthMessage>::new(config.queue_capacity);
    let clock = RenderClock::new();

    let synth = PulseSynth::new(config, rx, clock.clone());
    let trigger = VoiceTrigger::new(tx, clock, config.sample_rate, config.late_policy);
    Ok((synth, trigger))
}
