use rtrb::Consumer;

use crate::config::EngineConfig;

use super::{
    clock::RenderClock,
    message::{MessageReceiver, SynthMessage},
    pool::VoicePool,
};

/// Render-domain half of the synthesizer.
///
/// Owned by the audio callback. Each block it drains pending commands, sums
/// every live voice onto the output (the mix bus), applies the bus gain,
/// reclaims finished voices and advances the shared clock. Nothing here
/// blocks or allocates.
pub struct PulseSynth<R: MessageReceiver = Consumer<SynthMessage>> {
    pool: VoicePool,
    rx: R,
    clock: RenderClock,
    sample_rate: f32,
    gain: f32,
    refused: u64,
}

impl<R: MessageReceiver> PulseSynth<R> {
    /// `config` is assumed to have passed [`EngineConfig::validate`].
    pub fn new(config: &EngineConfig, rx: R, clock: RenderClock) -> Self {
        Self {
            pool: VoicePool::new(config.max_voices),
            rx,
            clock,
            sample_rate: config.sample_rate,
            gain: config.gain,
            refused: 0,
        }
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        let now = self.clock.now();

        // Commands take effect at the start of the first block that sees them.
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::Spawn { handle, voice } => {
                    if !self.pool.admit(handle, voice) {
                        self.refused += 1;
                    }
                }
                SynthMessage::Start { handle, at } => {
                    self.pool.start(handle, at);
                }
                SynthMessage::Stop { handle, at } => {
                    self.pool.stop(handle, at);
                }
                SynthMessage::AllNotesOff => self.pool.cut_all(),
            }
        }

        out.fill(0.0);
        self.pool.render(out, now, self.sample_rate);
        for sample in out.iter_mut() {
            *sample *= self.gain;
        }

        self.pool.reap(now);
        self.clock.advance(out.len());
    }

    pub fn live_voices(&self) -> usize {
        self.pool.live_count()
    }

    /// Voices turned away because every slot was occupied.
    pub fn refused_voices(&self) -> u64 {
        self.refused
    }

    pub fn clock(&self) -> &RenderClock {
        &self.clock
    }
}
