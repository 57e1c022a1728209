use rtrb::Consumer;

use super::{pool::VoiceHandle, voice::Voice};

/// Commands sent from the control domain to the render domain.
///
/// Timestamps are frames on the [`RenderClock`](super::clock::RenderClock).
#[derive(Debug, Clone, Copy)]
pub enum SynthMessage {
    /// Admit a fully validated, not yet started voice.
    Spawn { handle: VoiceHandle, voice: Voice },
    Start { handle: VoiceHandle, at: u64 },
    Stop { handle: VoiceHandle, at: u64 },
    /// Cut every voice immediately, started or not.
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
