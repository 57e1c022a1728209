//! VoicePool: render-side voice storage and reclamation.

use super::voice::Voice;

/// Identifies a voice across the control/render boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceHandle(u64);

impl VoiceHandle {
    pub(crate) const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Fixed-capacity set of live voices.
///
/// Slots are allocated once up front so admitting, rendering and reaping
/// never touch the heap.
pub struct VoicePool {
    slots: Vec<Option<(VoiceHandle, Voice)>>,
}

impl VoicePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Place a voice in a free slot. Returns `false` when the pool is full;
    /// the voice is then dropped and never sounds.
    pub fn admit(&mut self, handle: VoiceHandle, voice: Voice) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some((handle, voice));
                true
            }
            None => false,
        }
    }

    /// Set the start time of a live voice. Unknown handles are ignored.
    pub fn start(&mut self, handle: VoiceHandle, at: u64) -> bool {
        match self.get_mut(handle) {
            Some(voice) => {
                voice.start(at);
                true
            }
            None => false,
        }
    }

    /// Set the stop time of a live voice. Unknown handles are ignored.
    pub fn stop(&mut self, handle: VoiceHandle, at: u64) -> bool {
        match self.get_mut(handle) {
            Some(voice) => {
                voice.stop(at);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: VoiceHandle) -> Option<&Voice> {
        self.slots
            .iter()
            .flatten()
            .find(|(h, _)| *h == handle)
            .map(|(_, voice)| voice)
    }

    fn get_mut(&mut self, handle: VoiceHandle) -> Option<&mut Voice> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|(h, _)| *h == handle)
            .map(|(_, voice)| voice)
    }

    /// Add every live voice into the mix bus for the block starting at `now`.
    pub fn render(&mut self, mix: &mut [f32], now: u64, sample_rate: f32) {
        for (_, voice) in self.slots.iter_mut().flatten() {
            voice.render(mix, now, sample_rate);
        }
    }

    /// Release every voice whose stop time has passed. Returns how many were
    /// reclaimed.
    pub fn reap(&mut self, now: u64) -> usize {
        let mut reaped = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|(_, voice)| voice.is_finished(now)) {
                *slot = None;
                reaped += 1;
            }
        }
        reaped
    }

    /// Drop every voice immediately, including ones not yet started.
    pub fn cut_all(&mut self) {
        self.slots.fill(None);
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
