use tracing::{trace, warn};

use crate::{
    config::EngineConfig,
    dsp::PulseType,
    synth::{TriggerError, VoiceTrigger},
};

use super::notes::NoteTable;

/// Turns the note offsets active on a tick into voices.
pub struct NoteGenerator {
    trigger: VoiceTrigger,
    table: NoteTable,
    base_note: u8,
    note_length: f64,
    pulse: PulseType,
}

impl NoteGenerator {
    pub fn new(trigger: VoiceTrigger, config: &EngineConfig) -> Self {
        Self {
            trigger,
            table: NoteTable::new(),
            base_note: config.base_note,
            note_length: config.note_length,
            pulse: config.pulse_type,
        }
    }

    pub fn set_pulse_type(&mut self, pulse: PulseType) {
        self.pulse = pulse;
    }

    pub fn pulse_type(&self) -> PulseType {
        self.pulse
    }

    /// Trigger one voice per offset, starting now and lasting the configured
    /// note length. Offsets that leave the MIDI range are skipped. Returns
    /// the number of voices sent to the render side.
    pub fn generate(&mut self, notes: &[i32]) -> usize {
        let mut triggered = 0;
        for &offset in notes {
            let Some(frequency) = self.table.offset_frequency(self.base_note, offset) else {
                trace!(offset, base = self.base_note, "note outside MIDI range dropped");
                continue;
            };

            match self.trigger.trigger(self.pulse, frequency.hz(), 0.0, self.note_length) {
                Ok(_) => triggered += 1,
                Err(TriggerError::QueueFull) => {
                    warn!(offset, "command queue full, note dropped");
                }
                Err(err) => warn!(offset, %err, "note rejected"),
            }
        }
        triggered
    }

    /// Cut every voice on the render side.
    pub fn all_notes_off(&mut self) {
        if let Err(err) = self.trigger.all_notes_off() {
            warn!(%err, "could not send all-notes-off");
        }
    }
}
