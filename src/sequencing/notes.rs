use crate::dsp::Frequency;

/*
Note-to-Frequency Table
=======================

MIDI numbers notes 0..=127 in semitone steps with A4 (note 69) at 440 Hz.
Twelve-tone equal temperament gives every other note from that anchor:

    frequency(n) = 440 * 2^((n - 69) / 12)

    note   0  (C-1)   ≈    8.18 Hz
    note  60  (C4)    ≈  261.63 Hz
    note  69  (A4)    =  440.00 Hz
    note 127  (G9)    ≈ 12543.85 Hz

The sequencer adds a row offset to a base note and looks the result up here.
Anything that lands outside 0..=127 has no entry and is dropped.
*/

/// Number of entries in the table.
pub const NOTE_COUNT: usize = 128;

/// A4, the 440 Hz reference.
pub const A4: u8 = 69;

#[derive(Debug, Clone)]
pub struct NoteTable {
    freqs: [f32; NOTE_COUNT],
}

impl NoteTable {
    pub fn new() -> Self {
        let mut freqs = [0.0; NOTE_COUNT];
        for (note, freq) in freqs.iter_mut().enumerate() {
            *freq = (440.0 * 2.0_f64.powf((note as f64 - A4 as f64) / 12.0)) as f32;
        }
        Self { freqs }
    }

    /// Frequency of an absolute note number, `None` outside 0..=127.
    pub fn frequency(&self, note: i32) -> Option<Frequency> {
        let index = usize::try_from(note).ok()?;
        let hz = *self.freqs.get(index)?;
        Frequency::new(hz).ok()
    }

    /// Frequency of `base + offset`, `None` when the sum leaves 0..=127.
    pub fn offset_frequency(&self, base: u8, offset: i32) -> Option<Frequency> {
        self.frequency(i32::from(base).checked_add(offset)?)
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new()
    }
}
