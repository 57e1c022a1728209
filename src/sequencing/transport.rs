//! Sequencer - transport and step playback on the control domain.
//!
//! The beat clock advances a playhead over the step grid; every tick the
//! notes under the playhead become voices. Stopping the transport cuts all
//! voices rather than letting them ring out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::{config::EngineConfig, dsp::PulseType, synth::VoiceTrigger};

use super::{
    beat::{BeatClock, BeatClockError},
    generator::NoteGenerator,
    grid::StepGrid,
};

/// Everything a tick touches, shared between the caller and the timer thread.
struct Playhead {
    grid: StepGrid,
    /// `None` before the first tick after a (re)start.
    current_step: Option<usize>,
    generator: NoteGenerator,
}

impl Playhead {
    fn advance(&mut self) {
        let steps = self.grid.steps().max(1);
        self.current_step = Some(match self.current_step {
            Some(step) => (step + 1) % steps,
            None => 0,
        });
    }

    fn current_notes(&self) -> Vec<i32> {
        self.current_step
            .map(|step| self.grid.notes_at(step))
            .unwrap_or_default()
    }

    fn tick(&mut self) {
        self.advance();
        let notes = self.current_notes();
        self.generator.generate(&notes);
    }
}

pub struct Sequencer {
    beat: BeatClock,
    playhead: Arc<Mutex<Playhead>>,
}

impl Sequencer {
    pub fn new(config: &EngineConfig, trigger: VoiceTrigger) -> Result<Self, BeatClockError> {
        Self::with_grid(config, trigger, StepGrid::default())
    }

    pub fn with_grid(
        config: &EngineConfig,
        trigger: VoiceTrigger,
        grid: StepGrid,
    ) -> Result<Self, BeatClockError> {
        let mut beat = BeatClock::new(config.tempo, config.resolution)?;
        let playhead = Arc::new(Mutex::new(Playhead {
            grid,
            current_step: None,
            generator: NoteGenerator::new(trigger, config),
        }));

        let ticking = Arc::clone(&playhead);
        beat.subscribe(move || lock(&ticking).tick());

        Ok(Self { beat, playhead })
    }

    fn playhead(&self) -> MutexGuard<'_, Playhead> {
        lock(&self.playhead)
    }

    pub fn start(&mut self) {
        self.playhead().current_step = None;
        self.beat.start();
        info!(tempo = self.beat.tempo(), "transport started");
    }

    pub fn stop(&mut self) {
        // Disarm first so no tick can re-trigger after the cut.
        self.beat.stop();
        let mut playhead = self.playhead();
        playhead.current_step = None;
        playhead.generator.all_notes_off();
        info!("transport stopped");
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.beat.is_running()
    }

    pub fn set_tempo(&mut self, tempo: f64) -> Result<(), BeatClockError> {
        self.beat.set_tempo(tempo)
    }

    pub fn tempo(&self) -> f64 {
        self.beat.tempo()
    }

    /// Applies to voices triggered from the next tick on.
    pub fn set_pulse_type(&mut self, pulse: PulseType) {
        self.playhead().generator.set_pulse_type(pulse);
        info!(%pulse, "pulse type changed");
    }

    pub fn pulse_type(&self) -> PulseType {
        self.playhead().generator.pulse_type()
    }

    pub fn current_step(&self) -> Option<usize> {
        self.playhead().current_step
    }

    pub fn toggle_cell(&mut self, step: usize, row: usize) -> Option<bool> {
        self.playhead().grid.toggle(step, row)
    }

    /// Run `f` with the grid locked.
    pub fn with_grid_mut<T>(&mut self, f: impl FnOnce(&mut StepGrid) -> T) -> T {
        f(&mut self.playhead().grid)
    }

    /// Advance one step by hand, exactly as a beat tick would.
    pub fn step(&mut self) {
        self.playhead().tick();
    }
}

fn lock(playhead: &Mutex<Playhead>) -> MutexGuard<'_, Playhead> {
    playhead.lock().unwrap_or_else(PoisonError::into_inner)
}
