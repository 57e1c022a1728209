// Purpose: control-domain timing. The beat clock ticks, the transport walks
// the step grid, and the generator turns grid notes into voice triggers.

pub mod beat;
pub mod generator;
pub mod grid;
pub mod notes;
pub mod transport;

pub use beat::{BeatClock, BeatClockError, ClockState, ListenerId};
pub use generator::NoteGenerator;
pub use grid::StepGrid;
pub use notes::NoteTable;
pub use transport::Sequencer;
