pub mod config; // Engine configuration and validation
pub mod dsp; // Pulse oscillators
pub mod sequencing; // Beat clock, step grid and transport
pub mod synth; // Voice lifecycle across control and render domains

pub use config::{ConfigError, EngineConfig};

/// Largest block the audio callback hands to the synth in one call.
pub const MAX_BLOCK_SIZE: usize = 2048;
