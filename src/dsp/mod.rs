//! Low-level pulse-wave primitives.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. Every parameter that could produce an
//! undefined waveform is validated when the value is constructed, so the
//! per-sample code never has to check.

/// Pulse oscillator that cycles its own duty ratio.
pub mod composed;
/// Duty-cycle table and validated indices into it.
pub mod duty;
/// Oscillator selection shared by voices.
pub mod oscillator;
/// Fixed-duty sample-counting pulse oscillator.
pub mod pulse;

pub use composed::ComposedPulseOscillator;
pub use duty::{DutyIndex, DUTY_RATIOS};
pub use oscillator::{OscillatorError, PulseOsc, PulseType};
pub use pulse::{Frequency, PulseOscillator, FULL_SCALE};
