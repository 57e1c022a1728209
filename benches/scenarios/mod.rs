//! Real-world scenario benchmarks.
//!
//! These benchmarks drive the full synth the way the sequencer does:
//! commands through the ring, voices summed on the bus.

mod voices;

pub use voices::{bench_churn, bench_voices};
