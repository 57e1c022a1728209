//! Benchmarks for pulse oscillators and the synth render loop.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure the render path to ensure it completes well
//! within real-time audio deadlines.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Pulse oscillators, plain and composed
//!   - scenarios/*  Full synth blocks under polyphony and voice churn

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    scenarios::bench_voices,
    scenarios::bench_churn,
);
criterion_main!(benches);
