//! Benchmarks for the synth render loop under polyphony.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pulse_seq::{
    dsp::PulseType,
    synth::{pulse_synth, PulseSynth},
    EngineConfig,
};

use crate::BLOCK_SIZES;

/// Effectively sustained for the length of any benchmark run.
const HOLD_SECONDS: f64 = 1.0e6;

/// A synth with `voices` sounding voices spread over a few octaves.
fn sustained(voices: usize, pulse: PulseType) -> Option<PulseSynth> {
    let config = EngineConfig {
        max_voices: voices,
        queue_capacity: voices * 3,
        ..Default::default()
    };
    let (mut synth, mut trigger) = pulse_synth(&config).ok()?;
    for i in 0..voices {
        let hz = 110.0 * 2f32.powf((i % 36) as f32 / 12.0);
        trigger.trigger(pulse, hz, 0.0, HOLD_SECONDS).ok()?;
    }
    // Admit everything before measuring.
    synth.render_block(&mut [0.0; 64]);
    Some(synth)
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for voices in [1, 8, 64] {
            for (name, pulse) in [("plain", PulseType::Plain(1)), ("composed", PulseType::Composed)] {
                let Some(mut synth) = sustained(voices, pulse) else {
                    continue;
                };
                let id = BenchmarkId::new(format!("{name}_x{voices}"), size);
                group.bench_with_input(id, &size, |b, _| {
                    b.iter(|| synth.render_block(black_box(&mut buffer)))
                });
            }
        }
    }

    group.finish();
}

/// One chord triggered per block, each note short enough to be reaped a few
/// blocks later - the steady state of a busy pattern.
pub fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/churn");
    let config = EngineConfig {
        note_length: 0.01,
        ..Default::default()
    };

    for &size in BLOCK_SIZES {
        let Ok((mut synth, mut trigger)) = pulse_synth(&config) else {
            continue;
        };
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("chord_per_block", size), &size, |b, _| {
            b.iter(|| {
                for hz in [220.0, 277.18, 329.63] {
                    let _ = trigger.trigger(PulseType::Plain(2), hz, 0.0, config.note_length);
                }
                synth.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
