//! Benchmarks for pulse waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pulse_seq::dsp::{ComposedPulseOscillator, DutyIndex, Frequency, PulseOscillator};

use crate::BLOCK_SIZES;

const SR: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let Ok(frequency) = Frequency::new(440.0) else {
        return;
    };

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Plain - one compare per sample, cycle length recomputed each sample
        for duty in 0..DutyIndex::COUNT {
            let Ok(duty) = DutyIndex::new(duty) else {
                continue;
            };
            let mut osc = PulseOscillator::new();
            let id = BenchmarkId::new(format!("plain_duty_{}", duty.index()), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| {
                    for out in buffer.iter_mut() {
                        *out = osc.render_sample(black_box(frequency), duty, SR);
                    }
                })
            });
        }

        // Composed - adds the wrap counter and duty walk
        let mut osc = ComposedPulseOscillator::new();
        group.bench_with_input(BenchmarkId::new("composed", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = osc.render_sample(black_box(frequency), SR);
                }
            })
        });
    }

    group.finish();
}
