//! Allocation-free render path tests.
//!
//! `PulseSynth::render_block` runs inside the audio callback, so draining
//! commands, admitting voices, rendering and reaping must never touch the
//! heap.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use pulse_seq::{dsp::PulseType, synth::pulse_synth, EngineConfig, MAX_BLOCK_SIZE};

#[test]
fn render_with_voice_churn_is_alloc_free() {
    let config = EngineConfig {
        max_voices: 16,
        ..Default::default()
    };
    let (mut synth, mut trigger) = pulse_synth(&config).unwrap();
    let mut out = vec![0.0f32; MAX_BLOCK_SIZE];

    let pulses = [PulseType::Plain(0), PulseType::Plain(2), PulseType::Composed];
    for round in 0..50 {
        // More triggers than slots, so admission refusal runs too.
        for i in 0..20 {
            let pulse = pulses[i % pulses.len()];
            let hz = 110.0 + 20.0 * i as f32;
            let _ = trigger.trigger(pulse, hz, 0.001 * i as f64, 0.02);
        }
        if round % 10 == 9 {
            trigger.all_notes_off().unwrap();
        }

        assert_no_alloc(|| {
            for _ in 0..4 {
                synth.render_block(&mut out[..512]);
            }
            synth.render_block(&mut out);
        });
    }

    assert!(synth.refused_voices() > 0);
}
