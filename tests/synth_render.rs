//! End-to-end render tests: control-side triggers through the command ring
//! into rendered blocks.

use pulse_seq::{
    dsp::PulseType,
    sequencing::NoteGenerator,
    synth::{pulse_synth, PulseSynth, VoiceTrigger},
    EngineConfig,
};

const BUS: f32 = 0.2;

fn engine(config: EngineConfig) -> (PulseSynth, VoiceTrigger) {
    pulse_synth(&config).expect("valid config")
}

fn render(synth: &mut PulseSynth, frames: usize) -> Vec<f32> {
    let mut out = vec![0.0; frames];
    synth.render_block(&mut out);
    out
}

#[test]
fn a4_plain_quarter_duty_waveform() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    trigger.trigger(PulseType::Plain(1), 440.0, 0.0, 0.1).unwrap();

    // 48000 / 440 = 109 samples per cycle, 27 of them high; the counter
    // resets one sample past the cycle, so the pattern repeats every 110.
    let out = render(&mut synth, 220);
    assert!(out[..27].iter().all(|&s| s == BUS));
    assert!(out[27..110].iter().all(|&s| s == 0.0));
    assert!(out[110..137].iter().all(|&s| s == BUS));
    assert!(out[137..].iter().all(|&s| s == 0.0));
}

#[test]
fn composed_voice_walks_the_duty_table() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    trigger.trigger(PulseType::Composed, 440.0, 0.0, 0.1).unwrap();

    let out = render(&mut synth, 2300);
    // Ten cycles at 1/8 (13 high), then ten at 1/4 (27 high), then 1/2.
    assert!(out[..13].iter().all(|&s| s == BUS));
    assert_eq!(out[13], 0.0);
    assert!(out[1100..1127].iter().all(|&s| s == BUS));
    assert_eq!(out[1127], 0.0);
    assert!(out[2200..2254].iter().all(|&s| s == BUS));
    assert_eq!(out[2254], 0.0);
}

#[test]
fn delayed_voice_is_silent_until_its_start() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    trigger.trigger(PulseType::Plain(2), 440.0, 0.01, 0.1).unwrap();

    let first = render(&mut synth, 256);
    assert!(first.iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 1);

    // Start lands on frame 480, i.e. index 224 of the second block.
    let second = render(&mut synth, 256);
    assert!(second[..224].iter().all(|&s| s == 0.0));
    assert!(second[224..].iter().all(|&s| s == BUS));
}

#[test]
fn finished_voice_is_reclaimed_and_stays_silent() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    trigger.trigger(PulseType::Plain(2), 100.0, 0.0, 0.01).unwrap();

    let _ = render(&mut synth, 256);
    let second = render(&mut synth, 256);
    // Stop frame 480 is exclusive.
    assert!(second[224..].iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 1);

    let third = render(&mut synth, 256);
    assert!(third.iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 0);

    for _ in 0..4 {
        assert!(render(&mut synth, 256).iter().all(|&s| s == 0.0));
        assert_eq!(synth.live_voices(), 0);
    }
}

#[test]
fn voices_sum_on_the_bus() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    trigger.trigger(PulseType::Plain(0), 440.0, 0.0, 0.1).unwrap();
    trigger.trigger(PulseType::Plain(0), 440.0, 0.0, 0.1).unwrap();

    let out = render(&mut synth, 16);
    assert!(out[..13].iter().all(|&s| s == 2.0 * BUS));
}

#[test]
fn all_notes_off_cuts_sounding_voices() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    for hz in [220.0, 330.0, 440.0] {
        trigger.trigger(PulseType::Plain(2), hz, 0.0, 1.0).unwrap();
    }
    let _ = render(&mut synth, 128);
    assert_eq!(synth.live_voices(), 3);

    trigger.all_notes_off().unwrap();
    let out = render(&mut synth, 128);
    assert!(out.iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 0);
}

#[test]
fn full_pool_refuses_new_voices() {
    let (mut synth, mut trigger) = engine(EngineConfig {
        max_voices: 2,
        ..Default::default()
    });
    for _ in 0..3 {
        trigger.trigger(PulseType::Plain(0), 440.0, 0.0, 0.1).unwrap();
    }

    let _ = render(&mut synth, 64);
    assert_eq!(synth.live_voices(), 2);
    assert_eq!(synth.refused_voices(), 1);
}

#[test]
fn out_of_range_note_never_sounds() {
    let config = EngineConfig::default();
    let (mut synth, trigger) = engine(config.clone());
    let mut note_gen = NoteGenerator::new(trigger, &config);

    assert_eq!(note_gen.generate(&[127]), 0);
    let out = render(&mut synth, 512);
    assert!(out.iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 0);
}

#[test]
fn invalid_triggers_never_reach_the_render_side() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    assert!(trigger.trigger(PulseType::Plain(3), 440.0, 0.0, 0.1).is_err());
    assert!(trigger.trigger(PulseType::Plain(0), 0.0, 0.0, 0.1).is_err());
    assert!(trigger.trigger(PulseType::Plain(0), 440.0, -1.0, 0.1).is_err());

    let _ = render(&mut synth, 64);
    assert_eq!(synth.live_voices(), 0);
}

#[test]
fn clock_tracks_rendered_frames() {
    let (mut synth, trigger) = engine(EngineConfig::default());
    let _ = render(&mut synth, 300);
    let _ = render(&mut synth, 212);
    assert_eq!(trigger.now(), 512);
    assert_eq!(synth.clock().now(), 512);
}

#[test]
fn huge_duration_is_long_running() {
    let (mut synth, mut trigger) = engine(EngineConfig::default());
    let _ = render(&mut synth, 128);
    trigger.trigger(PulseType::Plain(2), 440.0, 0.0, 1.0e300).unwrap();

    for _ in 0..4 {
        let out = render(&mut synth, 128);
        assert!(out.iter().any(|&s| s == BUS));
        assert_eq!(synth.live_voices(), 1);
    }
}

#[test]
fn all_notes_off_fits_on_a_saturated_ring() {
    let (mut synth, mut trigger) = engine(EngineConfig {
        queue_capacity: 7,
        ..Default::default()
    });
    while trigger.trigger(PulseType::Plain(2), 440.0, 0.0, 1.0).is_ok() {}

    trigger.all_notes_off().unwrap();
    let out = render(&mut synth, 128);
    assert!(out.iter().all(|&s| s == 0.0));
    assert_eq!(synth.live_voices(), 0);
}
