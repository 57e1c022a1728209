//! pulse-seq - step sequencer playing pulse-wave voices
//!
//! Run with: cargo run -- --tempo 120 --pattern "0,4,7|||7|12"

mod audio;
mod controls;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulse_seq::{
    dsp::PulseType,
    sequencing::{grid::StepGrid, Sequencer},
    synth::pulse_synth,
    EngineConfig,
};

/// Played when no `--pattern` is given: a rising arpeggio over the bar.
const DEFAULT_PATTERN: &str = "0|4|7|12|0|4|7|12|2|5|9|12|2|5|9|12";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Beats per minute
    #[arg(long, default_value_t = 60.0)]
    tempo: f64,

    /// Pulse type: plain-duty-0..2 (or just 0..2) or composed
    #[arg(long, default_value_t = PulseType::default())]
    pulse: PulseType,

    /// Steps separated by '|', rows within a step by ',', e.g. "0,4,7||2|"
    #[arg(long)]
    pattern: Option<String>,

    /// Seconds each note sounds
    #[arg(long, default_value_t = 0.1)]
    note_length: f64,

    /// Mix bus gain, 0..=1
    #[arg(long, default_value_t = 0.2)]
    gain: f32,

    /// Maximum simultaneously sounding voices
    #[arg(long, default_value_t = 256)]
    max_voices: usize,
}

impl Args {
    fn engine_config(&self, sample_rate: f32) -> EngineConfig {
        EngineConfig {
            sample_rate,
            tempo: self.tempo,
            pulse_type: self.pulse,
            note_length: self.note_length,
            gain: self.gain,
            max_voices: self.max_voices,
            ..Default::default()
        }
    }
}

/// Parse a step pattern like "0,4,7|2||7" onto a default-sized grid.
/// Unparseable or out-of-grid entries are skipped.
fn parse_pattern(s: &str) -> StepGrid {
    let mut grid = StepGrid::default();
    for (step, rows) in s.split('|').enumerate() {
        for row in rows.split(',').map(str::trim).filter(|r| !r.is_empty()) {
            match row.parse::<usize>() {
                Ok(row) if grid.set(step, row, true) => {}
                _ => warn!(step, row, "pattern entry outside the grid ignored"),
            }
        }
    }
    grid
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let output = audio::Output::open_default()?;
    let config = args.engine_config(output.sample_rate());
    let (synth, trigger) = pulse_synth(&config).wrap_err("invalid engine configuration")?;

    let grid = parse_pattern(args.pattern.as_deref().unwrap_or(DEFAULT_PATTERN));
    let mut sequencer =
        Sequencer::with_grid(&config, trigger, grid).wrap_err("invalid transport settings")?;

    let _stream = output.play(synth)?;
    info!(
        tempo = config.tempo,
        pulse = %config.pulse_type,
        sample_rate = config.sample_rate,
        "ready"
    );
    println!("{}", controls::HELP);

    controls::run(&mut sequencer)
}
