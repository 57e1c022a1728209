//! Keyboard transport on a raw-mode terminal.

use std::{io::Write, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal,
};
use tracing::warn;

use pulse_seq::{dsp::PulseType, sequencing::Sequencer};

const TEMPO_STEP: f64 = 5.0;

pub const HELP: &str = "space: play/stop  +/-: tempo  0/1/2: plain duty  c: composed  q: quit";

/// Leaves raw mode when dropped, including on early return.
struct RawMode;

impl RawMode {
    fn enable() -> EyreResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

enum Action {
    Toggle,
    Tempo(f64),
    Pulse(PulseType),
    Quit,
}

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Tempo(TEMPO_STEP)),
        KeyCode::Char('-') => Some(Action::Tempo(-TEMPO_STEP)),
        KeyCode::Char(c @ '0'..='2') => {
            let index = c.to_digit(10)? as usize;
            Some(Action::Pulse(PulseType::Plain(index)))
        }
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Pulse(PulseType::Composed)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

fn status(sequencer: &Sequencer) -> EyreResult<()> {
    let state = if sequencer.is_running() { "playing" } else { "stopped" };
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "\r{state:<8} {:>6.1} BPM  {:<13}",
        sequencer.tempo(),
        sequencer.pulse_type().to_string()
    )?;
    stdout.flush()?;
    Ok(())
}

/// Block on the keyboard until the user quits.
pub fn run(sequencer: &mut Sequencer) -> EyreResult<()> {
    let _raw = RawMode::enable()?;
    status(sequencer)?;

    loop {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key.code) {
            Some(Action::Toggle) => sequencer.toggle(),
            Some(Action::Tempo(delta)) => {
                if let Err(err) = sequencer.set_tempo(sequencer.tempo() + delta) {
                    warn!(%err, "tempo unchanged");
                }
            }
            Some(Action::Pulse(pulse)) => sequencer.set_pulse_type(pulse),
            Some(Action::Quit) => break,
            None => continue,
        }
        status(sequencer)?;
    }

    sequencer.stop();
    print!("\r\n");
    Ok(())
}
