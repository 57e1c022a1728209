//! Coarse tempo clock for the control domain.
//!
//! A background thread fires once per subdivision and calls every listener
//! in registration order. The clock is not sample-accurate: timer jitter
//! only shifts when commands are stamped, never how they render.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::{select, tick, Sender};
use tracing::{debug, info};

pub type Listener = Box<dyn FnMut() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

struct Timer {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct BeatClock {
    tempo: f64,
    resolution: u32,
    listeners: Arc<Mutex<Vec<(ListenerId, Listener)>>>,
    next_listener: u64,
    timer: Option<Timer>,
}

impl BeatClock {
    pub fn new(tempo: f64, resolution: u32) -> Result<Self, BeatClockError> {
        if resolution == 0 {
            return Err(BeatClockError::InvalidResolution);
        }
        tick_interval(tempo, resolution)?;

        Ok(Self {
            tempo,
            resolution,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: 0,
            timer: None,
        })
    }

    /// Time between ticks: `60 s / tempo / resolution`.
    pub fn interval(&self) -> Duration {
        tick_interval(self.tempo, self.resolution).unwrap_or(Duration::MAX)
    }

    /// Change tempo. A running clock is re-armed immediately, so the next
    /// tick lands one new interval from now rather than keeping phase.
    pub fn set_tempo(&mut self, tempo: f64) -> Result<(), BeatClockError> {
        tick_interval(tempo, self.resolution)?;
        self.tempo = tempo;
        info!(tempo, "tempo changed");
        if self.is_running() {
            self.start();
        }
        Ok(())
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Arm the periodic timer, replacing any schedule already running.
    pub fn start(&mut self) {
        self.stop();

        let interval = self.interval();
        let listeners = Arc::clone(&self.listeners);
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let handle = thread::spawn(move || {
            let ticker = tick(interval);
            loop {
                select! {
                    recv(ticker) -> _ => {
                        let mut listeners = listeners.lock().unwrap_or_else(PoisonError::into_inner);
                        for (_, listener) in listeners.iter_mut() {
                            listener();
                        }
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
        });

        debug!(interval_ms = interval.as_secs_f64() * 1000.0, "beat clock armed");
        self.timer = Some(Timer { stop_tx, handle });
    }

    /// Disarm the timer. Blocks until an in-flight tick has finished, so no
    /// listener runs after this returns.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            let _ = timer.stop_tx.send(());
            let _ = timer.handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn state(&self) -> ClockState {
        if self.is_running() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}

impl Drop for BeatClock {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `60 s / tempo / resolution`, or an error when the tempo is not finite and
/// positive or the interval is zero or too long for a [`Duration`].
pub fn tick_interval(tempo: f64, resolution: u32) -> Result<Duration, BeatClockError> {
    if !(tempo.is_finite() && tempo > 0.0) || resolution == 0 {
        return Err(BeatClockError::InvalidTempo(tempo));
    }
    match Duration::try_from_secs_f64(60.0 / tempo / resolution as f64) {
        Ok(interval) if !interval.is_zero() => Ok(interval),
        _ => Err(BeatClockError::InvalidTempo(tempo)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeatClockError {
    InvalidTempo(f64),
    InvalidResolution,
}

impl fmt::Display for BeatClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeatClockError::InvalidTempo(bpm) => {
                write!(f, "tempo must be finite and > 0 BPM, got {bpm}")
            }
            BeatClockError::InvalidResolution => {
                f.write_str("resolution must be at least 1 tick per beat")
            }
        }
    }
}

impl std::error::Error for BeatClockError {}
