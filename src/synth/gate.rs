//! Start/stop gate evaluated against the render clock.
//!
//! Timestamps are frame positions on the render domain's sample clock. A gate
//! with no start time is "never started": it stays silent no matter how many
//! blocks are rendered. A gate with no stop time never finishes on its own.

/// How a gate treats a stop time that lands before its start time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatePolicy {
    /// Store each command as received; last write wins per field. A stop
    /// before the start yields a voice that never sounds and is reclaimed
    /// once the clock passes the stop time.
    #[default]
    Accept,
    /// Move a stop that precedes the start up to the start time.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Pending,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoiceGate {
    start_at: Option<u64>,
    stop_at: Option<u64>,
    policy: LatePolicy,
}

impl VoiceGate {
    pub fn new(policy: LatePolicy) -> Self {
        Self {
            start_at: None,
            stop_at: None,
            policy,
        }
    }

    pub fn start(&mut self, at: u64) {
        self.start_at = Some(at);
        self.apply_policy();
    }

    pub fn stop(&mut self, at: u64) {
        self.stop_at = Some(at);
        self.apply_policy();
    }

    fn apply_policy(&mut self) {
        if self.policy == LatePolicy::Clamp {
            if let (Some(start), Some(stop)) = (self.start_at, self.stop_at) {
                self.stop_at = Some(stop.max(start));
            }
        }
    }

    /// Whether the sample at frame `now` carries the oscillator's output.
    ///
    /// The stop frame itself is already silent.
    #[inline]
    pub fn should_render(&self, now: u64) -> bool {
        match self.start_at {
            Some(start) => now >= start && self.stop_at.map_or(true, |stop| now < stop),
            None => false,
        }
    }

    #[inline]
    pub fn is_finished(&self, now: u64) -> bool {
        self.stop_at.is_some_and(|stop| now > stop)
    }

    pub fn state(&self, now: u64) -> VoiceState {
        if self.is_finished(now) {
            VoiceState::Finished
        } else if self.start_at.is_some_and(|start| now >= start) {
            VoiceState::Active
        } else {
            VoiceState::Pending
        }
    }

    pub fn start_at(&self) -> Option<u64> {
        self.start_at
    }

    pub fn stop_at(&self) -> Option<u64> {
        self.stop_at
    }
}
