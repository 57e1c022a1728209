use std::{fmt, str::FromStr};

use super::{
    composed::ComposedPulseOscillator,
    duty::DutyIndex,
    pulse::{Frequency, PulseOscillator},
};

/// Which oscillator new voices are built with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseType {
    /// Fixed duty ratio for the whole note.
    Plain(usize),
    /// Duty ratio cycles through the table while the note sounds.
    Composed,
}

impl PulseType {
    pub const ALL: [PulseType; 4] = [
        PulseType::Plain(0),
        PulseType::Plain(1),
        PulseType::Plain(2),
        PulseType::Composed,
    ];
}

impl Default for PulseType {
    fn default() -> Self {
        PulseType::Plain(0)
    }
}

impl fmt::Display for PulseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseType::Plain(duty) => write!(f, "plain-duty-{duty}"),
            PulseType::Composed => f.write_str("composed"),
        }
    }
}

impl FromStr for PulseType {
    type Err = ParsePulseTypeError;

    /// Accepts `plain-duty-N`, the bare duty digit `N`, or `composed`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("composed") {
            return Ok(PulseType::Composed);
        }

        let digits = s.strip_prefix("plain-duty-").unwrap_or(s);
        let duty: usize = digits
            .parse()
            .map_err(|_| ParsePulseTypeError(s.to_string()))?;
        DutyIndex::new(duty).map_err(|_| ParsePulseTypeError(s.to_string()))?;
        Ok(PulseType::Plain(duty))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePulseTypeError(pub String);

impl fmt::Display for ParsePulseTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown pulse type '{}' (expected plain-duty-0, plain-duty-1, plain-duty-2 or composed)",
            self.0
        )
    }
}

impl std::error::Error for ParsePulseTypeError {}

/// Errors raised while building an oscillator, before it can reach the
/// render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OscillatorError {
    InvalidFrequency(f32),
    InvalidDutyIndex(usize),
}

impl fmt::Display for OscillatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorError::InvalidFrequency(hz) => {
                write!(f, "frequency must be finite and > 0 Hz, got {hz}")
            }
            OscillatorError::InvalidDutyIndex(index) => write!(
                f,
                "duty index {index} out of range (0..{})",
                DutyIndex::COUNT
            ),
        }
    }
}

impl std::error::Error for OscillatorError {}

/// The oscillator a voice renders, chosen once when the voice is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseOsc {
    Plain { osc: PulseOscillator, duty: DutyIndex },
    Composed(ComposedPulseOscillator),
}

impl PulseOsc {
    pub fn new(pulse: PulseType) -> Result<Self, OscillatorError> {
        Ok(match pulse {
            PulseType::Plain(duty) => PulseOsc::Plain {
                osc: PulseOscillator::new(),
                duty: DutyIndex::new(duty)?,
            },
            PulseType::Composed => PulseOsc::Composed(ComposedPulseOscillator::new()),
        })
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: Frequency, sample_rate: f32) -> f32 {
        match self {
            PulseOsc::Plain { osc, duty } => osc.render_sample(frequency, *duty, sample_rate),
            PulseOsc::Composed(osc) => osc.render_sample(frequency, sample_rate),
        }
    }

    /// Duty ratio that the next sample will use.
    pub fn duty(&self) -> DutyIndex {
        match self {
            PulseOsc::Plain { duty, .. } => *duty,
            PulseOsc::Composed(osc) => osc.duty(),
        }
    }
}
