use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Monotonic frame counter owned by the render domain.
///
/// The render side advances it once per block; the control side reads it to
/// stamp commands with "now" in the render domain's own time base. Clones
/// share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RenderClock {
    frames: Arc<AtomicU64>,
}

impl RenderClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// First frame of the next block to be rendered.
    #[inline]
    pub fn now(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::Release);
    }
}

/// Convert a duration in seconds to whole frames, rounding to nearest.
///
/// Negative or non-finite input maps to zero.
pub fn seconds_to_frames(seconds: f64, sample_rate: f32) -> u64 {
    let frames = (seconds * sample_rate as f64).round();
    if frames.is_finite() && frames > 0.0 {
        frames as u64
    } else {
        0
    }
}
