//! Clock-driven progress sampling.
//!
//! A [`ProgressDriver`] turns clock readings into eased progress samples for
//! one run of an animation. It stops producing samples right after the first
//! sample whose raw progress reaches `1`. Dropping the driver cancels it.

use super::easing::Easing;

/// One progress sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Elapsed fraction clamped to `[0, 1]`
    pub raw: f64,
    /// `easing(raw)`, not clamped
    pub eased: f64,
    /// Set on the final sample of the run
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressDriver {
    duration: f64,
    start_time: f64,
    easing: Easing,
    finished: bool,
}

impl ProgressDriver {
    /// `start_time` is an absolute clock reading in milliseconds; it may lie
    /// in the future to express a delay.
    pub fn new(duration: f64, start_time: f64, easing: Easing) -> Self {
        Self {
            duration,
            start_time,
            easing,
            finished: false,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stretch or shrink a live run; later samples use the new duration
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Sample progress at `now`, or `None` once the run has ended
    pub fn sample(&mut self, now: f64) -> Option<ProgressSample> {
        if self.finished {
            return None;
        }

        let raw = if self.duration <= 0.0 {
            1.0
        } else {
            ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
        };
        let done = raw >= 1.0;
        self.finished = done;

        Some(ProgressSample {
            raw,
            eased: self.easing.apply(raw),
            done,
        })
    }
}
