//! Time sources and the frame loop that drives playback.
//!
//! Animations and timelines are pulled forward one frame at a time: the host
//! calls [`Playback::tick`] on every frame and the instance samples its clock.
//! [`FrameTicker`] and [`drive`] provide that loop on top of tokio for hosts
//! that don't have a frame callback of their own.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, Instant, Interval, MissedTickBehavior};
use tracing::trace;

use super::Playback;

/// Frames per second used when nothing else is configured
pub const DEFAULT_FPS: u32 = 60;

/// A monotonic time source reporting milliseconds
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> f64;
}

/// Shared clock handle held by animations and timelines
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock measured from its creation.
///
/// Reads tokio's [`Instant`], so it follows paused time in tokio tests.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, millis: f64) {
        self.millis.store(millis.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, millis: f64) {
        self.set(self.now() + millis);
    }

    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.millis.load(Ordering::SeqCst))
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock").field("millis", &self.now()).finish()
    }
}

/// Fixed-rate frame loop
pub struct FrameTicker {
    interval: Interval,
    fps: u32,
}

impl FrameTicker {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        let mut interval = interval(Self::frame_duration_for(fps));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, fps }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Calculate the frame duration based on FPS
    pub fn frame_duration(&self) -> Duration {
        Self::frame_duration_for(self.fps)
    }

    fn frame_duration_for(fps: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / fps as u64)
    }

    /// Sleep until next frame
    pub async fn next_frame(&mut self) {
        self.interval.tick().await;
    }
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

/// Tick `player` once per frame until it stops running.
///
/// A pending autoplay counts as running, so a freshly built autoplay
/// animation can be handed straight to this loop. Returns the number of
/// frames ticked.
pub async fn drive<P: Playback + ?Sized>(player: &mut P, ticker: &mut FrameTicker) -> u64 {
    let mut frames = 0;
    loop {
        ticker.next_frame().await;
        frames += 1;
        if !player.tick() {
            trace!(frames, "frame loop finished");
            return frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let shared = clock.shared();
        assert_eq!(shared.now(), 0.0);

        clock.advance(16.5);
        assert_eq!(shared.now(), 16.5);

        clock.set(1000.0);
        assert_eq!(shared.now(), 1000.0);
    }

    #[test]
    fn test_monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[tokio::test]
    async fn test_frame_duration() {
        let ticker = FrameTicker::new(50);
        assert_eq!(ticker.frame_duration(), Duration::from_millis(20));
        assert_eq!(FrameTicker::new(0).fps(), 1);
    }
}
