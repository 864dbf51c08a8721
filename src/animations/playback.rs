//! Playback state machine shared by animations and timelines.
//!
//! `PlaybackCore` owns the run state, the clock bookkeeping for pause and
//! resume, the single active [`ProgressDriver`] and the watch channels behind
//! the live state/progress streams. The owning type decides what a progress
//! sample means (property interpolation or child seeking).

use tokio::sync::watch;
use tracing::{debug, error};

use super::clock::SharedClock;
use super::completion::{Completion, RunOutcome, Settled};
use super::easing::Easing;
use super::progress::{ProgressDriver, ProgressSample};
use super::AnimationState;

#[derive(Debug)]
pub(crate) struct PlaybackCore {
    label: &'static str,
    clock: SharedClock,
    span: f64,
    delay: f64,
    easing: Easing,
    state: AnimationState,
    start_time: f64,
    paused_time: f64,
    progress: f64,
    driver: Option<ProgressDriver>,
    autoplay_pending: bool,
    run: u64,
    settled_run: u64,
    state_tx: watch::Sender<AnimationState>,
    progress_tx: watch::Sender<f64>,
    outcome_tx: watch::Sender<Settled>,
}

impl PlaybackCore {
    pub fn new(
        label: &'static str,
        clock: SharedClock,
        span: f64,
        delay: f64,
        easing: Easing,
        autoplay: bool,
    ) -> Self {
        let (state_tx, _) = watch::channel(AnimationState::Idle);
        let (progress_tx, _) = watch::channel(0.0);
        let (outcome_tx, _) = watch::channel(None);
        Self {
            label,
            clock,
            span,
            delay,
            easing,
            state: AnimationState::Idle,
            start_time: 0.0,
            paused_time: 0.0,
            progress: 0.0,
            driver: None,
            autoplay_pending: autoplay,
            run: 0,
            settled_run: 0,
            state_tx,
            progress_tx,
            outcome_tx,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Also retargets the driver of a run in progress
    pub fn set_span(&mut self, span: f64) {
        self.span = span;
        if let Some(driver) = self.driver.as_mut() {
            driver.set_duration(span);
        }
    }

    pub fn watch_state(&self) -> watch::Receiver<AnimationState> {
        self.state_tx.subscribe()
    }

    pub fn watch_progress(&self) -> watch::Receiver<f64> {
        self.progress_tx.subscribe()
    }

    pub fn completion(&self) -> Completion {
        Completion::new(self.run, self.outcome_tx.subscribe())
    }

    /// Running, or about to start on the next tick
    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Running || self.autoplay_pending
    }

    fn transition(&mut self, state: AnimationState) {
        if self.state != state {
            debug!(target: "motionline", kind = self.label, from = %self.state, to = %state, "state change");
        }
        self.state = state;
        self.state_tx.send_replace(state);
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
        self.progress_tx.send_replace(progress);
    }

    /// Returns `false` when already running
    pub fn play(&mut self) -> bool {
        self.autoplay_pending = false;
        if self.state == AnimationState::Running {
            return false;
        }

        let now = self.clock.now();
        self.start_time = if self.state == AnimationState::Paused {
            now - self.paused_time
        } else {
            self.run += 1;
            now + self.delay
        };

        self.driver = None;
        self.transition(AnimationState::Running);
        self.driver = Some(ProgressDriver::new(
            self.span,
            self.start_time,
            self.easing.clone(),
        ));
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != AnimationState::Running {
            return false;
        }
        self.paused_time = self.clock.now() - self.start_time;
        self.driver = None;
        self.transition(AnimationState::Paused);
        true
    }

    pub fn stop(&mut self) {
        self.driver = None;
        self.autoplay_pending = false;
        self.transition(AnimationState::Idle);
        self.set_progress(0.0);
    }

    /// Sample the driver for the current frame, starting a pending autoplay first
    pub fn next_sample(&mut self) -> Option<ProgressSample> {
        if self.autoplay_pending {
            self.play();
        }
        if self.state != AnimationState::Running {
            return None;
        }
        let now = self.clock.now();
        self.driver.as_mut()?.sample(now)
    }

    pub fn finish(&mut self) {
        if self.state != AnimationState::Running {
            return;
        }
        self.driver = None;
        self.transition(AnimationState::Completed);
        self.settle(RunOutcome::Completed);
    }

    /// Contain a frame error: log it, release the driver, reject completion
    pub fn fail(&mut self, reason: String) {
        error!(target: "motionline", kind = self.label, error = %reason, "animation frame failed");
        self.driver = None;
        self.transition(AnimationState::Idle);
        self.settle(RunOutcome::Failed(reason));
    }

    /// Publish the outcome of the current run; each run settles at most once
    fn settle(&mut self, outcome: RunOutcome) {
        if self.run == 0 || self.settled_run == self.run {
            return;
        }
        self.settled_run = self.run;
        self.outcome_tx.send_replace(Some((self.run, outcome)));
    }
}
