//! Awaitable completion handle for animations and timelines.

use std::future::IntoFuture;
use std::sync::OnceLock;

use futures::future::BoxFuture;
use tokio::sync::watch;

use super::errors::{AnimationError, AnimationResult};

/// How a run of an instance ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed,
    Failed(String),
}

/// The most recently settled run and how it ended
pub(crate) type Settled = Option<(u64, RunOutcome)>;

/// Resolves when the owning instance reaches `Completed`, fails with
/// [`AnimationError::Runtime`] when a frame errors, and with
/// [`AnimationError::Dropped`] when the instance goes away first.
///
/// A handle belongs to the run that was live when it was taken and settles
/// with the first outcome of that run or any later one. Replaying the
/// instance never un-resolves it.
///
/// The instance still has to be ticked for the handle to resolve, so it is
/// normally awaited from a different task than the one driving frames.
#[derive(Debug, Clone)]
pub struct Completion {
    run: u64,
    settled: watch::Receiver<Settled>,
    resolved: OnceLock<AnimationResult<()>>,
}

impl Completion {
    pub(crate) fn new(run: u64, settled: watch::Receiver<Settled>) -> Self {
        Self {
            run,
            settled,
            resolved: OnceLock::new(),
        }
    }

    /// Latch the outcome once a run at or after ours has settled
    fn observe(&self) -> Option<AnimationResult<()>> {
        if let Some(result) = self.resolved.get() {
            return Some(result.clone());
        }
        let result = match &*self.settled.borrow() {
            Some((run, outcome)) if *run >= self.run => match outcome {
                RunOutcome::Completed => Ok(()),
                RunOutcome::Failed(reason) => Err(AnimationError::Runtime(reason.clone())),
            },
            _ => return None,
        };
        Some(self.resolved.get_or_init(|| result).clone())
    }

    /// Non-blocking check
    pub fn try_result(&self) -> Option<AnimationResult<()>> {
        self.observe()
    }

    pub async fn wait(mut self) -> AnimationResult<()> {
        loop {
            if let Some(result) = self.observe() {
                return result;
            }
            self.settled
                .changed()
                .await
                .map_err(|_| AnimationError::Dropped)?;
        }
    }
}

impl IntoFuture for Completion {
    type Output = AnimationResult<()>;
    type IntoFuture = BoxFuture<'static, AnimationResult<()>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}
