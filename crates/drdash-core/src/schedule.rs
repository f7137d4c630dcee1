//! Adaptive refresh scheduling.
//!
//! A time-of-day policy maps the current hour to a poll interval, and
//! [`RefreshScheduler`] drives a poll callback on that cadence:
//! `Idle -> Scheduled -> (fires) -> Scheduled`, self-repeating, with a
//! side transition on visibility-became-active that polls immediately
//! and re-arms. Poll outcome never affects re-arming -- the next tick
//! is the retry mechanism.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

// ── Policy ──────────────────────────────────────────────────────────

/// A time-of-day interval with an associated poll interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSlot {
    pub start_hour: u32,
    pub end_hour: u32,
    pub interval: Duration,
}

/// Ordered refresh slots plus the fallback interval.
///
/// Slots are evaluated in order and the first one containing the
/// current hour wins. Ranges may be disjoint, overlapping, or
/// incomplete -- no normalization is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub slots: Vec<RefreshSlot>,
    pub default_interval: Duration,
}

impl RefreshPolicy {
    /// A policy with no slots: every hour uses `default_interval`.
    pub fn uniform(default_interval: Duration) -> Self {
        Self {
            slots: Vec::new(),
            default_interval,
        }
    }

    /// Resolve the poll interval for the given hour: the first slot
    /// where `start_hour <= hour < end_hour`, else the default.
    pub fn resolve_interval(&self, hour: u32) -> Duration {
        self.slots
            .iter()
            .find(|slot| slot.start_hour <= hour && hour < slot.end_hour)
            .map_or(self.default_interval, |slot| slot.interval)
    }
}

fn current_hour() -> u32 {
    chrono::Local::now().hour()
}

// ── Scheduler ───────────────────────────────────────────────────────

/// Drives a poll callback on the policy's cadence.
///
/// The interval is recomputed from the wall-clock hour each time the
/// timer re-arms, so a cycle that straddles a slot boundary picks up
/// the new interval on its next fire, not mid-wait.
pub struct RefreshScheduler {
    policy: RefreshPolicy,
    kick: Arc<Notify>,
    cancel: CancellationToken,
}

impl RefreshScheduler {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            kick: Arc::new(Notify::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// Spawn the scheduling loop. Call once; the loop runs until
    /// [`stop`](Self::stop).
    ///
    /// Each cycle arms a one-shot timer from the current hour's
    /// interval; on fire it runs `poll`, then re-arms. A visibility
    /// kick interrupts the pending timer, polls immediately, and
    /// re-arms the same way. The callback is infallible by signature --
    /// fetch and decode failures are the poller's concern, and the
    /// loop re-arms regardless of what `poll` did.
    pub fn start<F, Fut>(&self, poll: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let policy = self.policy.clone();
        let kick = Arc::clone(&self.kick);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                let interval = policy.resolve_interval(current_hour());
                trace!(?interval, "refresh timer armed");

                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    () = kick.notified() => {
                        debug!("visibility kick, polling out of band");
                        poll().await;
                    }
                    () = tokio::time::sleep(interval) => {
                        poll().await;
                    }
                }
            }
            debug!("refresh scheduler stopped");
        })
    }

    /// React to a visibility transition.
    ///
    /// Becoming visible triggers an immediate out-of-band poll and
    /// restarts the timer. Becoming hidden does nothing -- the timer
    /// keeps running in the background.
    pub fn on_visibility_change(&self, hidden: bool) {
        if !hidden {
            self.kick.notify_one();
        }
    }

    /// Cancel any pending timer and end the loop. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}
