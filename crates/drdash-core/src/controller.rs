// ── Dashboard controller ──
//
// Orchestrates one full refresh cycle: fetch a snapshot from the
// backend, aggregate every node, and publish the render-ready view
// through a watch channel. The renderer subscribes and re-renders
// idempotently; layout is computed at draw time from the published
// view, so a stale card count can never be laid out after a newer
// snapshot has replaced it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use drdash_api::DashboardClient;

use crate::error::CoreError;
use crate::model::{DashboardSnapshot, DatabaseNode, Titles};
use crate::schedule::{RefreshPolicy, RefreshScheduler};
use crate::status::{NodeView, aggregate_node};

// ── Published state ──────────────────────────────────────────────────

/// Render-ready output of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub nodes: Vec<NodeView>,
    /// Localized titles, present only when the mock endpoint supplied them.
    pub titles: Option<Titles>,
    pub fetched_at: DateTime<Utc>,
}

/// What the renderer should currently show.
///
/// `Failed` fully replaces any previous `Ready` -- a poll failure
/// surfaces one aggregate error state and drops the per-node views, so
/// no partial or stale cards are left visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// No poll has completed yet.
    Loading,
    Ready(Arc<DashboardView>),
    Failed(CoreError),
}

/// Which endpoint to poll.
#[derive(Debug, Clone)]
pub enum PollMode {
    /// `GET /api/data`.
    Live,
    /// `GET /api/mock-data?lang=...` -- demo data plus localized titles.
    Mock { lang: String },
}

// ── Controller ───────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Owns the most recent snapshot (inside
/// the watch channel), the refresh scheduler, and the single-flight
/// refresh gate.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    client: DashboardClient,
    mode: PollMode,
    scheduler: RefreshScheduler,
    state: watch::Sender<DashboardState>,
    /// Single-flight guard: a refresh already in progress causes a
    /// concurrent trigger (scheduled tick racing a visibility kick) to
    /// be coalesced, not duplicated.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl Controller {
    /// Create a controller. Does not poll -- call [`start`](Self::start)
    /// to perform the initial refresh and begin the schedule.
    pub fn new(client: DashboardClient, mode: PollMode, policy: RefreshPolicy) -> Self {
        let (state, _) = watch::channel(DashboardState::Loading);
        Self {
            inner: Arc::new(ControllerInner {
                client,
                mode,
                scheduler: RefreshScheduler::new(policy),
                state,
                refresh_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Subscribe to dashboard state changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// The current dashboard state.
    pub fn current_state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    // ── Refresh cycle ────────────────────────────────────────────────

    /// Run one refresh cycle: fetch, aggregate, publish.
    ///
    /// If a refresh is already in flight the trigger is coalesced and
    /// this returns immediately. Failures of any kind (transport,
    /// decode, application) publish a single `Failed` state and leave
    /// the scheduler untouched -- the next tick is the retry.
    pub async fn refresh(&self) {
        let Ok(_guard) = self.inner.refresh_gate.try_lock() else {
            debug!("refresh already in flight, coalescing trigger");
            return;
        };

        let fetched = match &self.inner.mode {
            PollMode::Live => self
                .inner
                .client
                .fetch_status()
                .await
                .map(|data| (data, None)),
            PollMode::Mock { lang } => self.inner.client.fetch_mock_status(lang).await,
        };

        match fetched {
            Ok((data, titles)) => {
                let snapshot =
                    DashboardSnapshot::new(data.into_iter().map(DatabaseNode::from).collect());
                let view = DashboardView {
                    nodes: snapshot.nodes.iter().map(aggregate_node).collect(),
                    titles: titles.map(Titles::from),
                    fetched_at: snapshot.captured_at,
                };
                debug!(nodes = view.nodes.len(), "refresh complete");
                self.inner
                    .state
                    .send_replace(DashboardState::Ready(Arc::new(view)));
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(error = %err, "refresh failed");
                self.inner.state.send_replace(DashboardState::Failed(err));
            }
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Perform the initial refresh and start the adaptive schedule.
    pub fn start(&self) {
        let scheduled = self.clone();
        let _ = self.inner.scheduler.start(move || {
            let controller = scheduled.clone();
            async move { controller.refresh().await }
        });

        // Initial fetch happens immediately, outside the timer cadence.
        let initial = self.clone();
        tokio::spawn(async move { initial.refresh().await });
    }

    /// Forward a visibility transition to the scheduler: becoming
    /// visible polls immediately and re-arms, becoming hidden is a
    /// no-op.
    pub fn visibility(&self, hidden: bool) {
        self.inner.scheduler.on_visibility_change(hidden);
    }

    /// Stop the refresh schedule. Idempotent.
    pub fn shutdown(&self) {
        self.inner.scheduler.stop();
    }
}
