//! Refresh Scheduler
//!
//! Drives the coordinator on a fixed interval and on explicit triggers.
//! - At most one refresh is in flight; overlapping triggers are dropped
//! - `stop()` cancels the timer once and is safe to call repeatedly
//! - A refresh that settles after `stop()` is never committed
//! - The timer task only holds a weak handle, so dropping the last owner
//!   tears it down like `stop()`

use govdash_shared::AiActionResponse;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::aggregator::RefreshError;
use crate::client::SourceError;
use crate::coordinator::{CommitOutcome, DashboardCoordinator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Idle,
    Refreshing,
}

/// What happened to one trigger
#[derive(Debug, Clone)]
pub enum TriggerOutcome {
    Committed,
    Disconnected(RefreshError),
    /// Another refresh was already in flight
    Skipped,
    /// The scheduler was stopped before the result could be committed
    Discarded,
}

/// An AI-agent action followed by one refresh
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Controller reply; `None` when the POST failed or was never sent
    pub reply: Option<AiActionResponse>,
    pub refresh: TriggerOutcome,
}

/// Clears the in-flight flag however the refresh ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RefreshScheduler {
    coordinator: Arc<DashboardCoordinator>,
    interval: Duration,
    in_flight: AtomicBool,
    mounted: AtomicBool,
    shutdown: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    pub fn new(coordinator: Arc<DashboardCoordinator>, interval: Duration) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            coordinator,
            interval,
            in_flight: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
            shutdown,
            handle: Mutex::new(None),
        }
    }

    pub fn coordinator(&self) -> &Arc<DashboardCoordinator> {
        &self.coordinator
    }

    pub fn state(&self) -> SchedulerState {
        if self.in_flight.load(Ordering::Acquire) {
            SchedulerState::Refreshing
        } else {
            SchedulerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
            && self.handle.lock().map(|h| h.is_some()).unwrap_or(false)
    }

    /// Start the interval timer; the first tick fires immediately
    ///
    /// Returns false if the timer was already started or the scheduler has
    /// been stopped.
    pub fn start(self: &Arc<Self>) -> bool {
        if !self.mounted.load(Ordering::Acquire) {
            return false;
        }
        let Ok(mut handle) = self.handle.lock() else {
            return false;
        };
        if handle.is_some() {
            return false;
        }

        let scheduler = Arc::downgrade(self);
        let period = self.interval;
        let mut shutdown = self.shutdown.subscribe();

        *handle = Some(tokio::spawn(async move {
            info!("Starting refresh scheduler (interval: {}s)", period.as_secs_f64());

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = interval.tick() => {
                        let Some(scheduler) = scheduler.upgrade() else {
                            break;
                        };
                        scheduler.try_refresh().await;
                    }
                }
            }

            info!("Refresh scheduler stopped");
        }));
        true
    }

    /// Cancel the timer and discard any refresh still in flight
    pub fn stop(&self) {
        if !self.mounted.swap(false, Ordering::AcqRel) {
            return;
        }
        let _ = self.shutdown.send(true);
        if let Ok(mut handle) = self.handle.lock() {
            handle.take();
        }
        debug!("Refresh scheduler unmounted");
    }

    /// Run one refresh unless one is already in flight
    pub async fn try_refresh(&self) -> TriggerOutcome {
        if !self.mounted.load(Ordering::Acquire) {
            return TriggerOutcome::Discarded;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh already in flight, skipping trigger");
            return TriggerOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.in_flight);

        let result = self.coordinator.aggregator().refresh().await;

        match self.coordinator.commit_if(result, &self.mounted).await {
            Some(CommitOutcome::Committed { .. }) => TriggerOutcome::Committed,
            Some(CommitOutcome::Disconnected(e)) => TriggerOutcome::Disconnected(e),
            None => {
                debug!("Scheduler stopped during refresh, discarding result");
                TriggerOutcome::Discarded
            }
        }
    }

    /// Ask the controller to re-evaluate, then refresh once
    ///
    /// Only the POST is awaited, not the scan. A failed POST is logged and
    /// the refresh still runs.
    pub async fn trigger_scan(&self) -> TriggerOutcome {
        let source = self.coordinator.aggregator().source();
        self.act_then_refresh("Scan trigger", source.trigger_scan()).await.1
    }

    /// Force an AI-agent evaluation, then refresh once
    ///
    /// The evaluation runs in the background on the controller; its result
    /// shows up on a later refresh.
    pub async fn refresh_ai_score(&self) -> ActionOutcome {
        let source = self.coordinator.aggregator().source();
        let (reply, refresh) = self.act_then_refresh("AI evaluation trigger", source.refresh_ai_score()).await;
        ActionOutcome { reply, refresh }
    }

    /// Pause or resume periodic AI scanning, then refresh once
    pub async fn toggle_ai_scan(&self) -> ActionOutcome {
        let source = self.coordinator.aggregator().source();
        let (reply, refresh) = self.act_then_refresh("AI scan toggle", source.toggle_ai_scan()).await;
        ActionOutcome { reply, refresh }
    }

    async fn act_then_refresh<T>(
        &self,
        action: &str,
        request: impl Future<Output = Result<T, SourceError>>,
    ) -> (Option<T>, TriggerOutcome) {
        if !self.mounted.load(Ordering::Acquire) {
            debug!("Scheduler stopped, not sending {}", action);
            return (None, TriggerOutcome::Discarded);
        }

        let reply = match request.await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("{} failed: {}", action, e);
                None
            }
        };
        (reply, self.try_refresh().await)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
