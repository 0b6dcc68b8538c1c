//! Dashboard Coordinator
//!
//! Sole owner of the committed `DashboardViewModel`, the connectivity flag
//! and the navigation/selection state.
//! - Successful refreshes replace the snapshot and re-resolve the selection
//! - Failed refreshes mark the dashboard disconnected and keep the snapshot
//! - Every commit bumps a revision that subscribers can watch
//!
//! Readers only ever receive `Arc` snapshots.

use chrono::{DateTime, Utc};
use govdash_shared::DashboardViewModel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::aggregator::{Aggregator, RefreshError};
use crate::analytics::{ClusterScoreStrategy, DashboardAnalytics};
use crate::config::StaleSelectionPolicy;
use crate::navigation::{NavigationState, Screen, Tab};
use crate::selection::Reconciliation;

/// What the dashboard can show right now
#[derive(Debug, Clone)]
pub enum DisplayState {
    /// No refresh has completed yet
    Loading,
    /// No snapshot and the last attempt failed
    Failed { error: RefreshError },
    Ready {
        snapshot: Arc<DashboardViewModel>,
        connected: bool,
        last_error: Option<RefreshError>,
    },
}

/// Result of applying one refresh
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    Committed {
        snapshot: Arc<DashboardViewModel>,
        selection: Reconciliation,
    },
    Disconnected(RefreshError),
}

#[derive(Debug, Default)]
struct CoordinatorState {
    snapshot: Option<Arc<DashboardViewModel>>,
    connected: bool,
    last_error: Option<RefreshError>,
    last_updated: Option<DateTime<Utc>>,
    attempted: bool,
    navigation: NavigationState,
}

pub struct DashboardCoordinator {
    aggregator: Aggregator,
    policy: StaleSelectionPolicy,
    state: RwLock<CoordinatorState>,
    revision: watch::Sender<u64>,
}

impl DashboardCoordinator {
    pub fn new(aggregator: Aggregator, policy: StaleSelectionPolicy) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            aggregator,
            policy,
            state: RwLock::new(CoordinatorState::default()),
            revision,
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Receiver that changes after every commit
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Apply a settled refresh
    pub async fn commit(&self, result: Result<DashboardViewModel, RefreshError>) -> CommitOutcome {
        let outcome = {
            let mut state = self.state.write().await;
            self.apply(&mut state, result)
        };

        self.revision.send_modify(|r| *r += 1);
        outcome
    }

    /// Apply a settled refresh only if `gate` is still set once the state
    /// lock is held; `None` means nothing was written
    pub async fn commit_if(
        &self,
        result: Result<DashboardViewModel, RefreshError>,
        gate: &AtomicBool,
    ) -> Option<CommitOutcome> {
        let outcome = {
            let mut state = self.state.write().await;
            if !gate.load(Ordering::Acquire) {
                return None;
            }
            self.apply(&mut state, result)
        };

        self.revision.send_modify(|r| *r += 1);
        Some(outcome)
    }

    fn apply(
        &self,
        state: &mut CoordinatorState,
        result: Result<DashboardViewModel, RefreshError>,
    ) -> CommitOutcome {
        state.attempted = true;

        match result {
            Ok(vm) => {
                let snapshot = Arc::new(vm);
                let selection = state.navigation.reconcile(&snapshot, self.policy);

                state.last_updated = Some(snapshot.fetched_at);
                state.snapshot = Some(snapshot.clone());
                state.connected = true;
                state.last_error = None;

                debug!(
                    "Committed snapshot: score {}, {} findings, {} servers",
                    snapshot.score.score,
                    snapshot.findings.total,
                    snapshot.mcp_servers.servers.len()
                );
                CommitOutcome::Committed { snapshot, selection }
            }
            Err(e) => {
                state.connected = false;
                state.last_error = Some(e.clone());
                debug!("Refresh failed, keeping previous snapshot: {}", e);
                CommitOutcome::Disconnected(e)
            }
        }
    }

    /// Fetch and commit in one step, without scheduling guards
    pub async fn refresh_now(&self) -> CommitOutcome {
        let result = self.aggregator.refresh().await;
        self.commit(result).await
    }

    pub async fn snapshot(&self) -> Option<Arc<DashboardViewModel>> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.connected
    }

    pub async fn last_error(&self) -> Option<RefreshError> {
        self.state.read().await.last_error.clone()
    }

    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_updated
    }

    pub async fn display_state(&self) -> DisplayState {
        let state = self.state.read().await;
        match (&state.snapshot, &state.last_error) {
            (Some(snapshot), last_error) => DisplayState::Ready {
                snapshot: snapshot.clone(),
                connected: state.connected,
                last_error: last_error.clone(),
            },
            (None, Some(error)) if state.attempted => DisplayState::Failed { error: error.clone() },
            (None, _) => DisplayState::Loading,
        }
    }

    /// Derived analytics for the current snapshot
    pub async fn analytics(&self, strategy: &dyn ClusterScoreStrategy) -> Option<DashboardAnalytics> {
        self.snapshot()
            .await
            .map(|vm| DashboardAnalytics::compute(&vm, strategy))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub async fn navigation(&self) -> NavigationState {
        self.state.read().await.navigation.clone()
    }

    pub async fn screen(&self) -> Screen {
        self.state.read().await.navigation.screen()
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.state.write().await.navigation.select_tab(tab);
    }

    /// Drill into a server of the current snapshot; false when the id is unknown
    pub async fn select_server(&self, id: &str, from: Tab) -> bool {
        let mut state = self.state.write().await;
        let server = state
            .snapshot
            .as_ref()
            .and_then(|vm| vm.mcp_servers.find(id).cloned());

        match server {
            Some(server) => {
                state.navigation.drill_down(server, from);
                true
            }
            None => false,
        }
    }

    pub async fn back(&self) {
        self.state.write().await.navigation.back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Endpoint, GovernanceSource};
    use crate::testing::{sample_servers, StaticSource};

    fn coordinator(source: Arc<StaticSource>, policy: StaleSelectionPolicy) -> DashboardCoordinator {
        let source: Arc<dyn GovernanceSource> = source;
        DashboardCoordinator::new(Aggregator::new(source), policy)
    }

    #[tokio::test]
    async fn test_loading_then_ready() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = coordinator(source, StaleSelectionPolicy::Keep);

        assert!(matches!(coordinator.display_state().await, DisplayState::Loading));

        let outcome = coordinator.refresh_now().await;

        assert!(matches!(outcome, CommitOutcome::Committed { .. }));
        assert!(coordinator.is_connected().await);
        match coordinator.display_state().await {
            DisplayState::Ready { snapshot, connected, last_error } => {
                assert_eq!(snapshot.score.score, 64);
                assert!(connected);
                assert!(last_error.is_none());
            }
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_failure_shows_failed() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        source.fail(Endpoint::Score);
        let coordinator = coordinator(source, StaleSelectionPolicy::Keep);

        coordinator.refresh_now().await;

        match coordinator.display_state().await {
            DisplayState::Failed { error } => assert_eq!(error.endpoint(), Endpoint::Score),
            other => panic!("expected failed state, got {:?}", other),
        }
        assert!(coordinator.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_findings_500_keeps_previous_snapshot() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = coordinator(source.clone(), StaleSelectionPolicy::Keep);

        coordinator.refresh_now().await;
        let before = coordinator.snapshot().await.unwrap();

        source.fail(Endpoint::Findings);
        let outcome = coordinator.refresh_now().await;

        match outcome {
            CommitOutcome::Disconnected(e) => assert_eq!(e.endpoint(), Endpoint::Findings),
            other => panic!("expected disconnect, got {:?}", other),
        }
        assert!(!coordinator.is_connected().await);
        let after = coordinator.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert!(matches!(
            coordinator.display_state().await,
            DisplayState::Ready { connected: false, last_error: Some(_), .. }
        ));

        source.recover(Endpoint::Findings);
        coordinator.refresh_now().await;
        assert!(coordinator.is_connected().await);
        assert!(coordinator.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_selection_survives_refresh_by_id() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = coordinator(source.clone(), StaleSelectionPolicy::Keep);
        coordinator.refresh_now().await;

        assert!(coordinator.select_server("srv-7", Tab::McpServers).await);
        assert!(!coordinator.select_server("srv-404", Tab::McpServers).await);

        let refreshed = coordinator.refresh_now().await;
        let fresh = coordinator.snapshot().await.unwrap();
        match coordinator.screen().await {
            Screen::ServerDetail(server) => {
                assert!(Arc::ptr_eq(&server, fresh.mcp_servers.find("srv-7").unwrap()));
            }
            other => panic!("expected detail screen, got {:?}", other),
        }
        assert!(matches!(
            refreshed,
            CommitOutcome::Committed { selection: Reconciliation::Refreshed(_), .. }
        ));

        // srv-7 disappears; selection stays put
        source.set_servers(sample_servers()[..2].to_vec());
        coordinator.refresh_now().await;
        match coordinator.screen().await {
            Screen::ServerDetail(server) => assert_eq!(server.id, "srv-7"),
            other => panic!("expected detail screen, got {:?}", other),
        }

        coordinator.back().await;
        assert!(matches!(coordinator.screen().await, Screen::ServerList));
    }

    #[tokio::test]
    async fn test_commit_bumps_revision() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = coordinator(source, StaleSelectionPolicy::Keep);
        let mut revisions = coordinator.subscribe();

        coordinator.refresh_now().await;

        assert!(revisions.has_changed().unwrap());
        assert_eq!(*revisions.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn test_commit_if_rechecks_gate_under_lock() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = Arc::new(coordinator(source, StaleSelectionPolicy::Keep));
        let result = coordinator.aggregator().refresh().await;
        let gate = Arc::new(AtomicBool::new(true));

        // A reader holds the state while the commit is queued
        let reader = coordinator.state.read().await;
        let pending = tokio::spawn({
            let coordinator = coordinator.clone();
            let gate = gate.clone();
            async move { coordinator.commit_if(result, &gate).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        gate.store(false, Ordering::Release);
        drop(reader);

        assert!(pending.await.unwrap().is_none());
        assert!(coordinator.snapshot().await.is_none());
        assert!(matches!(coordinator.display_state().await, DisplayState::Loading));
        assert_eq!(*coordinator.subscribe().borrow(), 0);
    }

    #[tokio::test]
    async fn test_commit_if_open_gate_commits() {
        let source = Arc::new(StaticSource::healthy(sample_servers()));
        let coordinator = coordinator(source, StaleSelectionPolicy::Keep);
        let result = coordinator.aggregator().refresh().await;

        let outcome = coordinator.commit_if(result, &AtomicBool::new(true)).await;

        assert!(matches!(outcome, Some(CommitOutcome::Committed { .. })));
        assert!(coordinator.is_connected().await);
    }
}
