//! Selection Synchronizer
//!
//! A selected server is held by value and re-resolved by `id` against every
//! committed view model. `SelectionState` is never mutated; reconciliation
//! produces a replacement.

use govdash_shared::{DashboardViewModel, ServerView};
use std::sync::Arc;
use tracing::debug;

use crate::config::StaleSelectionPolicy;
use crate::navigation::Tab;

/// At most one selected server plus the tab the drill-down started from
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    server: Option<Arc<ServerView>>,
    previous_tab: Option<Tab>,
}

impl SelectionState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn selected(server: Arc<ServerView>, previous_tab: Option<Tab>) -> Self {
        Self {
            server: Some(server),
            previous_tab,
        }
    }

    pub fn server(&self) -> Option<&Arc<ServerView>> {
        self.server.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.server.as_deref().map(|s| s.id.as_str())
    }

    pub fn previous_tab(&self) -> Option<Tab> {
        self.previous_tab
    }

    pub fn is_empty(&self) -> bool {
        self.server.is_none()
    }
}

/// Outcome of re-resolving a selection
#[derive(Debug, Clone)]
pub enum Reconciliation {
    /// Nothing was selected
    Empty,
    /// Found by id; holds the fresh server object
    Refreshed(SelectionState),
    /// Not in the new view model; the old selection is kept
    Stale(SelectionState),
    /// Not in the new view model and the policy drops it
    Cleared,
}

impl Reconciliation {
    pub fn into_state(self) -> SelectionState {
        match self {
            Reconciliation::Refreshed(state) | Reconciliation::Stale(state) => state,
            Reconciliation::Empty | Reconciliation::Cleared => SelectionState::none(),
        }
    }
}

/// Look the selection up by id in `vm`
///
/// Read-only: never triggers a fetch and never fails.
pub fn reconcile(
    selection: SelectionState,
    vm: &DashboardViewModel,
    policy: StaleSelectionPolicy,
) -> Reconciliation {
    let Some(id) = selection.selected_id().map(str::to_owned) else {
        return Reconciliation::Empty;
    };

    match vm.mcp_servers.find(&id) {
        Some(fresh) => Reconciliation::Refreshed(SelectionState::selected(
            fresh.clone(),
            selection.previous_tab,
        )),
        None => match policy {
            StaleSelectionPolicy::Keep => {
                debug!("Selected server {} missing from refresh, keeping selection", id);
                Reconciliation::Stale(selection)
            }
            StaleSelectionPolicy::Clear => {
                debug!("Selected server {} missing from refresh, clearing selection", id);
                Reconciliation::Cleared
            }
        },
    }
}
