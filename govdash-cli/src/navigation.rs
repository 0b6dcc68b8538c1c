//! Navigation State Machine
//!
//! Exactly one top-level tab is active at any time. The MCP servers tab has
//! a "selected server" sub-state entered by drill-down, which remembers a
//! single tab to return to.

use govdash_shared::{DashboardViewModel, ServerView};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::StaleSelectionPolicy;
use crate::selection::{reconcile, Reconciliation, SelectionState};

/// Top-level dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    Overview,
    McpServers,
    Resources,
    Findings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::McpServers, Tab::Resources, Tab::Findings];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::McpServers => "mcp-servers",
            Tab::Resources => "resources",
            Tab::Findings => "findings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::McpServers => "MCP Servers",
            Tab::Resources => "Resources",
            Tab::Findings => "Findings",
        }
    }

    /// Count shown next to the tab label
    pub fn badge(&self, vm: &DashboardViewModel) -> Option<u32> {
        match self {
            Tab::Resources => Some(vm.resource_total()),
            Tab::Findings => Some(vm.findings_total()),
            Tab::Overview | Tab::McpServers => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}

/// What is rendered for the current state
#[derive(Debug, Clone)]
pub enum Screen {
    Overview,
    ServerList,
    ServerDetail(Arc<ServerView>),
    Resources,
    Findings,
}

/// Active tab plus the drill-down selection
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    tab: Tab,
    selection: SelectionState,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Tab button: switch tab and drop any selection
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selection = SelectionState::none();
    }

    /// Open a server's detail view, remembering where the user came from
    pub fn drill_down(&mut self, server: Arc<ServerView>, from: Tab) {
        self.tab = Tab::McpServers;
        self.selection = SelectionState::selected(server, Some(from));
    }

    /// Leave the detail view for the remembered tab, or the server list
    pub fn back(&mut self) {
        self.tab = self.selection.previous_tab().unwrap_or(Tab::McpServers);
        self.selection = SelectionState::none();
    }

    /// Re-resolve the selection against a freshly committed view model
    pub fn reconcile(&mut self, vm: &DashboardViewModel, policy: StaleSelectionPolicy) -> Reconciliation {
        let outcome = reconcile(self.selection.clone(), vm, policy);
        match &outcome {
            Reconciliation::Refreshed(state) | Reconciliation::Stale(state) => {
                self.selection = state.clone();
            }
            Reconciliation::Cleared => {
                self.tab = Tab::McpServers;
                self.selection = SelectionState::none();
            }
            Reconciliation::Empty => {}
        }
        outcome
    }

    pub fn screen(&self) -> Screen {
        match self.tab {
            Tab::Overview => Screen::Overview,
            Tab::McpServers => match self.selection.server() {
                Some(server) => Screen::ServerDetail(server.clone()),
                None => Screen::ServerList,
            },
            Tab::Resources => Screen::Resources,
            Tab::Findings => Screen::Findings,
        }
    }
}
