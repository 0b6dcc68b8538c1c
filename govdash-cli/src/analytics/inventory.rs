//! Resource and server inventory views

use govdash_shared::{
    NamespaceScore, ResourceDetail, ResourceStatus, ResourceSummary, ServerStatus, ServerView,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::classify::ScoreBand;

/// Resources with status critical or failing, in controller order
pub fn resources_needing_attention(resources: &[ResourceDetail]) -> Vec<&ResourceDetail> {
    resources
        .iter()
        .filter(|r| matches!(r.status, ResourceStatus::Critical | ResourceStatus::Failing))
        .collect()
}

pub fn compliant_resources(resources: &[ResourceDetail]) -> Vec<&ResourceDetail> {
    resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Compliant)
        .collect()
}

/// Percentage of evaluated resources that are compliant, 0 when none were evaluated
pub fn compliance_rate(summary: &ResourceSummary) -> u32 {
    let total = summary.compliant_resources + summary.non_compliant_resources;
    if total == 0 {
        return 0;
    }
    (f64::from(summary.compliant_resources) / f64::from(total) * 100.0).round() as u32
}

// =============================================================================
// Server list
// =============================================================================

/// Status filter for the server list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerFilter {
    #[default]
    All,
    /// Critical and failing
    Critical,
    Warning,
    Compliant,
}

impl ServerFilter {
    pub fn matches(&self, status: ServerStatus) -> bool {
        match self {
            ServerFilter::All => true,
            ServerFilter::Critical => {
                matches!(status, ServerStatus::Critical | ServerStatus::Failing)
            }
            ServerFilter::Warning => status == ServerStatus::Warning,
            ServerFilter::Compliant => status == ServerStatus::Compliant,
        }
    }
}

impl FromStr for ServerFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ServerFilter::All),
            "critical" => Ok(ServerFilter::Critical),
            "warning" => Ok(ServerFilter::Warning),
            "compliant" => Ok(ServerFilter::Compliant),
            other => Err(format!("unknown server filter: {}", other)),
        }
    }
}

impl fmt::Display for ServerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerFilter::All => "all",
            ServerFilter::Critical => "critical",
            ServerFilter::Warning => "warning",
            ServerFilter::Compliant => "compliant",
        };
        f.pad(s)
    }
}

fn status_rank(status: ServerStatus) -> u8 {
    match status {
        ServerStatus::Critical => 0,
        ServerStatus::Failing => 1,
        ServerStatus::Warning => 2,
        ServerStatus::Compliant => 3,
        ServerStatus::Unknown => 4,
    }
}

/// Servers matching `filter`, worst status first
///
/// The sort is stable, so servers with the same status keep controller order.
pub fn filter_and_sort_servers(
    servers: &[Arc<ServerView>],
    filter: ServerFilter,
) -> Vec<Arc<ServerView>> {
    let mut selected: Vec<Arc<ServerView>> = servers
        .iter()
        .filter(|s| filter.matches(s.status))
        .cloned()
        .collect();
    selected.sort_by_key(|s| status_rank(s.status));
    selected
}

/// Per-filter counts for the filter buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServerStatusCounts {
    pub all: usize,
    pub critical: usize,
    pub warning: usize,
    pub compliant: usize,
}

impl ServerStatusCounts {
    pub fn from_servers(servers: &[Arc<ServerView>]) -> Self {
        let count = |filter: ServerFilter| servers.iter().filter(|s| filter.matches(s.status)).count();
        Self {
            all: servers.len(),
            critical: count(ServerFilter::Critical),
            warning: count(ServerFilter::Warning),
            compliant: count(ServerFilter::Compliant),
        }
    }
}

// =============================================================================
// Namespaces
// =============================================================================

/// One heatmap cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceCell {
    pub namespace: String,
    pub score: u32,
    pub findings: u32,
    pub band: ScoreBand,
}

/// Namespaces with their color band, worst score first
pub fn namespace_heatmap(namespaces: &[NamespaceScore]) -> Vec<NamespaceCell> {
    let mut cells: Vec<NamespaceCell> = namespaces
        .iter()
        .map(|ns| NamespaceCell {
            namespace: ns.namespace.clone(),
            score: ns.score,
            findings: ns.findings,
            band: ScoreBand::of(ns.score),
        })
        .collect();
    cells.sort_by_key(|c| c.score);
    cells
}
