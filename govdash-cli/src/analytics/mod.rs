//! Derived analytics
//!
//! Pure, total functions over a `DashboardViewModel`:
//! - Classification: color band, grade, phase and status for any score
//! - Severity rollups and cross-server findings aggregation
//! - Weighted composite scores and tool restriction ratios
//! - Inventory views and radar geometry
//!
//! Every function has a defined result for the all-empty view model.

pub mod classify;
pub mod findings;
pub mod inventory;
pub mod radar;
pub mod scoring;
pub mod severity;

pub use classify::{category_status, Grade, Phase, ScoreBand};
pub use findings::{aggregate_server_findings, finding_categories_for, findings_for_category};
pub use inventory::{
    compliance_rate, compliant_resources, filter_and_sort_servers, namespace_heatmap,
    resources_needing_attention, NamespaceCell, ServerFilter, ServerStatusCounts,
};
pub use radar::{radar_points, RadarPoint};
pub use scoring::{
    composite, recompute_categories, restriction_ratio, strategy_for, weighted,
    ClusterScoreStrategy, CompositeBreakdown, FindingsWeightedStrategy, MeanStrategy, Restriction,
    RestrictionBand,
};
pub use severity::SeverityCounts;

use govdash_shared::{DashboardViewModel, Finding, ScoreCategory};
use serde::Serialize;

/// Radar chart center and outer radius
pub const RADAR_CENTER: (f64, f64) = (100.0, 100.0);
pub const RADAR_RADIUS: f64 = 80.0;

/// Everything the overview derives from one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardAnalytics {
    pub band: ScoreBand,
    pub grade: Grade,
    pub phase: Phase,
    pub severity: SeverityCounts,
    pub categories: Vec<ScoreCategory>,
    pub composite: CompositeBreakdown,
    pub radar: Vec<RadarPoint>,
    pub server_findings: Vec<Finding>,
    pub server_counts: ServerStatusCounts,
    pub resources_needing_attention: usize,
    pub compliance_rate: u32,
    pub namespaces: Vec<NamespaceCell>,
}

impl DashboardAnalytics {
    pub fn compute(vm: &DashboardViewModel, strategy: &dyn ClusterScoreStrategy) -> Self {
        let score = vm.score.score;
        let servers = &vm.mcp_servers.servers;

        // Controller list first; the bySeverity map only when no list came back
        let mut severity = SeverityCounts::from_findings(&vm.findings.findings);
        if severity.total() == 0 {
            severity = SeverityCounts::from_map(&vm.findings.by_severity);
        }

        let categories = recompute_categories(&vm.score.categories, servers, strategy);
        let composite = CompositeBreakdown::compute(score, &categories);

        let breakdown: Vec<(&str, u32)> = vm
            .breakdown
            .entries()
            .into_iter()
            .map(|(category, value)| (category.short_label(), value))
            .collect();

        Self {
            band: ScoreBand::of(score),
            grade: Grade::of(score),
            phase: Phase::of(score),
            severity,
            categories,
            composite,
            radar: radar_points(&breakdown, RADAR_CENTER, RADAR_RADIUS),
            server_findings: aggregate_server_findings(servers),
            server_counts: ServerStatusCounts::from_servers(servers),
            resources_needing_attention: resources_needing_attention(&vm.resource_detail.resources)
                .len(),
            compliance_rate: compliance_rate(&vm.resource_summary),
            namespaces: namespace_heatmap(&vm.namespaces),
        }
    }
}
