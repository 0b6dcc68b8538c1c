//! Weighted scores, cluster category scores and tool restriction
//!
//! All functions are total: empty inputs and zero denominators resolve to
//! defined values instead of NaN or panics.

use govdash_shared::{ScoreCategory, ServerView};
use serde::Serialize;
use std::sync::Arc;

use super::classify::category_status;
use crate::config::ClusterScoreMode;

/// Allowed gap between the summed weighted categories and the reported score
pub const COMPOSITE_TOLERANCE: f64 = 0.1;

/// Points a category contributes to the composite
pub fn weighted(score: u32, weight: u32) -> f64 {
    f64::from(score) * f64::from(weight) / 100.0
}

/// Sum of every category's weighted contribution
pub fn composite(categories: &[ScoreCategory]) -> f64 {
    categories.iter().map(|c| weighted(c.score, c.weight)).sum()
}

/// How the category contributions add up to the reported score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeBreakdown {
    pub total_weighted: f64,
    /// Points lost to category deductions, never negative
    pub remaining: f64,
    pub reported: u32,
    pub consistent: bool,
}

impl CompositeBreakdown {
    pub fn compute(reported: u32, categories: &[ScoreCategory]) -> Self {
        let total_weighted = composite(categories);
        Self {
            total_weighted,
            remaining: (100.0 - total_weighted).max(0.0),
            reported,
            consistent: (total_weighted - f64::from(reported)).abs() <= COMPOSITE_TOLERANCE,
        }
    }
}

// =============================================================================
// Cluster category scores
// =============================================================================

/// One server's input to a cluster-level category score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionInput {
    pub score: u32,
    pub findings: usize,
}

/// Combines per-server scores into one category score
pub trait ClusterScoreStrategy: Send + Sync {
    /// `None` when there is nothing to combine
    fn combine(&self, inputs: &[ContributionInput]) -> Option<u32>;
}

/// Arithmetic mean, rounded, capped at 100
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanStrategy;

impl ClusterScoreStrategy for MeanStrategy {
    fn combine(&self, inputs: &[ContributionInput]) -> Option<u32> {
        if inputs.is_empty() {
            return None;
        }
        let sum: f64 = inputs.iter().map(|i| f64::from(i.score)).sum();
        let mean = sum / inputs.len() as f64;
        Some((mean.round() as u32).min(100))
    }
}

/// Mean weighted by `1 + findings`, so noisier servers pull harder
#[derive(Debug, Clone, Copy, Default)]
pub struct FindingsWeightedStrategy;

impl ClusterScoreStrategy for FindingsWeightedStrategy {
    fn combine(&self, inputs: &[ContributionInput]) -> Option<u32> {
        if inputs.is_empty() {
            return None;
        }
        let (sum, weights) = inputs.iter().fold((0.0, 0.0), |(sum, weights), i| {
            let w = 1.0 + i.findings as f64;
            (sum + f64::from(i.score) * w, weights + w)
        });
        Some(((sum / weights).round() as u32).min(100))
    }
}

pub fn strategy_for(mode: ClusterScoreMode) -> Box<dyn ClusterScoreStrategy> {
    match mode {
        ClusterScoreMode::Mean => Box::new(MeanStrategy),
        ClusterScoreMode::FindingsWeighted => Box::new(FindingsWeightedStrategy),
    }
}

/// Re-derive category scores from their per-server contributions
///
/// Categories with contributions get their score from `strategy`; the rest
/// keep the controller score. `weighted` and `status` are always rebuilt so
/// they agree with the final score.
pub fn recompute_categories(
    categories: &[ScoreCategory],
    servers: &[Arc<ServerView>],
    strategy: &dyn ClusterScoreStrategy,
) -> Vec<ScoreCategory> {
    categories
        .iter()
        .map(|category| {
            let inputs: Vec<ContributionInput> = category
                .servers
                .iter()
                .map(|contribution| ContributionInput {
                    score: contribution.score,
                    findings: servers
                        .iter()
                        .find(|s| s.name == contribution.name)
                        .map(|s| s.findings.len())
                        .unwrap_or(0),
                })
                .collect();

            let score = strategy.combine(&inputs).unwrap_or(category.score).min(100);

            ScoreCategory {
                score,
                weighted: weighted(score, category.weight),
                status: category_status(score),
                ..category.clone()
            }
        })
        .collect()
}

// =============================================================================
// Tool restriction
// =============================================================================

/// Maximum tool-scope points a server can earn
pub const TOOL_SCOPE_MAX_POINTS: u32 = 10;

/// Fraction of a server's tools that are not exposed
///
/// A server without tools counts as fully restricted. An effective count
/// above the total clamps to 0.
pub fn restriction_ratio(effective_tool_count: u32, tool_count: u32) -> f64 {
    if tool_count == 0 {
        return 1.0;
    }
    (1.0 - f64::from(effective_tool_count) / f64::from(tool_count)).clamp(0.0, 1.0)
}

/// Graduated tool restriction band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionBand {
    Full,
    Partial,
    Low,
}

impl RestrictionBand {
    pub fn of_ratio(ratio: f64) -> Self {
        if ratio > 0.75 {
            RestrictionBand::Full
        } else if ratio >= 0.5 {
            RestrictionBand::Partial
        } else {
            RestrictionBand::Low
        }
    }

    pub fn of(effective_tool_count: u32, tool_count: u32) -> Self {
        Self::of_ratio(restriction_ratio(effective_tool_count, tool_count))
    }

    /// Points out of `max`: full, half, or a quarter
    pub fn points(&self, max: u32) -> u32 {
        match self {
            RestrictionBand::Full => max,
            RestrictionBand::Partial => max / 2,
            RestrictionBand::Low => max / 4,
        }
    }
}

/// Restriction analysis of one server
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Restriction {
    pub ratio: f64,
    pub band: RestrictionBand,
    pub points: u32,
}

impl Restriction {
    pub fn for_server(server: &ServerView) -> Self {
        let ratio = restriction_ratio(server.effective_tool_count, server.tool_count);
        let band = RestrictionBand::of_ratio(ratio);
        Self {
            ratio,
            band,
            points: band.points(TOOL_SCOPE_MAX_POINTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdash_shared::{CategoryStatus, Finding, ServerContribution};

    fn category(name: &str, score: u32, weight: u32) -> ScoreCategory {
        ScoreCategory {
            category: name.to_string(),
            score,
            weight,
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_is_exact() {
        assert_eq!(weighted(80, 25), 20.0);
        assert_eq!(weighted(33, 10), 3.3);
        assert_eq!(weighted(0, 40), 0.0);
    }

    #[test]
    fn test_composite_matches_reported_score() {
        let categories = vec![
            category("AgentGateway Compliance", 100, 25),
            category("Authentication", 60, 20),
            category("TLS", 50, 15),
            category("CORS", 40, 10),
            category("Rate Limit", 70, 10),
            category("Prompt Guard", 0, 10),
            category("Tool Scope", 80, 10),
        ];

        // 25 + 12 + 7.5 + 4 + 7 + 0 + 8
        let check = CompositeBreakdown::compute(64, &categories);
        assert!((check.total_weighted - 63.5).abs() < 1e-9);
        assert!(!check.consistent);

        let check = CompositeBreakdown::compute(63, &categories);
        assert!(!check.consistent);

        let categories = vec![category("TLS", 64, 50), category("CORS", 64, 50)];
        let check = CompositeBreakdown::compute(64, &categories);
        assert!(check.consistent);
        assert!((check.remaining - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_empty() {
        let check = CompositeBreakdown::compute(0, &[]);
        assert_eq!(check.total_weighted, 0.0);
        assert_eq!(check.remaining, 100.0);
        assert!(check.consistent);
    }

    #[test]
    fn test_mean_strategy_rounds_and_caps() {
        let inputs = [
            ContributionInput { score: 100, findings: 0 },
            ContributionInput { score: 55, findings: 3 },
        ];
        // 77.5 rounds half away from zero
        assert_eq!(MeanStrategy.combine(&inputs), Some(78));
        assert_eq!(MeanStrategy.combine(&[]), None);

        let over = [ContributionInput { score: 250, findings: 0 }];
        assert_eq!(MeanStrategy.combine(&over), Some(100));
    }

    #[test]
    fn test_findings_weighted_strategy() {
        let inputs = [
            ContributionInput { score: 100, findings: 0 },
            ContributionInput { score: 40, findings: 2 },
        ];
        // (100*1 + 40*3) / 4 = 55
        assert_eq!(FindingsWeightedStrategy.combine(&inputs), Some(55));
        assert_eq!(FindingsWeightedStrategy.combine(&[]), None);
    }

    #[test]
    fn test_recompute_categories_uses_contributions() {
        let mut tls = category("TLS", 10, 20);
        tls.servers = vec![
            ServerContribution { name: "a".into(), score: 100, grade: "A".into() },
            ServerContribution { name: "b".into(), score: 50, grade: "C".into() },
        ];
        let cors = category("CORS", 45, 10);

        let servers = vec![
            Arc::new(ServerView { name: "a".into(), ..Default::default() }),
            Arc::new(ServerView {
                name: "b".into(),
                findings: vec![Finding::default(), Finding::default(), Finding::default()],
                ..Default::default()
            }),
        ];

        let mean = recompute_categories(&[tls.clone(), cors.clone()], &servers, &MeanStrategy);
        assert_eq!(mean[0].score, 75);
        assert_eq!(mean[0].weighted, 15.0);
        assert_eq!(mean[0].status, CategoryStatus::Warning);
        assert_eq!(mean[1].score, 45);
        assert_eq!(mean[1].weighted, 4.5);
        assert_eq!(mean[1].status, CategoryStatus::Critical);

        // (100*1 + 50*4) / 5 = 60
        let weighted_by_findings =
            recompute_categories(&[tls], &servers, &FindingsWeightedStrategy);
        assert_eq!(weighted_by_findings[0].score, 60);
    }

    #[test]
    fn test_restriction_scenario_57_tools() {
        let ratio = restriction_ratio(10, 57);
        assert!((ratio - 0.8246).abs() < 1e-4);
        assert_eq!(RestrictionBand::of_ratio(ratio), RestrictionBand::Full);
        assert_eq!(RestrictionBand::Full.points(TOOL_SCOPE_MAX_POINTS), 10);
    }

    #[test]
    fn test_restriction_bands() {
        assert_eq!(RestrictionBand::of(25, 100), RestrictionBand::Partial);
        assert_eq!(RestrictionBand::of(50, 100), RestrictionBand::Partial);
        assert_eq!(RestrictionBand::of(51, 100), RestrictionBand::Low);
        assert_eq!(RestrictionBand::of(100, 100), RestrictionBand::Low);
        assert_eq!(RestrictionBand::Partial.points(10), 5);
        assert_eq!(RestrictionBand::Low.points(10), 2);
    }

    #[test]
    fn test_restriction_no_tools_is_fully_restricted() {
        let ratio = restriction_ratio(0, 0);
        assert_eq!(ratio, 1.0);
        assert!(!ratio.is_nan());
        assert_eq!(RestrictionBand::of(0, 0), RestrictionBand::Full);
    }

    #[test]
    fn test_restriction_is_idempotent() {
        for (effective, total) in [(10, 57), (3, 4), (0, 0), (9, 3)] {
            assert_eq!(RestrictionBand::of(effective, total), RestrictionBand::of(effective, total));
        }
        assert_eq!(restriction_ratio(9, 3), 0.0);
    }
}
