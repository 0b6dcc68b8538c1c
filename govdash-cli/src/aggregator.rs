//! Source Aggregator
//!
//! Fans out one request per controller source, waits for all of them and
//! merges the tagged results into a single `DashboardViewModel`.
//! - Required sources: any failure fails the refresh
//! - Optional sources: failures degrade to documented defaults
//!
//! The merge step is a pure function so the failure policy can be tested
//! without a network.

use chrono::{DateTime, Utc};
use govdash_shared::{
    AiScoreResponse, Breakdown, DashboardViewModel, FindingsResponse, HealthInfo,
    McpServersResponse, NamespacesResponse, ResourceDetailResponse, ResourceSummary,
    ScoreResponse, TrendsResponse,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::client::{Endpoint, GovernanceSource, SourceError};

/// A refresh that could not produce a view model
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to fetch {endpoint}: {source}")]
    RequiredSource {
        endpoint: Endpoint,
        #[source]
        source: SourceError,
    },
}

impl RefreshError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RefreshError::RequiredSource { endpoint, .. } => *endpoint,
        }
    }
}

/// Settled results of the required sources
#[derive(Debug)]
pub struct RequiredResults {
    pub score: Result<ScoreResponse, SourceError>,
    pub findings: Result<FindingsResponse, SourceError>,
    pub resources: Result<ResourceSummary, SourceError>,
    pub breakdown: Result<Breakdown, SourceError>,
    pub trends: Result<TrendsResponse, SourceError>,
    pub resource_detail: Result<ResourceDetailResponse, SourceError>,
}

/// Settled results of the optional sources
#[derive(Debug)]
pub struct OptionalResults {
    pub mcp_servers: Result<McpServersResponse, SourceError>,
    pub health: Result<HealthInfo, SourceError>,
    pub ai_score: Result<AiScoreResponse, SourceError>,
    pub namespaces: Result<NamespacesResponse, SourceError>,
}

impl OptionalResults {
    /// Every optional source failed with the same error
    pub fn all_failed(error: SourceError) -> Self {
        Self {
            mcp_servers: Err(error.clone()),
            health: Err(error.clone()),
            ai_score: Err(error.clone()),
            namespaces: Err(error),
        }
    }
}

fn required<T>(endpoint: Endpoint, result: Result<T, SourceError>) -> Result<T, RefreshError> {
    result.map_err(|source| {
        error!("Required source {} failed: {}", endpoint, source);
        RefreshError::RequiredSource { endpoint, source }
    })
}

fn optional<T: Default>(endpoint: Endpoint, result: Result<T, SourceError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Optional source {} unavailable, using default: {}", endpoint, e);
            T::default()
        }
    }
}

/// Merge settled source results into a view model
///
/// Fails with the first failed required source in canonical order. Optional
/// failures never fail the merge.
pub fn merge(
    required_results: RequiredResults,
    optional_results: OptionalResults,
    fetched_at: DateTime<Utc>,
) -> Result<DashboardViewModel, RefreshError> {
    let RequiredResults {
        score,
        findings,
        resources,
        breakdown,
        trends,
        resource_detail,
    } = required_results;

    // Evaluate every required result so each failure is logged, then report the first
    let score = required(Endpoint::Score, score);
    let findings = required(Endpoint::Findings, findings);
    let resources = required(Endpoint::Resources, resources);
    let breakdown = required(Endpoint::Breakdown, breakdown);
    let trends = required(Endpoint::Trends, trends);
    let resource_detail = required(Endpoint::ResourceDetail, resource_detail);

    let score = score?;
    let findings = findings?;
    let resource_summary = resources?;
    let breakdown = breakdown?;
    let trends = trends?.trends;
    let resource_detail = resource_detail?;

    let mcp_servers = optional(Endpoint::McpServers, optional_results.mcp_servers);
    let health = optional(Endpoint::Health, optional_results.health);
    let ai_score = optional(Endpoint::AiScore, optional_results.ai_score);
    let namespaces = optional(Endpoint::Namespaces, optional_results.namespaces).namespaces;

    Ok(DashboardViewModel {
        score,
        findings,
        resource_summary,
        breakdown,
        trends,
        resource_detail,
        mcp_servers,
        health,
        ai_score,
        namespaces,
        fetched_at,
    })
}

/// Concurrent fetcher for all controller sources
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn GovernanceSource>,
}

impl Aggregator {
    pub fn new(source: Arc<dyn GovernanceSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn GovernanceSource> {
        &self.source
    }

    /// Fetch every source in parallel and merge the results
    ///
    /// All requests are in flight together; latency is bounded by the slowest
    /// source. Nothing is merged until every request has settled.
    pub async fn refresh(&self) -> Result<DashboardViewModel, RefreshError> {
        let source = self.source.as_ref();
        debug!("Fetching {} sources", Endpoint::REQUIRED.len() + Endpoint::OPTIONAL.len());

        let (
            score,
            findings,
            resources,
            breakdown,
            trends,
            resource_detail,
            mcp_servers,
            health,
            ai_score,
            namespaces,
        ) = tokio::join!(
            source.score(),
            source.findings(),
            source.resources(),
            source.breakdown(),
            source.trends(),
            source.resource_detail(),
            source.mcp_servers(),
            source.health(),
            source.ai_score(),
            source.namespaces(),
        );

        merge(
            RequiredResults {
                score,
                findings,
                resources,
                breakdown,
                trends,
                resource_detail,
            },
            OptionalResults {
                mcp_servers,
                health,
                ai_score,
                namespaces,
            },
            Utc::now(),
        )
    }
}
