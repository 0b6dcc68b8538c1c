//! CLI subcommands for the governance dashboard
//!
//! Provides commands for:
//! - Watching the live dashboard (scheduler driven)
//! - One-shot overview, server, resource and findings views
//! - Triggering a controller re-evaluation
//! - Driving the controller's AI agent (refresh, pause/resume)

use clap::Subcommand;
use govdash::aggregator::Aggregator;
use govdash::analytics::{
    findings_for_category, filter_and_sort_servers, strategy_for, ClusterScoreStrategy,
    DashboardAnalytics, Restriction, ServerFilter, SeverityCounts,
};
use govdash::client::{GovernanceSource, HttpSource};
use govdash::config::DashboardConfig;
use govdash::coordinator::{CommitOutcome, DashboardCoordinator, DisplayState};
use govdash::navigation::{Screen, Tab};
use govdash::scheduler::{RefreshScheduler, TriggerOutcome};
use govdash_shared::{AiActionResponse, DashboardViewModel, Finding, ServerView};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Shared state for one CLI invocation
pub struct CliContext {
    config: DashboardConfig,
    coordinator: Arc<DashboardCoordinator>,
    strategy: Box<dyn ClusterScoreStrategy>,
}

impl CliContext {
    pub fn new(config: DashboardConfig) -> Self {
        let source: Arc<dyn GovernanceSource> = Arc::new(HttpSource::from_config(&config));
        let coordinator = Arc::new(DashboardCoordinator::new(
            Aggregator::new(source),
            config.stale_selection,
        ));
        Self {
            strategy: strategy_for(config.cluster_score),
            config,
            coordinator,
        }
    }

    /// Refresh once and return the committed snapshot
    async fn load(&self) -> anyhow::Result<Arc<DashboardViewModel>> {
        match self.coordinator.refresh_now().await {
            CommitOutcome::Committed { snapshot, .. } => Ok(snapshot),
            CommitOutcome::Disconnected(e) => Err(anyhow::anyhow!(
                "Controller unavailable at {}: {}",
                self.config.controller_url,
                e
            )),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// One-line summary of the current display state, `None` while loading
pub fn status_line(state: &DisplayState) -> Option<String> {
    match state {
        DisplayState::Loading => None,
        DisplayState::Failed { error } => Some(format!("Controller unreachable: {}", error)),
        DisplayState::Ready { snapshot, connected, last_error } => {
            let severity = SeverityCounts::from_findings(&snapshot.findings.findings);
            let mut line = format!(
                "[{}] score {} ({}, {}) | findings {} [{}] | servers {}",
                snapshot.fetched_at.format("%H:%M:%S"),
                snapshot.score.score,
                snapshot.score.grade,
                snapshot.score.phase,
                snapshot.findings.total,
                severity.compact(),
                snapshot.mcp_servers.servers.len(),
            );
            match (connected, last_error) {
                (true, _) => line.push_str(" | connected"),
                (false, Some(e)) => line.push_str(&format!(" | disconnected: {}", e)),
                (false, None) => line.push_str(" | disconnected"),
            }
            Some(line)
        }
    }
}

fn print_findings_table(findings: &[Finding]) {
    println!("{:<24} {:<10} {:<16} {:<28} {:<40}", "ID", "SEVERITY", "CATEGORY", "RESOURCE", "TITLE");
    println!("{}", "-".repeat(120));
    for finding in findings {
        println!("{:<24} {:<10} {:<16} {:<28} {:<40}",
            truncate(&finding.id, 24),
            finding.severity_label,
            truncate(&finding.category, 16),
            truncate(finding.resource_ref.as_deref().or(finding.resource.as_deref()).unwrap_or("-"), 28),
            truncate(&finding.title, 40),
        );
    }
}

// =============================================================================
// Dashboard Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum DashboardCommands {
    /// Refresh continuously and print a summary line per update
    Watch,
    /// Fetch once and print the overview
    Snapshot {
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// List MCP servers, worst status first
    Servers {
        /// Status filter (all, critical, warning, compliant)
        #[arg(long, default_value = "all")]
        filter: ServerFilter,
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Show details of a specific MCP server
    Server {
        /// Server ID
        id: String,
    },
    /// List governance findings
    Findings {
        /// Append findings reported on individual MCP servers
        #[arg(long)]
        include_servers: bool,
        /// Only findings explaining this score category (e.g. "Prompt Guard")
        #[arg(long)]
        category: Option<String>,
        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Ask the controller to re-evaluate, then refresh once
    Scan,
    /// Control the controller's AI agent
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },
}

impl DashboardCommands {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        match self {
            DashboardCommands::Watch => watch(ctx).await,
            DashboardCommands::Snapshot { format } => {
                let vm = ctx.load().await?;
                let analytics = DashboardAnalytics::compute(&vm, ctx.strategy.as_ref());

                if format == "json" {
                    let out = json!({ "dashboard": vm, "analytics": analytics });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                } else {
                    print_overview(&vm, &analytics);
                }
                Ok(())
            }
            DashboardCommands::Servers { filter, format } => {
                let vm = ctx.load().await?;
                let servers = filter_and_sort_servers(&vm.mcp_servers.servers, *filter);

                if format == "json" {
                    println!("{}", serde_json::to_string_pretty(&servers)?);
                } else {
                    println!("{:<24} {:<20} {:<16} {:<10} {:<6} {:<9} {:<9}",
                        "ID", "NAME", "NAMESPACE", "STATUS", "SCORE", "TOOLS", "FINDINGS");
                    println!("{}", "-".repeat(100));
                    for server in &servers {
                        println!("{:<24} {:<20} {:<16} {:<10} {:<6} {:<9} {:<9}",
                            truncate(&server.id, 24),
                            truncate(&server.name, 20),
                            truncate(&server.namespace, 16),
                            server.status,
                            server.score,
                            format!("{}/{}", server.effective_tool_count, server.tool_count),
                            server.findings.len(),
                        );
                    }
                    let summary = &vm.mcp_servers.summary;
                    println!();
                    println!("{} of {} servers shown ({}) | routed {} | at risk {} | avg score {:.1}",
                        servers.len(),
                        vm.mcp_servers.servers.len(),
                        filter,
                        summary.routed_servers,
                        summary.at_risk_servers,
                        summary.average_score,
                    );
                }
                Ok(())
            }
            DashboardCommands::Server { id } => {
                ctx.load().await?;

                if !ctx.coordinator.select_server(id, Tab::McpServers).await {
                    return Err(anyhow::anyhow!("MCP server {} not found", id));
                }
                if let Screen::ServerDetail(server) = ctx.coordinator.screen().await {
                    print_server_detail(&server);
                }
                Ok(())
            }
            DashboardCommands::Findings { include_servers, category, format } => {
                let vm = ctx.load().await?;

                let mut findings = vm.findings.findings.clone();
                if *include_servers {
                    findings.extend(govdash::analytics::aggregate_server_findings(&vm.mcp_servers.servers));
                }
                if let Some(category) = category {
                    findings = findings_for_category(category, &findings).into_iter().cloned().collect();
                }

                if format == "json" {
                    println!("{}", serde_json::to_string_pretty(&findings)?);
                } else {
                    print_findings_table(&findings);
                    let counts = SeverityCounts::from_findings(&findings);
                    println!();
                    println!("{} findings: {} critical, {} high, {} medium, {} low",
                        findings.len(), counts.critical, counts.high, counts.medium, counts.low);
                }
                Ok(())
            }
            DashboardCommands::Scan => {
                let scheduler = RefreshScheduler::new(ctx.coordinator.clone(), ctx.config.refresh_interval());
                let outcome = scheduler.trigger_scan().await;
                scheduler.stop();

                match outcome {
                    TriggerOutcome::Committed => {
                        println!("Scan triggered successfully!");
                        print_status(ctx).await;
                        Ok(())
                    }
                    TriggerOutcome::Disconnected(e) => {
                        Err(anyhow::anyhow!("Scan triggered but refresh failed: {}", e))
                    }
                    TriggerOutcome::Skipped | TriggerOutcome::Discarded => Ok(()),
                }
            }
            DashboardCommands::Ai { command } => command.execute(ctx).await,
        }
    }
}

async fn print_status(ctx: &CliContext) {
    if let Some(line) = status_line(&ctx.coordinator.display_state().await) {
        println!("{}", line);
    }
}

// =============================================================================
// AI Agent Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum AiCommands {
    /// Force an AI evaluation now; results appear on a later refresh
    Refresh,
    /// Pause or resume periodic AI scanning
    Toggle,
}

impl AiCommands {
    pub async fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let scheduler = RefreshScheduler::new(ctx.coordinator.clone(), ctx.config.refresh_interval());
        let outcome = match self {
            AiCommands::Refresh => scheduler.refresh_ai_score().await,
            AiCommands::Toggle => scheduler.toggle_ai_scan().await,
        };
        scheduler.stop();

        let reply = outcome.reply.ok_or_else(|| {
            anyhow::anyhow!("AI agent request to {} failed", ctx.config.controller_url)
        })?;
        if !reply.success {
            return Err(anyhow::anyhow!("AI agent declined: {}", reply.message));
        }
        println!("{}", ai_reply_line(&reply));

        if let TriggerOutcome::Disconnected(e) = outcome.refresh {
            return Err(anyhow::anyhow!("Refresh after AI request failed: {}", e));
        }
        print_status(ctx).await;
        Ok(())
    }
}

fn ai_reply_line(reply: &AiActionResponse) -> String {
    match reply.scan_paused {
        Some(true) => format!("{} (periodic AI scanning paused)", reply.message),
        Some(false) => format!("{} (periodic AI scanning active)", reply.message),
        None => reply.message.clone(),
    }
}

async fn watch(ctx: &CliContext) -> anyhow::Result<()> {
    let scheduler = Arc::new(RefreshScheduler::new(
        ctx.coordinator.clone(),
        ctx.config.refresh_interval(),
    ));
    let mut revisions = ctx.coordinator.subscribe();

    scheduler.start();
    info!("Watching {} every {}s", ctx.config.controller_url, ctx.config.refresh_interval_secs);
    info!("Press Ctrl+C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down...");
                break;
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(line) = status_line(&ctx.coordinator.display_state().await) {
                    println!("{}", line);
                }
            }
        }
    }

    scheduler.stop();
    Ok(())
}

fn print_overview(vm: &DashboardViewModel, analytics: &DashboardAnalytics) {
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| match tab.badge(vm) {
            Some(n) => format!("{} ({})", tab.label(), n),
            None => tab.label().to_string(),
        })
        .collect();
    println!("{}", tabs.join(" | "));
    println!();

    println!("Score:     {} / 100 ({}, {})", vm.score.score, analytics.grade, analytics.phase);
    println!("Band:      {} {}", analytics.band, analytics.band.hex());
    println!("Weighted:  {:.1} (remaining {:.1}{})",
        analytics.composite.total_weighted,
        analytics.composite.remaining,
        if analytics.composite.consistent { "" } else { ", differs from reported score" },
    );
    println!("Controller: {} ({})", vm.health.version, vm.health.status);
    if let Some(last_scan) = &vm.health.last_scan_time {
        println!("Last scan: {}", last_scan);
    }
    println!();

    println!("{:<28} {:<6} {:<7} {:<9} {:<10} {:<9}", "CATEGORY", "SCORE", "WEIGHT", "WEIGHTED", "STATUS", "FINDINGS");
    println!("{}", "-".repeat(80));
    for category in &analytics.categories {
        println!("{:<28} {:<6} {:<7} {:<9.1} {:<10} {:<9}",
            truncate(&category.category, 28),
            category.score,
            format!("{}%", category.weight),
            category.weighted,
            category.status,
            findings_for_category(&category.category, &vm.findings.findings).len(),
        );
    }
    println!();

    let severity = &analytics.severity;
    println!("Findings:  {} total ({} critical, {} high, {} medium, {} low)",
        vm.findings.total, severity.critical, severity.high, severity.medium, severity.low);
    println!("Resources: {}% compliant, {} need attention",
        analytics.compliance_rate, analytics.resources_needing_attention);
    println!("Servers:   {} total, {} critical/failing, {} warning, {} compliant, {} server findings",
        analytics.server_counts.all,
        analytics.server_counts.critical,
        analytics.server_counts.warning,
        analytics.server_counts.compliant,
        analytics.server_findings.len(),
    );

    if vm.ai_score.available {
        if let Some(ai) = &vm.ai_score.ai_score {
            println!("AI score:  {} ({})", ai.score, ai.grade);
        }
        if let Some(cmp) = &vm.ai_score.comparison {
            println!("           {:+} vs algorithmic {}", cmp.score_difference, cmp.algorithmic_score);
        }
    } else if let Some(message) = &vm.ai_score.message {
        println!("AI score:  unavailable ({})", message);
    }
    if let Some(scan) = &vm.ai_score.scan_config {
        if scan.scan_paused {
            println!("AI scan:   paused");
        } else {
            println!("AI scan:   every {}", scan.scan_interval);
        }
    }

    if !analytics.namespaces.is_empty() {
        println!();
        println!("{:<30} {:<6} {:<9} {:<8}", "NAMESPACE", "SCORE", "FINDINGS", "BAND");
        println!("{}", "-".repeat(60));
        for cell in &analytics.namespaces {
            println!("{:<30} {:<6} {:<9} {:<8}", truncate(&cell.namespace, 30), cell.score, cell.findings, cell.band);
        }
    }
}

fn print_server_detail(server: &ServerView) {
    let restriction = Restriction::for_server(server);

    println!("{} ({})", server.name, server.id);
    println!("Namespace: {}", server.namespace);
    println!("Source:    {}", server.source.label());
    if let Some(url) = &server.url {
        println!("URL:       {}", url);
    }
    println!("Score:     {} ({}) {}", server.score, server.grade, server.status);
    println!("Tools:     {} of {} exposed, {:.1}% restricted ({:?}, {}/10 points)",
        server.effective_tool_count,
        server.tool_count,
        restriction.ratio * 100.0,
        restriction.band,
        restriction.points,
    );
    println!();

    println!("{:<20} {:<8}", "CONTROL", "ENABLED");
    println!("{}", "-".repeat(30));
    for (control, enabled) in server.controls() {
        println!("{:<20} {:<8}", control, yes_no(enabled));
    }
    println!();

    println!("{:<20} {:<6}", "SCORE COMPONENT", "POINTS");
    println!("{}", "-".repeat(30));
    for (component, points) in server.score_breakdown.entries() {
        println!("{:<20} {:<6}", component, points);
    }

    if let Some(explanations) = &server.score_explanations {
        println!();
        for explanation in explanations {
            println!("{} {}/{}", explanation.category, explanation.score, explanation.max_score);
            for reason in &explanation.reasons {
                println!("  - {}", reason);
            }
            for suggestion in &explanation.suggestions {
                println!("  > {}", suggestion);
            }
        }
    }

    println!();
    print_findings_table(&server.findings);
}
