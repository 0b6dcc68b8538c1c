//! Cross-server findings aggregation

use govdash_shared::{Finding, ServerView};
use std::sync::Arc;

/// Flatten every server's findings into one list
///
/// Each finding gets the id `<original id>-<server name>` so that the same
/// check failing on two servers yields two distinct entries. A missing
/// resource reference falls back to the server name.
pub fn aggregate_server_findings(servers: &[Arc<ServerView>]) -> Vec<Finding> {
    servers
        .iter()
        .flat_map(|server| {
            server.findings.iter().map(move |finding| {
                let resource_ref = match finding.resource_ref.as_deref() {
                    Some(r) if !r.is_empty() => r.to_string(),
                    _ => server.name.clone(),
                };

                Finding {
                    id: format!("{}-{}", finding.id, server.name),
                    resource_ref: Some(resource_ref),
                    ..finding.clone()
                }
            })
        })
        .collect()
}

/// Finding categories that feed a score category
///
/// Empty for display names without a known mapping.
pub fn finding_categories_for(display_category: &str) -> &'static [&'static str] {
    match display_category {
        "AgentGateway Compliance" => &["AgentGateway"],
        "Authentication" => &["Authentication"],
        "Authorization" => &["Authorization"],
        "CORS" => &["CORS"],
        "TLS" => &["TLS"],
        "Prompt Guard" => &["PromptGuard"],
        "Rate Limit" => &["RateLimit"],
        "Tool Scope" => &["ToolScope"],
        _ => &[],
    }
}

/// Findings that explain a score category
pub fn findings_for_category<'a>(display_category: &str, findings: &'a [Finding]) -> Vec<&'a Finding> {
    let categories = finding_categories_for(display_category);
    findings
        .iter()
        .filter(|f| {
            if categories.is_empty() {
                f.category == display_category
            } else {
                categories.contains(&f.category.as_str())
            }
        })
        .collect()
}
