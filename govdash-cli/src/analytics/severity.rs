//! Severity rollups

use govdash_shared::{Finding, Severity};
use serde::Serialize;
use std::collections::HashMap;

/// Finding counts per known severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityCounts {
    /// Count findings by severity; unknown severity strings are skipped
    pub fn from_findings<'a, I>(findings: I) -> Self
    where
        I: IntoIterator<Item = &'a Finding>,
    {
        let mut counts = Self::default();
        for finding in findings {
            if let Some(severity) = finding.severity() {
                counts.add(severity, 1);
            }
        }
        counts
    }

    /// Read a controller `bySeverity` map; unknown keys are skipped
    pub fn from_map(by_severity: &HashMap<String, u32>) -> Self {
        let mut counts = Self::default();
        for (label, count) in by_severity {
            if let Ok(severity) = label.parse::<Severity>() {
                counts.add(severity, *count);
            }
        }
        counts
    }

    fn add(&mut self, severity: Severity, n: u32) {
        let slot = match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        };
        *slot = slot.saturating_add(n);
    }

    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }

    /// Compact "2C 1H" style label, zero counts omitted
    pub fn compact(&self) -> String {
        Severity::ALL
            .iter()
            .filter(|s| self.get(**s) > 0)
            .map(|s| format!("{}{}", self.get(*s), &s.as_str()[..1]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
