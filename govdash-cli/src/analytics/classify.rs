//! Score classification
//!
//! The one place that maps a 0–100 score to a color band, letter grade,
//! compliance phase or category status. Every view renders through these.

use govdash_shared::CategoryStatus;
use serde::Serialize;
use std::fmt;

/// Color band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        match score {
            s if s >= 90 => ScoreBand::Green,
            s if s >= 70 => ScoreBand::Yellow,
            s if s >= 50 => ScoreBand::Orange,
            _ => ScoreBand::Red,
        }
    }

    /// Same band for a fractional score, e.g. an average
    pub fn of_f64(score: f64) -> Self {
        if score.is_nan() {
            return ScoreBand::Red;
        }
        Self::of(score.clamp(0.0, 100.0).floor() as u32)
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ScoreBand::Green => "#22c55e",
            ScoreBand::Yellow => "#eab308",
            ScoreBand::Orange => "#f97316",
            ScoreBand::Red => "#ef4444",
        }
    }

    pub fn status(&self) -> CategoryStatus {
        match self {
            ScoreBand::Green => CategoryStatus::Passing,
            ScoreBand::Yellow => CategoryStatus::Warning,
            ScoreBand::Orange => CategoryStatus::Failing,
            ScoreBand::Red => CategoryStatus::Critical,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreBand::Green => "green",
            ScoreBand::Yellow => "yellow",
            ScoreBand::Orange => "orange",
            ScoreBand::Red => "red",
        };
        f.pad(s)
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn of(score: u32) -> Self {
        match score {
            s if s >= 90 => Grade::A,
            s if s >= 70 => Grade::B,
            s if s >= 50 => Grade::C,
            s if s >= 30 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.pad(s)
    }
}

/// Cluster compliance phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
    Critical,
}

impl Phase {
    pub fn of(score: u32) -> Self {
        match score {
            s if s >= 90 => Phase::Compliant,
            s if s >= 70 => Phase::PartiallyCompliant,
            s if s >= 50 => Phase::NonCompliant,
            _ => Phase::Critical,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Compliant => "Compliant",
            Phase::PartiallyCompliant => "PartiallyCompliant",
            Phase::NonCompliant => "NonCompliant",
            Phase::Critical => "Critical",
        };
        f.pad(s)
    }
}

/// Category status for a score
pub fn category_status(score: u32) -> CategoryStatus {
    ScoreBand::of(score).status()
}
