//! Radar chart geometry
//!
//! Points are spaced evenly by angle starting at 12 o'clock and going
//! clockwise in screen coordinates. Input order is preserved.

use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub label: String,
    pub score: u32,
    pub x: f64,
    pub y: f64,
}

/// Axis endpoint for slot `index` of `count` at `radius`
pub fn axis_point(index: usize, count: usize, center: (f64, f64), radius: f64) -> (f64, f64) {
    if count == 0 {
        return center;
    }
    let angle = 2.0 * PI * index as f64 / count as f64 - PI / 2.0;
    (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
}

/// Plot each `(label, score)` at a distance of `score / 100 * radius`
///
/// Scores above 100 are drawn on the outer ring.
pub fn radar_points(entries: &[(&str, u32)], center: (f64, f64), radius: f64) -> Vec<RadarPoint> {
    let count = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, (label, score))| {
            let score = (*score).min(100);
            let r = f64::from(score) / 100.0 * radius;
            let (x, y) = axis_point(i, count, center, r);
            RadarPoint {
                label: (*label).to_string(),
                score,
                x,
                y,
            }
        })
        .collect()
}
