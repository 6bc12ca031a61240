//! Bucketing of latest-year gaps into fixed ranges for the pie chart.

use crate::index::RecordIndex;
use crate::models::{DistributionBucket, WageGapRecord, round2};

/// A half-open range `(min, max]` with its label and color tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRange {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub color_tag: &'static str,
}

impl GapRange {
    pub fn contains(&self, gap: f64) -> bool {
        gap > self.min && gap <= self.max
    }
}

/// Ranges in display order; green means closer to equal pay.
pub const GAP_RANGES: [GapRange; 5] = [
    GapRange { label: "0-5%", min: 0.0, max: 5.0, color_tag: "#10b981" },
    GapRange { label: "5-10%", min: 5.0, max: 10.0, color_tag: "#3b82f6" },
    GapRange { label: "10-15%", min: 10.0, max: 15.0, color_tag: "#f59e0b" },
    GapRange { label: "15-20%", min: 15.0, max: 20.0, color_tag: "#ef4444" },
    GapRange { label: "20%+", min: 20.0, max: f64::INFINITY, color_tag: "#991b1b" },
];

/// Count the latest year's (rounded) gaps per range.
///
/// Empty buckets are omitted and range order is kept. A gap of zero or below
/// matches no range and is not counted.
pub fn gap_distribution(records: &[WageGapRecord]) -> Vec<DistributionBucket> {
    let index = RecordIndex::new(records);
    let Some(latest) = index.latest_year() else {
        return Vec::new();
    };
    let gaps: Vec<f64> = index.in_year(latest).iter().map(|r| round2(r.gap)).collect();

    GAP_RANGES
        .iter()
        .map(|range| DistributionBucket {
            label: range.label.to_string(),
            count: gaps.iter().filter(|&&g| range.contains(g)).count(),
            color_tag: range.color_tag.to_string(),
        })
        .filter(|b| b.count > 0)
        .collect()
}
