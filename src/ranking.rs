//! Sorted country rankings, current-vs-predicted deltas and policy leaders.

use crate::index::RecordIndex;
use crate::models::{
    DashboardInputs, DeltaRow, Forecast, ForecastPoint, PolicyEntry, RankingEntry, WageGapRecord,
    round2,
};
use crate::selection::Selection;

/// Latest-year records sorted ascending by rounded gap.
///
/// The sort is stable, so equal gaps keep their input order.
pub fn ranking(records: &[WageGapRecord]) -> Vec<RankingEntry> {
    let index = RecordIndex::new(records);
    let Some(latest) = index.latest_year() else {
        return Vec::new();
    };
    let mut out: Vec<RankingEntry> = index
        .in_year(latest)
        .into_iter()
        .map(|r| RankingEntry {
            country_display_name: r.display_name().to_string(),
            country_code: r.country_code.clone(),
            gap: round2(r.gap),
        })
        .collect();
    out.sort_by(|a, b| a.gap.total_cmp(&b.gap));
    out
}

/// First `n` entries of a ranking.
pub fn best_of(ranking: &[RankingEntry], n: usize) -> &[RankingEntry] {
    &ranking[..n.min(ranking.len())]
}

/// One row per selected country that has both a historical record and a
/// forecast after the latest historical year.
///
/// The current value is the country's most recent record; the predicted value
/// is its forecast point with the highest year. The delta is computed from
/// unrounded inputs and then rounded; negative means the gap is narrowing.
pub fn deltas(selection: &Selection, inputs: &DashboardInputs) -> Vec<DeltaRow> {
    let index = RecordIndex::new(&inputs.historical);
    let Some(latest) = index.latest_year() else {
        return Vec::new();
    };

    selection
        .codes()
        .iter()
        .filter_map(|code| {
            let current = index.latest_for(code)?;
            let predicted = inputs
                .forecasts
                .get(code)
                .map(Forecast::points)
                .unwrap_or_default()
                .iter()
                .filter(|p| p.year > latest)
                .fold(None, |best: Option<ForecastPoint>, p| match best {
                    Some(b) if p.year < b.year => Some(b),
                    _ => Some(*p),
                })?;
            Some(DeltaRow {
                country_display_name: inputs.display_name(code).to_string(),
                country_code: code.clone(),
                current_gap: round2(current.gap),
                predicted_gap: round2(predicted.gap),
                delta: round2(predicted.gap - current.gap),
            })
        })
        .collect()
}

/// Top `n` policy performers by annual reduction, descending.
///
/// Sorting uses the rounded reduction, so entries equal at display
/// precision keep input order.
pub fn policy_leaders(entries: &[PolicyEntry], n: usize) -> Vec<PolicyEntry> {
    let mut sorted: Vec<PolicyEntry> = entries
        .iter()
        .map(|e| PolicyEntry {
            name: e.name.clone(),
            annual_reduction: round2(e.annual_reduction),
            current_gap: round2(e.current_gap),
        })
        .collect();
    sorted.sort_by(|a, b| b.annual_reduction.total_cmp(&a.annual_reduction));
    sorted.truncate(n);
    sorted
}
