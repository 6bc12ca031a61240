//! The user's chosen countries and their merged history + forecast series.

use crate::config::DEFAULT_SELECTION;
use crate::index::RecordIndex;
use crate::models::{
    DashboardInputs, Forecast, Origin, SelectionRow, SelectionTrend, SeriesKey,
};
use std::collections::BTreeMap;

/// Ordered, duplicate-free list of selected country codes.
///
/// Order of first occurrence decides series order (and therefore colors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    codes: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if !out.contains(&code) {
                out.push(code);
            }
        }
        Self { codes: out }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Remove `code` if selected, append it otherwise.
    pub fn toggle(&self, code: &str) -> Self {
        if self.contains(code) {
            Self {
                codes: self.codes.iter().filter(|c| *c != code).cloned().collect(),
            }
        } else {
            let mut codes = self.codes.clone();
            codes.push(code.to_string());
            Self { codes }
        }
    }

    /// Series keys in selection order with display names resolved.
    pub fn series(&self, inputs: &DashboardInputs) -> Vec<SeriesKey> {
        self.codes
            .iter()
            .map(|code| SeriesKey {
                code: code.clone(),
                display_name: inputs.display_name(code).to_string(),
            })
            .collect()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION)
    }
}

/// Merge history and forecasts of the selected countries into one row per year.
///
/// Rows hold values keyed by country code, so two countries sharing a display
/// name never overwrite each other. Forecast points at or before the latest
/// historical year are ignored, which keeps every historical row strictly
/// before every prediction row. A repeated (country, year) record keeps the
/// value that comes last in input order.
pub fn selection_trend(selection: &Selection, inputs: &DashboardInputs) -> SelectionTrend {
    let index = RecordIndex::new(&inputs.historical);
    let latest = index.latest_year();
    let mut rows: BTreeMap<i32, SelectionRow> = BTreeMap::new();

    for code in selection.codes() {
        for r in index.for_country(code) {
            rows.entry(r.year)
                .or_insert_with(|| empty_row(r.year, Origin::Historical))
                .values
                .insert(code.clone(), r.gap);
        }
    }

    for code in selection.codes() {
        let points = inputs
            .forecasts
            .get(code)
            .map(Forecast::points)
            .unwrap_or_default();
        for p in points.iter().filter(|p| latest.is_none_or(|l| p.year > l)) {
            rows.entry(p.year)
                .or_insert_with(|| empty_row(p.year, Origin::Prediction))
                .values
                .insert(code.clone(), p.gap);
        }
    }

    SelectionTrend {
        series: selection.series(inputs),
        rows: rows.into_values().collect(),
    }
}

fn empty_row(year: i32, origin: Origin) -> SelectionRow {
    SelectionRow {
        year,
        origin,
        values: BTreeMap::new(),
    }
}
