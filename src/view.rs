//! Composition of every chart-ready dataset from one set of inputs.

use crate::config::DashboardOptions;
use crate::distribution::gap_distribution;
use crate::error::Result;
use crate::index::RecordIndex;
use crate::models::{
    DashboardInputs, DeltaRow, DistributionBucket, EconomicImpact, Origin, PolicyEntry,
    RankingEntry, RegionGap, SelectionTrend, TrendPoint, round2,
};
use crate::ranking::{self, policy_leaders};
use crate::selection::{Selection, selection_trend};
use crate::stats::{clip_forecasts, global_trend, max_prediction_year};
use log::debug;
use serde::{Deserialize, Serialize};

/// All datasets the presentation layer draws, plus the scalar header facts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub earliest_year: i32,
    pub latest_year: i32,
    pub max_prediction_year: i32,
    pub data_points: usize,
    pub country_count: usize,
    pub selected_country_display_names: Vec<String>,
    pub global_trend: Vec<TrendPoint>,
    pub selection_trend: SelectionTrend,
    pub distribution: Vec<DistributionBucket>,
    pub ranking: Vec<RankingEntry>,
    pub best: Vec<RankingEntry>,
    pub deltas: Vec<DeltaRow>,
    pub regional_summary: Vec<RegionGap>,
    pub policy_leaders: Vec<PolicyEntry>,
    pub global_average: Option<f64>,
    pub predicted_average: Option<f64>,
}

impl Dashboard {
    /// The `n` countries with the smallest latest-year gap.
    pub fn best_of(&self, n: usize) -> &[RankingEntry] {
        ranking::best_of(&self.ranking, n)
    }

    pub fn best_today(&self) -> Option<&RankingEntry> {
        self.ranking.first()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_country_display_names.len()
    }

    /// Rows of the global trend tagged as predictions.
    pub fn prediction_rows(&self) -> impl Iterator<Item = &TrendPoint> {
        self.global_trend
            .iter()
            .filter(|p| p.origin == Origin::Prediction)
    }
}

/// Regional gaps as an ordered list (alphabetical by region), rounded.
pub fn regional_summary(economic: Option<&EconomicImpact>) -> Vec<RegionGap> {
    economic
        .and_then(|e| e.regional_gaps.as_ref())
        .map(|gaps| {
            gaps.iter()
                .map(|(region, gap)| RegionGap {
                    region: region.clone(),
                    gap: round2(*gap),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Build the dashboard for `selection`.
///
/// Pure: the same inputs and selection always give the same output. Only an
/// empty historical collection is an error; every other missing resource
/// leaves its dataset empty.
pub fn assemble(
    inputs: &DashboardInputs,
    selection: &Selection,
    options: &DashboardOptions,
) -> Result<Dashboard> {
    let (earliest_year, latest_year) = RecordIndex::new(&inputs.historical).year_span()?;

    let clipped = DashboardInputs {
        forecasts: clip_forecasts(&inputs.forecasts, latest_year),
        ..inputs.clone()
    };
    let inputs = &clipped;

    let global_trend = global_trend(&inputs.historical, &inputs.forecasts)?;
    let predicted_average = global_trend
        .iter()
        .rev()
        .find(|p| p.origin == Origin::Prediction)
        .map(|p| p.avg_gap);
    let ranking = ranking::ranking(&inputs.historical);
    let best = ranking::best_of(&ranking, options.best_n).to_vec();
    let selection_trend = selection_trend(selection, inputs);
    let policy = inputs
        .policy
        .as_ref()
        .map(|p| policy_leaders(&p.top_performers, options.policy_n))
        .unwrap_or_default();

    let dashboard = Dashboard {
        earliest_year,
        latest_year,
        max_prediction_year: max_prediction_year(&inputs.forecasts, latest_year),
        data_points: inputs.historical.len(),
        country_count: inputs.countries.len(),
        selected_country_display_names: selection_trend
            .series
            .iter()
            .map(|s| s.display_name.clone())
            .collect(),
        global_trend,
        distribution: gap_distribution(&inputs.historical),
        deltas: ranking::deltas(selection, inputs),
        regional_summary: regional_summary(inputs.economic.as_ref()),
        policy_leaders: policy,
        global_average: inputs
            .economic
            .as_ref()
            .and_then(|e| e.global_stats.as_ref())
            .map(|g| round2(g.average_gap)),
        predicted_average,
        selection_trend,
        ranking,
        best,
    };
    debug!(
        "dashboard {}-{} (predictions to {}): {} ranked, {} deltas, {} selected",
        dashboard.earliest_year,
        dashboard.latest_year,
        dashboard.max_prediction_year,
        dashboard.ranking.len(),
        dashboard.deltas.len(),
        dashboard.selected_count()
    );
    Ok(dashboard)
}
