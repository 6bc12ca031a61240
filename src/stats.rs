use crate::error::Result;
use crate::index::RecordIndex;
use crate::models::{Forecast, ForecastMap, Origin, TrendPoint, WageGapRecord, round2};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Mean/min/max per year for one origin, sorted by year.
///
/// Years only exist if at least one value landed in them, so there is no
/// empty-group division.
pub fn yearly_summary<I>(values: I, origin: Origin) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = (i32, f64)>,
{
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for (year, gap) in values {
        groups.entry(year).or_default().push(gap);
    }

    groups
        .into_iter()
        .map(|(year, gaps)| {
            let count = gaps.len();
            let mean = gaps.iter().copied().sum::<f64>() / count as f64;
            let min = gaps.iter().copied().fold(f64::INFINITY, f64::min);
            let max = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            TrendPoint {
                year,
                avg_gap: round2(mean),
                min_gap: round2(min),
                max_gap: round2(max),
                origin,
            }
        })
        .collect()
}

/// Historical rows: every record of every country, grouped by year.
pub fn historical_trend(records: &[WageGapRecord]) -> Vec<TrendPoint> {
    yearly_summary(
        records.iter().map(|r| (r.year, r.gap)),
        Origin::Historical,
    )
}

/// Prediction rows from all available forecasts strictly after `latest_year`.
pub fn prediction_trend(forecasts: &ForecastMap, latest_year: i32) -> Vec<TrendPoint> {
    yearly_summary(
        forecasts
            .values()
            .flat_map(Forecast::points)
            .filter(|p| p.year > latest_year)
            .map(|p| (p.year, p.gap)),
        Origin::Prediction,
    )
}

/// Historical block followed by the prediction block, each ascending by year.
///
/// The blocks are concatenated, never re-sorted together, so the last
/// historical row marks the "today" boundary.
pub fn global_trend(records: &[WageGapRecord], forecasts: &ForecastMap) -> Result<Vec<TrendPoint>> {
    let (_, latest) = RecordIndex::new(records).year_span()?;
    let mut out = historical_trend(records);
    let predicted = prediction_trend(forecasts, latest);
    debug!(
        "global trend: {} historical rows, {} prediction rows",
        out.len(),
        predicted.len()
    );
    out.extend(predicted);
    Ok(out)
}

/// Latest forecast year across all countries, or `latest_year` when nobody has one.
pub fn max_prediction_year(forecasts: &ForecastMap, latest_year: i32) -> i32 {
    forecasts
        .values()
        .flat_map(Forecast::points)
        .map(|p| p.year)
        .filter(|&y| y > latest_year)
        .max()
        .unwrap_or(latest_year)
}

/// Drop forecast points that do not lie after `latest_year`.
///
/// Such a point collides with (or precedes) observed data; observed data
/// always wins and the collision is logged as a data-quality issue.
pub fn clip_forecasts(forecasts: &ForecastMap, latest_year: i32) -> ForecastMap {
    forecasts
        .iter()
        .map(|(code, forecast)| {
            let clipped = match forecast {
                Forecast::Available(points) => {
                    let (keep, stale): (Vec<_>, Vec<_>) =
                        points.iter().copied().partition(|p| p.year > latest_year);
                    for p in &stale {
                        warn!(
                            "ambiguous forecast for {code}: year {} is not after {latest_year}, keeping historical data",
                            p.year
                        );
                    }
                    Forecast::Available(keep)
                }
                Forecast::Unavailable => Forecast::Unavailable,
            };
            (code.clone(), clipped)
        })
        .collect()
}
