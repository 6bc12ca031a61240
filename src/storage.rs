use crate::models::{
    Country, DashboardInputs, DeltaRow, DistributionBucket, EconomicImpact, Forecast,
    ForecastMap, ForecastResponse, Origin, PolicyImpact, RankingEntry, TrendPoint, WageGapRecord,
};
use crate::view::Dashboard;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::warn;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Leading characters spreadsheets treat as a formula.
const FORMULA_STARTERS: [char; 4] = ['=', '+', '-', '@'];

/// Prefix text cells that a spreadsheet would evaluate with a single quote.
fn safe_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(FORMULA_STARTERS) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

fn origin_label(p: &TrendPoint) -> &'static str {
    match p.origin {
        Origin::Historical => "historical",
        Origin::Prediction => "prediction",
    }
}

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {}", path.display()))
}

/// Load inputs saved from the backend into `dir`.
///
/// `countries.json` and `historical-data.json` are required. Policy and
/// economic summaries are optional, as is `predictions/<CODE>.json` for each
/// country: a missing or malformed file means no forecast for that country.
pub fn load_inputs<P: AsRef<Path>>(dir: P) -> Result<DashboardInputs> {
    let dir = dir.as_ref();
    let countries: Vec<Country> = read_json(dir.join("countries.json"))?;
    let historical: Vec<WageGapRecord> = read_json(dir.join("historical-data.json"))?;
    let policy = optional::<PolicyImpact>(&dir.join("policy-impact.json"));
    let economic = optional::<EconomicImpact>(&dir.join("economic-impact.json"));

    let mut forecasts = ForecastMap::new();
    for c in &countries {
        if !is_plain_code(&c.code) {
            warn!("ignoring forecast for country code {:?}: not a plain code", c.code);
            forecasts.insert(c.code.clone(), Forecast::Unavailable);
            continue;
        }
        let path = dir.join("predictions").join(format!("{}.json", c.code));
        let forecast = if path.exists() {
            match read_json::<Option<ForecastResponse>, _>(&path) {
                Ok(body) => Forecast::from(body),
                Err(e) => {
                    warn!("ignoring forecast for {}: {e:#}", c.code);
                    Forecast::Unavailable
                }
            }
        } else {
            Forecast::Unavailable
        };
        forecasts.insert(c.code.clone(), forecast);
    }

    Ok(DashboardInputs {
        countries,
        historical,
        forecasts,
        policy,
        economic,
    })
}

/// Country codes become file names; anything beyond `[A-Za-z0-9_-]` could
/// leave the predictions directory.
fn is_plain_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn optional<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    read_json(path)
        .map_err(|e| warn!("ignoring {}: {e:#}", path.display()))
        .ok()
}

/// Save the whole dashboard as pretty JSON.
pub fn save_json<P: AsRef<Path>>(dashboard: &Dashboard, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dashboard)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save the global trend (history then predictions) as CSV.
pub fn save_trend_csv<P: AsRef<Path>>(points: &[TrendPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "avg_gap", "min_gap", "max_gap", "origin"))?;
    for p in points {
        wtr.serialize((p.year, p.avg_gap, p.min_gap, p.max_gap, origin_label(p)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a ranking as CSV with a 1-based rank column.
pub fn save_ranking_csv<P: AsRef<Path>>(entries: &[RankingEntry], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("rank", "country", "country_code", "gap"))?;
    for (i, e) in entries.iter().enumerate() {
        wtr.serialize((
            i + 1,
            safe_cell(&e.country_display_name),
            safe_cell(&e.country_code),
            e.gap,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_deltas_csv<P: AsRef<Path>>(rows: &[DeltaRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("country", "country_code", "current_gap", "predicted_gap", "delta"))?;
    for r in rows {
        wtr.serialize((
            safe_cell(&r.country_display_name),
            safe_cell(&r.country_code),
            r.current_gap,
            r.predicted_gap,
            r.delta,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_distribution_csv<P: AsRef<Path>>(buckets: &[DistributionBucket], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("range", "count", "color"))?;
    for b in buckets {
        wtr.serialize((&b.label, b.count, &b.color_tag))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every tabular dataset of the dashboard into `dir`.
pub fn save_csv_dir<P: AsRef<Path>>(dashboard: &Dashboard, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    save_trend_csv(&dashboard.global_trend, dir.join("global_trend.csv"))?;
    save_ranking_csv(&dashboard.ranking, dir.join("ranking.csv"))?;
    save_deltas_csv(&dashboard.deltas, dir.join("deltas.csv"))?;
    save_distribution_csv(&dashboard.distribution, dir.join("distribution.csv"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_cells_are_quoted() {
        assert_eq!(safe_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(safe_cell("@foo"), "'@foo");
        assert_eq!(safe_cell("Canada"), "Canada");
    }

    #[test]
    fn only_plain_codes_name_files() {
        assert!(is_plain_code("USA"));
        assert!(is_plain_code("EU-27"));
        assert!(!is_plain_code(""));
        assert!(!is_plain_code("../x"));
        assert!(!is_plain_code("a/b"));
        assert!(!is_plain_code("a\\b"));
        assert!(!is_plain_code(".."));
    }
}
