use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry of the country list resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    #[serde(rename = "Country")]
    pub code: String,
    #[serde(rename = "CountryName", default)]
    pub name: Option<String>,
}

impl Country {
    /// Display label, falling back to the code when no name is known.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.code)
    }
}

/// One observed wage gap for a country-year.
///
/// Backends built from CSV exports sometimes serialize `Year` and `WageGap`
/// as strings; both are accepted and normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WageGapRecord {
    #[serde(rename = "Country")]
    pub country_code: String,
    #[serde(rename = "CountryName", default)]
    pub country_name: Option<String>,
    #[serde(rename = "Year", deserialize_with = "de_i32_from_string_or_number")]
    pub year: i32,
    #[serde(rename = "WageGap", deserialize_with = "de_f64_from_string_or_number")]
    pub gap: f64,
}

impl WageGapRecord {
    pub fn new(code: &str, name: Option<&str>, year: i32, gap: f64) -> Self {
        Self {
            country_code: code.to_string(),
            country_name: name.map(str::to_string),
            year,
            gap,
        }
    }

    pub fn display_name(&self) -> &str {
        non_empty(self.country_name.as_deref()).unwrap_or(&self.country_code)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Serde helper: parse `f64` from either a JSON number or a string.
fn de_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or a string holding a number")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<f64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// Serde helper: parse a year from either a JSON integer or a string.
fn de_i32_from_string_or_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "an integer year or a string holding one")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(E::custom)
        }

        // pandas round-trips sometimes leave years as 2020.0
        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
                Ok(v as i32)
            } else {
                Err(E::custom(format!("not an integer year: {v}")))
            }
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.trim();
            match s.parse::<i32>() {
                Ok(y) => Ok(y),
                Err(_) => s
                    .parse::<f64>()
                    .map_err(E::custom)
                    .and_then(|f| self.visit_f64(f)),
            }
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// One forecast value for a future year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "de_i32_from_string_or_number")]
    pub year: i32,
    #[serde(deserialize_with = "de_f64_from_string_or_number")]
    pub gap: f64,
}

/// Body of the per-country forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastResponse {
    #[serde(default)]
    pub predictions: Option<Vec<ForecastPoint>>,
}

/// Forecast state for a single country.
///
/// A failed request, a `null` body and a body without `predictions` all map to
/// `Unavailable`; an empty list is `Available` with no points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Forecast {
    Available(Vec<ForecastPoint>),
    #[default]
    Unavailable,
}

impl Forecast {
    pub fn points(&self) -> &[ForecastPoint] {
        match self {
            Forecast::Available(points) => points,
            Forecast::Unavailable => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Forecast::Available(_))
    }
}

impl From<Option<ForecastResponse>> for Forecast {
    fn from(r: Option<ForecastResponse>) -> Self {
        match r.and_then(|r| r.predictions) {
            Some(points) => Forecast::Available(points),
            None => Forecast::Unavailable,
        }
    }
}

/// Forecasts keyed by country code.
pub type ForecastMap = BTreeMap<String, Forecast>;

/// Policy-performance summary row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyEntry {
    pub name: String,
    #[serde(deserialize_with = "de_f64_from_string_or_number")]
    pub annual_reduction: f64,
    #[serde(deserialize_with = "de_f64_from_string_or_number")]
    pub current_gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PolicyImpact {
    #[serde(default)]
    pub top_performers: Vec<PolicyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalStats {
    #[serde(deserialize_with = "de_f64_from_string_or_number")]
    pub average_gap: f64,
}

/// Economic-impact summary: global average plus per-region gaps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EconomicImpact {
    #[serde(default)]
    pub global_stats: Option<GlobalStats>,
    #[serde(default)]
    pub regional_gaps: Option<BTreeMap<String, f64>>,
}

/// Everything the core needs, already retrieved.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs {
    pub countries: Vec<Country>,
    pub historical: Vec<WageGapRecord>,
    pub forecasts: ForecastMap,
    pub policy: Option<PolicyImpact>,
    pub economic: Option<EconomicImpact>,
}

impl DashboardInputs {
    /// Display name for a code: country list first, then any record carrying a name.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        if let Some(c) = self.countries.iter().find(|c| c.code == code) {
            if let Some(name) = non_empty(c.name.as_deref()) {
                return name;
            }
        }
        self.historical
            .iter()
            .filter(|r| r.country_code == code)
            .find_map(|r| non_empty(r.country_name.as_deref()))
            .unwrap_or(code)
    }
}

/// Whether a value was observed or forecast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Historical,
    Prediction,
}

/// Per-year aggregate across all countries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub avg_gap: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    pub origin: Origin,
}

/// One year of the selected countries' series, keyed by country code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionRow {
    pub year: i32,
    pub origin: Origin,
    pub values: BTreeMap<String, f64>,
}

/// A drawable series: code plus resolved display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesKey {
    pub code: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionTrend {
    pub series: Vec<SeriesKey>,
    pub rows: Vec<SelectionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionBucket {
    pub label: String,
    pub count: usize,
    pub color_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
    pub country_display_name: String,
    pub country_code: String,
    pub gap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeltaRow {
    pub country_display_name: String,
    pub country_code: String,
    pub current_gap: f64,
    pub predicted_gap: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionGap {
    pub region: String,
    pub gap: f64,
}

/// Round to two decimals, the precision every exposed value is shown at.
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
pub fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}
