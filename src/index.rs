//! Lookup of historical records by year and by country.

use crate::error::{Error, Result};
use crate::models::WageGapRecord;
use ahash::AHashMap;

/// Borrowing index over a flat record slice.
///
/// Lookups return records in input order, which the ranking relies on for
/// stable tie-breaking.
#[derive(Debug, Clone)]
pub struct RecordIndex<'a> {
    records: &'a [WageGapRecord],
    by_year: AHashMap<i32, Vec<usize>>,
    by_code: AHashMap<&'a str, Vec<usize>>,
    span: Option<(i32, i32)>,
}

impl<'a> RecordIndex<'a> {
    pub fn new(records: &'a [WageGapRecord]) -> Self {
        let mut by_year: AHashMap<i32, Vec<usize>> = AHashMap::new();
        let mut by_code: AHashMap<&'a str, Vec<usize>> = AHashMap::new();
        let mut span: Option<(i32, i32)> = None;
        for (i, r) in records.iter().enumerate() {
            by_year.entry(r.year).or_default().push(i);
            by_code.entry(r.country_code.as_str()).or_default().push(i);
            span = Some(match span {
                Some((lo, hi)) => (lo.min(r.year), hi.max(r.year)),
                None => (r.year, r.year),
            });
        }
        Self {
            records,
            by_year,
            by_code,
            span,
        }
    }

    pub fn records(&self) -> &'a [WageGapRecord] {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn earliest_year(&self) -> Option<i32> {
        self.span.map(|(lo, _)| lo)
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.span.map(|(_, hi)| hi)
    }

    /// `(earliest_year, latest_year)`, or [`Error::NoHistoricalData`] for an empty input.
    pub fn year_span(&self) -> Result<(i32, i32)> {
        self.span.ok_or(Error::NoHistoricalData)
    }

    pub fn in_year(&self, year: i32) -> Vec<&'a WageGapRecord> {
        self.pick(self.by_year.get(&year))
    }

    pub fn for_country(&self, code: &str) -> Vec<&'a WageGapRecord> {
        self.pick(self.by_code.get(code))
    }

    /// The country's most recent record; the last one in input order if a year
    /// repeats, the same record the selection series keeps.
    pub fn latest_for(&self, code: &str) -> Option<&'a WageGapRecord> {
        self.for_country(code)
            .into_iter()
            .fold(None, |best: Option<&'a WageGapRecord>, r| match best {
                Some(b) if b.year > r.year => Some(b),
                _ => Some(r),
            })
    }

    fn pick(&self, idx: Option<&Vec<usize>>) -> Vec<&'a WageGapRecord> {
        let records = self.records;
        idx.map(|v| v.iter().map(|&i| &records[i]).collect())
            .unwrap_or_default()
    }
}
