//! Error types for the dashboard core.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures the core reports instead of degrading.
///
/// Missing policy/economic data, missing forecasts and odd-but-typed numbers
/// never surface here; they shrink the affected dataset instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No historical record at all, so neither `earliest_year` nor `latest_year` exists.
    #[error("no historical wage-gap data available")]
    NoHistoricalData,
}
