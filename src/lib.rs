//! paygap
//!
//! Turns per-country gender wage-gap history and per-country ML forecasts into
//! every dataset a wage-gap dashboard draws. Pairs with the `paygap` CLI.
//!
//! ### Features
//! - Global trend (mean, best, worst per year), history followed by predictions
//! - Merged history + forecast series for a chosen set of countries
//! - Latest-year ranking, gap-range distribution, current-vs-predicted deltas
//! - Regional summary and policy leaders
//! - Fetch inputs from the backend (forecasts concurrently) or load them from disk
//!
//! The core is a pure function of its inputs: [`view::assemble`] recomputes
//! everything from scratch for each selection.
//!
//! ### Example
//! ```no_run
//! use paygap::{Client, Selection};
//!
//! let inputs = Client::default().fetch_all()?;
//! let selection = Selection::new(["USA", "CAN"]);
//! let dash = paygap::view::assemble(&inputs, &selection, &Default::default())?;
//! println!("{:#?}", dash.deltas);
//! paygap::storage::save_json(&dash, "dashboard.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod distribution;
pub mod error;
pub mod index;
pub mod models;
pub mod ranking;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod view;

pub use api::Client;
pub use error::Error;
pub use models::{DashboardInputs, Forecast, ForecastPoint, Origin, WageGapRecord};
pub use selection::Selection;
pub use view::Dashboard;
