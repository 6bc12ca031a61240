//! Synchronous client for the wage-gap backend.
//!
//! Endpoints (relative to `base_url`):
//! - `/countries`, `/historical-data`: required; failure is an error
//! - `/policy-impact`, `/economic-impact`: optional; failure degrades to `None`
//! - `/predict/{code}`: one request per country, issued concurrently
//!
//! A failed forecast request never fails the whole load: that country's
//! forecast becomes [`Forecast::Unavailable`].
//!
//! Typical usage:
//! ```no_run
//! # use paygap::{Client, Selection};
//! let client = Client::default();
//! let inputs = client.fetch_all()?;
//! let dash = paygap::view::assemble(&inputs, &Selection::default(), &Default::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::config::ClientConfig;
use crate::models::{
    Country, DashboardInputs, EconomicImpact, Forecast, ForecastMap, ForecastResponse,
    PolicyImpact, WageGapRecord,
};
use anyhow::{Context, Result, bail};
use log::{debug, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    max_parallel: usize,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_config(&ClientConfig::default()).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in country codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(code: &str) -> String {
    percent_encoding::utf8_percent_encode(code.trim(), SAFE).to_string()
}

impl Client {
    pub fn with_config(cfg: &ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .redirect(Policy::limited(5))
            .user_agent(concat!("paygap/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            max_parallel: cfg.max_parallel.max(1),
            http,
        })
    }

    /// GET `path` and decode JSON, retrying 5xx and network errors with backoff.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_err = anyhow::anyhow!("no attempt made");
        let backoffs = [100u64, 300];
        for attempt in 0..=backoffs.len() {
            match self.http.get(&url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().with_context(|| format!("decode json from {url}"));
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = anyhow::anyhow!("HTTP {}", r.status());
                }
                Ok(r) => bail!("GET {url} failed with HTTP {}", r.status()),
                Err(e) => last_err = e.into(),
            }
            // no wait after the final attempt
            if let Some(ms) = backoffs.get(attempt) {
                std::thread::sleep(Duration::from_millis(*ms));
            }
        }
        bail!("GET {url}: {last_err:#}");
    }

    pub fn fetch_countries(&self) -> Result<Vec<Country>> {
        self.get_json("/countries")
    }

    pub fn fetch_historical(&self) -> Result<Vec<WageGapRecord>> {
        self.get_json("/historical-data")
    }

    pub fn fetch_policy(&self) -> Result<PolicyImpact> {
        self.get_json("/policy-impact")
    }

    pub fn fetch_economic(&self) -> Result<EconomicImpact> {
        self.get_json("/economic-impact")
    }

    /// Forecast for one country; any failure or a `null` body is `Unavailable`.
    pub fn fetch_forecast(&self, code: &str) -> Forecast {
        match self.get_json::<Option<ForecastResponse>>(&format!("/predict/{}", enc(code))) {
            Ok(body) => Forecast::from(body),
            Err(e) => {
                warn!("no forecast for {code}: {e:#}");
                Forecast::Unavailable
            }
        }
    }

    /// Forecasts for all `codes`, at most `max_parallel` requests in flight.
    pub fn fetch_forecasts(&self, codes: &[String]) -> ForecastMap {
        let mut out = ForecastMap::new();
        for chunk in codes.chunks(self.max_parallel) {
            let fetched: Vec<(String, Forecast)> = std::thread::scope(|s| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|code| (code, s.spawn(move || self.fetch_forecast(code))))
                    .collect();
                handles
                    .into_iter()
                    .map(|(code, h)| (code.clone(), h.join().unwrap_or(Forecast::Unavailable)))
                    .collect()
            });
            out.extend(fetched);
        }
        out
    }

    /// Load every resource the dashboard needs.
    pub fn fetch_all(&self) -> Result<DashboardInputs> {
        let countries = self.fetch_countries().context("fetch country list")?;
        let historical = self.fetch_historical().context("fetch historical data")?;
        let policy = self
            .fetch_policy()
            .map_err(|e| warn!("policy impact unavailable: {e:#}"))
            .ok();
        let economic = self
            .fetch_economic()
            .map_err(|e| warn!("economic impact unavailable: {e:#}"))
            .ok();

        let codes: Vec<String> = countries.iter().map(|c| c.code.clone()).collect();
        let forecasts = self.fetch_forecasts(&codes);
        debug!(
            "fetched {} countries, {} records, {} forecasts available",
            countries.len(),
            historical.len(),
            forecasts.values().filter(|f| f.is_available()).count()
        );

        Ok(DashboardInputs {
            countries,
            historical,
            forecasts,
            policy,
            economic,
        })
    }
}
