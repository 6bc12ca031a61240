//! Tunables shared by the library and the CLI. Nothing is read from disk;
//! the binary overrides these from its flags.

use std::time::Duration;

/// Country codes selected when the caller does not pick any.
pub const DEFAULT_SELECTION: [&str; 3] = ["CAN", "USA", "MEX"];

/// Sizes of the truncated lists in the assembled dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Length of the "best countries" list.
    pub best_n: usize,
    /// Length of the policy-leaders list.
    pub policy_n: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            best_n: 15,
            policy_n: 10,
        }
    }
}

/// Connection settings for [`crate::api::Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Upper bound on concurrent per-country forecast requests.
    pub max_parallel: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_parallel: 8,
        }
    }
}
