use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::scanner::RiskThresholds;

pub const DEFAULT_ENDPOINT: &str = "https://api.rugcheck.xyz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Connection and scoring settings for a scan run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub max_retries: u32,
    pub strict: bool,
    pub thresholds: RiskThresholds,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: None,
            timeout_ms: None,
            max_retries: DEFAULT_MAX_RETRIES,
            strict: false,
            thresholds: RiskThresholds::default(),
        }
    }
}

impl ScanSettings {
    const ENDPOINT_ENV: &'static str = "LPSCAN_ENDPOINT";
    const TIMEOUT_ENV: &'static str = "LPSCAN_TIMEOUT_SECS";
    const RETRIES_ENV: &'static str = "LPSCAN_MAX_RETRIES";
    const STRICT_ENV: &'static str = "LPSCAN_STRICT";
    const GOOD_SCORE_ENV: &'static str = "LPSCAN_GOOD_SCORE";
    const WARN_SCORE_ENV: &'static str = "LPSCAN_WARN_SCORE";

    /// Load settings from environment variables.
    ///
    /// * `LPSCAN_ENDPOINT`     — RugCheck base URL (default: `https://api.rugcheck.xyz`).
    /// * `LPSCAN_TIMEOUT_SECS` — request timeout in seconds (default: 30).
    /// * `LPSCAN_MAX_RETRIES`  — retries on 5xx/429/transport errors (default: 2).
    /// * `LPSCAN_STRICT`       — fail instead of rendering an unscored report.
    /// * `LPSCAN_GOOD_SCORE` / `LPSCAN_WARN_SCORE` — risk bucket thresholds.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Layer the `LPSCAN_*` variables that are set on top of `self`.
    ///
    /// Used after loading a config file so the environment still wins.
    pub fn with_env_overrides(self) -> Self {
        self.overlay(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Self {
        Self::default().overlay(vars)
    }

    fn overlay(mut self, vars: HashMap<String, String>) -> Self {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(endpoint) = get(Self::ENDPOINT_ENV) {
            self.endpoint = Some(endpoint);
        }
        if let Some(secs) = get(Self::TIMEOUT_ENV).and_then(|v| v.parse::<u64>().ok()) {
            self.timeout_secs = Some(secs);
            self.timeout_ms = None;
        }
        if let Some(retries) = get(Self::RETRIES_ENV).and_then(|v| v.parse().ok()) {
            self.max_retries = retries;
        }
        if let Some(strict) = get(Self::STRICT_ENV) {
            self.strict = matches!(strict.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(good) = get(Self::GOOD_SCORE_ENV).and_then(|v| v.parse().ok()) {
            self.thresholds.good = good;
        }
        if let Some(warn) = get(Self::WARN_SCORE_ENV).and_then(|v| v.parse().ok()) {
            self.thresholds.warn = warn;
        }
        self
    }

    /// Set a request timeout with millisecond precision.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1));
        self.timeout_secs = None;
    }

    /// Effective request timeout; `timeout_ms` takes precedence over `timeout_secs`.
    pub fn timeout(&self) -> Duration {
        match (self.timeout_ms, self.timeout_secs) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, Some(secs)) => Duration::from_secs(secs),
            (None, None) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}
