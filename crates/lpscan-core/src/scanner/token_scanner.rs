use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use super::normalize::normalize_report;
use super::{RiskThresholds, ScanStage, TokenReport};
use crate::address::TokenAddress;
use crate::rugcheck::ReportSource;

/// Runs a scan end to end: validate, fetch, normalize.
pub struct TokenScanner<S: ReportSource> {
    source: Arc<S>,
    thresholds: RiskThresholds,
    strict: bool,
}

impl<S: ReportSource> TokenScanner<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_thresholds(source, RiskThresholds::default())
    }

    pub fn with_thresholds(source: Arc<S>, thresholds: RiskThresholds) -> Self {
        Self {
            source,
            thresholds,
            strict: false,
        }
    }

    /// Return fetch failures as errors instead of rendering an unscored report.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub async fn scan(&self, input: &str) -> Result<TokenReport> {
        self.scan_with_progress(input, |_| {}).await
    }

    #[instrument(name = "scan_token", skip(self, on_stage))]
    pub async fn scan_with_progress<F>(&self, input: &str, mut on_stage: F) -> Result<TokenReport>
    where
        F: FnMut(ScanStage),
    {
        let address = TokenAddress::parse(input).context("Enter a valid Solana contract address")?;

        on_stage(ScanStage::Connecting);
        on_stage(ScanStage::Scanning {
            label: address.scan_label(),
        });
        on_stage(ScanStage::Fetching);

        let raw = match self.source.fetch_summary(&address).await {
            Ok(raw) => raw,
            Err(err) if !self.strict => {
                warn!(error = %format!("{err:#}"), %address, "RugCheck fetch failed");
                None
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to analyze token {address}"));
            }
        };

        for stage in [
            ScanStage::Holders,
            ScanStage::Platform,
            ScanStage::Fees,
            ScanStage::Compiling,
        ] {
            on_stage(stage);
        }

        let report = normalize_report(&address, raw.as_ref(), &self.thresholds);
        debug!(
            risk_level = ?report.risk_level,
            markets = report.total_markets,
            holders = report.top_holders.len(),
            "scan completed"
        );
        on_stage(ScanStage::Complete);
        Ok(report)
    }
}
