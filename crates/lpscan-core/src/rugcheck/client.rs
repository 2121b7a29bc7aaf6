use super::{RawSummary, ReportSource, ScanSettings};
use crate::address::TokenAddress;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Read-only client for the RugCheck report summary endpoint.
#[derive(Debug, Clone)]
pub struct RugCheckClient {
    http: Client,
    base: String,
    max_retries: u32,
}

impl RugCheckClient {
    pub fn new(settings: &ScanSettings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("lpscan/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout())
            .build()
            .context("failed to build RugCheck HTTP client")?;
        Ok(Self {
            http,
            base: settings.endpoint().trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
        })
    }

    fn summary_url(&self, address: &TokenAddress) -> String {
        format!("{}/v1/tokens/{}/report/summary", self.base, address)
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

#[async_trait]
impl ReportSource for RugCheckClient {
    async fn fetch_summary(&self, address: &TokenAddress) -> Result<Option<RawSummary>> {
        let url = self.summary_url(address);
        let mut attempt = 0u32;
        let mut backoff = Duration::from_millis(200);
        loop {
            debug!(%url, attempt, "requesting RugCheck summary");
            let response = match self.http.get(&url).send().await {
                Ok(resp) => resp,
                Err(err) => {
                    if attempt >= self.max_retries {
                        return Err(err).context("failed to call RugCheck report API");
                    }
                    sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let summary: RawSummary = response
                    .json()
                    .await
                    .context("failed to parse RugCheck response")?;
                return Ok(Some(summary));
            }

            if is_retryable(status) && attempt < self.max_retries {
                sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
                attempt += 1;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "RugCheck returned no report");
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const MINT: &str = "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr";

    fn settings(url: String, max_retries: u32) -> ScanSettings {
        ScanSettings {
            endpoint: Some(url),
            timeout_secs: Some(5),
            max_retries,
            ..ScanSettings::default()
        }
    }

    fn mint() -> TokenAddress {
        TokenAddress::parse(MINT).unwrap()
    }

    #[test]
    fn builds_summary_url_without_double_slash() {
        let client = RugCheckClient::new(&settings("http://localhost:1234/".into(), 0)).unwrap();
        assert_eq!(
            client.summary_url(&mint()),
            format!("http://localhost:1234/v1/tokens/{MINT}/report/summary")
        );
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn fetch_parses_successful_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("/v1/tokens/{MINT}/report/summary"));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"score":900,"tokenMeta":{"name":"Bonk","symbol":"BONK"}}"#);
        });

        let client = RugCheckClient::new(&settings(server.base_url(), 0)).unwrap();
        let summary = client.fetch_summary(&mint()).await.unwrap().unwrap();
        assert_eq!(summary.score, Some(900.0));
        assert_eq!(
            summary.token_meta.unwrap().symbol.as_deref(),
            Some("BONK")
        );
        mock.assert();
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn not_found_yields_no_report_without_retry() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(404);
        });

        let client = RugCheckClient::new(&settings(server.base_url(), 3)).unwrap();
        assert!(client.fetch_summary(&mint()).await.unwrap().is_none());
        mock.assert_hits(1);
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn retries_on_server_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(503);
        });

        let client = RugCheckClient::new(&settings(server.base_url(), 1)).unwrap();
        assert!(client.fetch_summary(&mint()).await.unwrap().is_none());
        mock.assert_hits(2);
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("<html>oops</html>");
        });

        let client = RugCheckClient::new(&settings(server.base_url(), 0)).unwrap();
        let err = client.fetch_summary(&mint()).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse RugCheck response"));
    }
}
