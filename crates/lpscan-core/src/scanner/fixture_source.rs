use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::address::TokenAddress;
use crate::rugcheck::{RawSummary, ReportSource};

/// Serves a RugCheck summary stored on disk, regardless of the requested address.
///
/// The file is read and parsed once; later calls reuse the cached payload.
pub struct FixtureSource {
    path: PathBuf,
    cache: OnceCell<RawSummary>,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    fn load(&self) -> Result<RawSummary> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read fixture at {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid RugCheck payload in {}", self.path.display()))
    }
}

#[async_trait]
impl ReportSource for FixtureSource {
    async fn fetch_summary(&self, _address: &TokenAddress) -> Result<Option<RawSummary>> {
        let summary = self.cache.get_or_try_init(|| self.load())?;
        Ok(Some(summary.clone()))
    }
}
