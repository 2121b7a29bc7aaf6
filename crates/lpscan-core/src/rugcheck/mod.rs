mod client;
mod settings;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::address::TokenAddress;

pub use client::RugCheckClient;
pub use settings::ScanSettings;

/// Source of raw RugCheck report summaries (live API, fixture file, in-memory).
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the summary for `address`.
    ///
    /// `Ok(None)` means the source answered but holds no report for the token.
    async fn fetch_summary(&self, address: &TokenAddress) -> Result<Option<RawSummary>>;
}

/// Report summary as returned by `GET /v1/tokens/{mint}/report/summary`.
///
/// Every field is optional; the API omits whatever it could not compute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSummary {
    pub score: Option<f64>,
    pub token_meta: Option<RawTokenMeta>,
    #[serde(deserialize_with = "null_as_default")]
    pub risks: Vec<RawRisk>,
    pub mint_authority: Option<Value>,
    pub freeze_authority: Option<Value>,
    pub markets: Option<Vec<RawMarket>>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_holders: Vec<RawHolder>,
    pub creator: Option<Value>,
    pub file_meta: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub known_accounts: HashMap<String, RawKnownAccount>,
    pub total_market_liquidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTokenMeta {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub supply: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRisk {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `none`, `info`, `warn` or `danger`.
    pub level: Option<String>,
    pub score: Option<f64>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMarket {
    pub pubkey: Option<String>,
    pub market_type: Option<String>,
    pub lp: Option<RawLiquidity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLiquidity {
    #[serde(rename = "lpLockedPct")]
    pub lp_locked_pct: Option<f64>,
    #[serde(rename = "lpLockedUSD")]
    pub lp_locked_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawHolder {
    pub pct: Option<f64>,
    pub owner: Option<String>,
    pub address: Option<String>,
    pub insider: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKnownAccount {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Accept an explicit `null` wherever a missing field would fall back to its default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Loose truthiness over arbitrary JSON: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Treat empty strings as missing, mirroring how the API fills unknown text fields.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
