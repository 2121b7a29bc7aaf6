use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod fixture_source;
pub mod normalize;
pub mod token_scanner;

/// Score cut-offs (RugCheck scale, 0–1000, higher is safer) for the risk buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub good: f64,
    pub warn: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            good: 800.0,
            warn: 400.0,
        }
    }
}

/// Qualitative risk bucket shown on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Good,
    Warn,
    Danger,
    Unknown,
}

impl RiskLevel {
    /// Bucket a score using the default thresholds.
    pub fn from_score(score: f64) -> Self {
        Self::from_score_with_thresholds(score, &RiskThresholds::default())
    }

    pub fn from_score_with_thresholds(score: f64, thresholds: &RiskThresholds) -> Self {
        if score >= thresholds.good {
            Self::Good
        } else if score >= thresholds.warn {
            Self::Warn
        } else {
            Self::Danger
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Low Risk",
            Self::Warn => "Medium Risk",
            Self::Danger => "High Risk",
            Self::Unknown => "Unknown",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Good => "🟢",
            Self::Warn => "🟡",
            Self::Danger => "🔴",
            Self::Unknown => "⚪",
        }
    }

    /// Hex color used by the human renderer.
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#00e599",
            Self::Warn => "#E8A317",
            Self::Danger => "#ff4757",
            Self::Unknown => "#888888",
        }
    }
}

/// A single line on the risk badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub label: String,
    pub safe: bool,
}

impl RiskFlag {
    pub fn new(label: impl Into<String>, safe: bool) -> Self {
        Self {
            label: label.into(),
            safe,
        }
    }
}

/// Whether a holder account is a liquidity pool or an ordinary wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolderKind {
    Amm,
    Wallet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderRow {
    /// 1-based position in the top-holder list.
    pub rank: usize,
    pub percentage: f64,
    pub address: String,
    pub kind: HolderKind,
    pub label: Option<String>,
    pub insider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    pub market_type: String,
    pub pubkey: Option<String>,
    pub platform: Option<String>,
    pub lp_locked_pct: Option<f64>,
    pub lp_locked_usd: Option<f64>,
}

/// Where the token was launched, as inferred from its markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaunchPlatform {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl LaunchPlatform {
    pub const PUMP_FUN: Self = Self {
        name: "Pump.fun",
        color: "#00e599",
        icon: "🚀",
    };
    pub const RAYDIUM: Self = Self {
        name: "Raydium",
        color: "#5865F2",
        icon: "⚡",
    };
    pub const METEORA: Self = Self {
        name: "Meteora",
        color: "#E8A317",
        icon: "☄️",
    };
    pub const ORCA: Self = Self {
        name: "Orca",
        color: "#FFD700",
        icon: "🌊",
    };
    pub const DIRECT_DEPLOY: Self = Self {
        name: "Direct Deploy",
        color: "#888888",
        icon: "📦",
    };
    pub const UNKNOWN: Self = Self {
        name: "Unknown",
        color: "#888888",
        icon: "❓",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

/// Fixed display model produced from a RugCheck summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenReport {
    pub address: String,
    pub short_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub rug_score: Option<f64>,
    pub risk_level: RiskLevel,
    pub verdict: String,
    pub risks: Vec<RiskFlag>,
    pub top_holders: Vec<HolderRow>,
    /// Sum of top-holder percentages, AMM accounts included.
    pub concentration: Option<f64>,
    /// Same sum restricted to wallet holders.
    pub wallet_concentration: Option<f64>,
    pub launch_platform: LaunchPlatform,
    pub total_markets: usize,
    pub markets: Vec<MarketRow>,
    pub total_liquidity_usd: Option<f64>,
    pub supply: Option<String>,
    pub file_meta: Option<Value>,
    pub links: Vec<ExternalLink>,
}

/// Progress steps reported while a scan runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStage {
    Connecting,
    Scanning { label: String },
    Fetching,
    Holders,
    Platform,
    Fees,
    Compiling,
    Complete,
}

impl ScanStage {
    pub fn message(&self) -> String {
        match self {
            Self::Connecting => "Connecting to Solana network...".into(),
            Self::Scanning { label } => format!("Scanning token: {label}"),
            Self::Fetching => "Fetching rug analysis from RugCheck...".into(),
            Self::Holders => "Analyzing holder distribution...".into(),
            Self::Platform => "Checking launch platform...".into(),
            Self::Fees => "Calculating fee metrics...".into(),
            Self::Compiling => "Compiling report...".into(),
            Self::Complete => "✓ Scan complete.".into(),
        }
    }
}
