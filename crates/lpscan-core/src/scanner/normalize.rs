use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde_json::Value;

use super::{
    ExternalLink, HolderKind, HolderRow, LaunchPlatform, MarketRow, RiskFlag, RiskLevel,
    RiskThresholds, TokenReport,
};
use crate::address::TokenAddress;
use crate::rugcheck::{is_truthy, non_empty, RawHolder, RawMarket, RawSummary};

const TOP_HOLDER_LIMIT: usize = 10;
const UNKNOWN_SYMBOL: &str = "???";

/// Market-type keywords in priority order; the first hit in this list wins for a market.
const PLATFORM_KEYWORDS: &[(&str, LaunchPlatform)] = &[
    ("pump", LaunchPlatform::PUMP_FUN),
    ("raydium", LaunchPlatform::RAYDIUM),
    ("meteora", LaunchPlatform::METEORA),
    ("orca", LaunchPlatform::ORCA),
];

static PLATFORM_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(PLATFORM_KEYWORDS.iter().map(|(keyword, _)| *keyword))
        .expect("platform keywords form a valid automaton")
});

/// Map a RugCheck summary (or its absence) into the fixed display model.
pub fn normalize_report(
    address: &TokenAddress,
    raw: Option<&RawSummary>,
    thresholds: &RiskThresholds,
) -> TokenReport {
    let Some(raw) = raw else {
        return unscored_report(address);
    };

    let meta = raw.token_meta.as_ref();
    let token_name = meta
        .and_then(|m| non_empty(m.name.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| address.placeholder_name());
    let token_symbol = meta
        .and_then(|m| non_empty(m.symbol.as_deref()))
        .unwrap_or(UNKNOWN_SYMBOL)
        .to_string();

    let score = raw.score.unwrap_or(0.0);
    let risk_level = RiskLevel::from_score_with_thresholds(score, thresholds);
    let rug_score = raw.score.filter(|s| *s != 0.0);

    let markets: &[RawMarket] = raw.markets.as_deref().unwrap_or(&[]);
    let top_holders = classify_holders(raw, markets);
    let concentration = sum_percentages(top_holders.iter());
    let wallet_concentration =
        sum_percentages(top_holders.iter().filter(|h| h.kind == HolderKind::Wallet));

    let launch_platform = detect_platform(markets).unwrap_or(if is_truthy(raw.creator.as_ref()) {
        LaunchPlatform::DIRECT_DEPLOY
    } else {
        LaunchPlatform::UNKNOWN
    });

    let market_rows: Vec<MarketRow> = markets.iter().map(market_row).collect();
    let total_liquidity_usd = raw.total_market_liquidity.or_else(|| {
        let locked: Vec<f64> = market_rows.iter().filter_map(|m| m.lp_locked_usd).collect();
        (!locked.is_empty()).then(|| locked.iter().sum())
    });

    TokenReport {
        address: address.to_string(),
        short_address: address.short(),
        token_name,
        token_symbol,
        rug_score,
        risk_level,
        verdict: verdict(rug_score, thresholds).to_string(),
        risks: risk_flags(raw),
        top_holders,
        concentration,
        wallet_concentration,
        launch_platform,
        total_markets: markets.len(),
        markets: market_rows,
        total_liquidity_usd,
        supply: meta.and_then(|m| m.supply.as_ref()).and_then(scalar_to_string),
        file_meta: raw.file_meta.clone(),
        links: external_links(address),
    }
}

fn unscored_report(address: &TokenAddress) -> TokenReport {
    TokenReport {
        address: address.to_string(),
        short_address: address.short(),
        token_name: address.placeholder_name(),
        token_symbol: UNKNOWN_SYMBOL.to_string(),
        rug_score: None,
        risk_level: RiskLevel::Unknown,
        verdict: verdict(None, &RiskThresholds::default()).to_string(),
        risks: Vec::new(),
        top_holders: Vec::new(),
        concentration: None,
        wallet_concentration: None,
        launch_platform: LaunchPlatform::UNKNOWN,
        total_markets: 0,
        markets: Vec::new(),
        total_liquidity_usd: None,
        supply: None,
        file_meta: None,
        links: external_links(address),
    }
}

fn verdict(rug_score: Option<f64>, thresholds: &RiskThresholds) -> &'static str {
    match rug_score {
        None => "Could not score",
        Some(s) if s >= thresholds.good => "Looks clean",
        Some(s) if s >= thresholds.warn => "Proceed with caution",
        Some(_) => "High risk signals",
    }
}

fn risk_flags(raw: &RawSummary) -> Vec<RiskFlag> {
    if raw.risks.is_empty() {
        let mint = is_truthy(raw.mint_authority.as_ref());
        let freeze = is_truthy(raw.freeze_authority.as_ref());
        return vec![
            RiskFlag::new(format!("Mint authority: {}", enabled(mint)), !mint),
            RiskFlag::new(format!("Freeze authority: {}", enabled(freeze)), !freeze),
            RiskFlag::new("Top 10 concentration check", true),
        ];
    }

    raw.risks
        .iter()
        .map(|risk| {
            let label = non_empty(risk.name.as_deref())
                .or_else(|| non_empty(risk.description.as_deref()))
                .unwrap_or("Unknown risk");
            let safe = matches!(risk.level.as_deref(), Some("none") | Some("info"));
            RiskFlag::new(label, safe)
        })
        .collect()
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn classify_holders(raw: &RawSummary, markets: &[RawMarket]) -> Vec<HolderRow> {
    let pool_accounts: HashSet<&str> = markets
        .iter()
        .filter_map(|m| non_empty(m.pubkey.as_deref()))
        .collect();

    raw.top_holders
        .iter()
        .take(TOP_HOLDER_LIMIT)
        .enumerate()
        .map(|(idx, holder)| {
            let address = holder_address(holder);
            let known = raw.known_accounts.get(address);
            let is_amm = known
                .and_then(|k| k.kind.as_deref())
                .map(|kind| kind.eq_ignore_ascii_case("amm"))
                .unwrap_or(false)
                || pool_accounts.contains(address);
            HolderRow {
                rank: idx + 1,
                percentage: holder.pct.unwrap_or(0.0),
                address: address.to_string(),
                kind: if is_amm {
                    HolderKind::Amm
                } else {
                    HolderKind::Wallet
                },
                label: known
                    .and_then(|k| non_empty(k.name.as_deref()))
                    .map(str::to_string),
                insider: holder.insider.unwrap_or(false),
            }
        })
        .collect()
}

fn holder_address(holder: &RawHolder) -> &str {
    non_empty(holder.owner.as_deref())
        .or_else(|| non_empty(holder.address.as_deref()))
        .unwrap_or("unknown")
}

fn sum_percentages<'a>(holders: impl Iterator<Item = &'a HolderRow>) -> Option<f64> {
    holders.fold(None, |acc, h| Some(acc.unwrap_or(0.0) + h.percentage))
}

/// Platform for a single market type, e.g. `pump_fun_amm` -> Pump.fun.
pub fn platform_for_market_type(market_type: &str) -> Option<LaunchPlatform> {
    let lowered = market_type.to_lowercase();
    PLATFORM_MATCHER
        .find_overlapping_iter(&lowered)
        .map(|mat| mat.pattern().as_usize())
        .min()
        .map(|idx| PLATFORM_KEYWORDS[idx].1)
}

/// Later markets override earlier ones.
fn detect_platform(markets: &[RawMarket]) -> Option<LaunchPlatform> {
    markets
        .iter()
        .filter_map(|m| non_empty(m.market_type.as_deref()))
        .filter_map(platform_for_market_type)
        .last()
}

fn market_row(market: &RawMarket) -> MarketRow {
    let market_type = non_empty(market.market_type.as_deref()).unwrap_or("unknown");
    MarketRow {
        market_type: market_type.to_string(),
        pubkey: market.pubkey.clone().filter(|p| !p.is_empty()),
        platform: platform_for_market_type(market_type).map(|p| p.name.to_string()),
        lp_locked_pct: market.lp.as_ref().and_then(|lp| lp.lp_locked_pct),
        lp_locked_usd: market.lp.as_ref().and_then(|lp| lp.lp_locked_usd),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

pub fn external_links(address: &TokenAddress) -> Vec<ExternalLink> {
    [
        ("RugCheck", format!("https://rugcheck.xyz/tokens/{address}")),
        ("Birdeye", format!("https://birdeye.so/token/{address}")),
        ("Solscan", format!("https://solscan.io/token/{address}")),
    ]
    .into_iter()
    .map(|(label, url)| ExternalLink {
        label: label.to_string(),
        url,
    })
    .collect()
}
