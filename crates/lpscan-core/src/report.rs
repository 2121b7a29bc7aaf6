use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::format::{
    bar_width, format_pct, format_pct_short, format_score, format_usd, plural_markets,
    truncate_address,
};
use crate::scanner::{HolderKind, TokenReport};

const BAR_CELLS: usize = 24;

/// Format styles supported by the report renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Produce a report string from a `TokenReport` using the desired format.
pub fn render_report(report: &TokenReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_human(report),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_human(report: &TokenReport) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", report.token_name.bold())?;
    writeln!(out, "${}", report.token_symbol)?;
    writeln!(
        out,
        "{} • {} detected",
        report.short_address,
        plural_markets(report.total_markets)
    )?;
    writeln!(out)?;

    let score = report
        .rug_score
        .map(format_score)
        .unwrap_or_else(|| "N/A".to_string());
    writeln!(
        out,
        "Rug Score: {} ({})",
        hex(&score, report.risk_level.color()),
        report.verdict
    )?;
    writeln!(
        out,
        "Launch Platform: {} {} (detected via market analysis)",
        report.launch_platform.icon,
        hex(report.launch_platform.name, report.launch_platform.color)
    )?;
    match report.concentration {
        Some(total) => {
            write!(
                out,
                "Top 10 Concentration: {} across {} holders",
                format_pct_short(total),
                report.top_holders.len()
            )?;
            if let Some(wallets) = report.wallet_concentration {
                write!(out, " ({} in wallets)", format_pct_short(wallets))?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "Top 10 Concentration: N/A (no holder data)")?,
    }
    write!(out, "Markets: {}", report.total_markets)?;
    if let Some(liquidity) = report.total_liquidity_usd {
        write!(out, " • liquidity {}", format_usd(liquidity))?;
    }
    writeln!(out)?;
    if let Some(supply) = &report.supply {
        writeln!(out, "Supply: {supply}")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{} {}",
        report.risk_level.icon(),
        hex(report.risk_level.label(), report.risk_level.color()).bold()
    )?;
    for flag in &report.risks {
        let mark = if flag.safe {
            "✓".green()
        } else {
            "✗".red()
        };
        writeln!(out, "  {mark} {}", flag.label)?;
    }

    if !report.top_holders.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top Holder Distribution:")?;
        for holder in &report.top_holders {
            let filled = bar_width(holder.percentage, BAR_CELLS);
            let bar = format!(
                "{}{}",
                "█".repeat(filled),
                "░".repeat(BAR_CELLS - filled)
            );
            let mut tags = Vec::new();
            if holder.kind == HolderKind::Amm {
                tags.push("AMM".to_string());
            }
            if holder.insider {
                tags.push("insider".to_string());
            }
            if let Some(label) = &holder.label {
                tags.push(label.clone());
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            writeln!(
                out,
                "  {rank:>3} {bar} {pct:>7} {addr}{tags}",
                rank = format!("#{}", holder.rank),
                bar = bar.green(),
                pct = format_pct(holder.percentage),
                addr = truncate_address(&holder.address, 8),
                tags = tags,
            )?;
        }
    }

    if !report.markets.is_empty() {
        writeln!(out)?;
        writeln!(out, "Markets:")?;
        for market in &report.markets {
            write!(out, "  - {}", market.market_type)?;
            if let Some(platform) = &market.platform {
                write!(out, " ({platform})")?;
            }
            if let Some(pubkey) = &market.pubkey {
                write!(out, " {}", truncate_address(pubkey, 8))?;
            }
            if let Some(pct) = market.lp_locked_pct {
                write!(out, " • LP locked {}", format_pct(pct))?;
            }
            if let Some(usd) = market.lp_locked_usd {
                write!(out, " • {}", format_usd(usd))?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out)?;
    for link in &report.links {
        writeln!(out, "{} ↗ {}", link.label, link.url.dimmed())?;
    }

    Ok(out)
}

fn hex(text: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel =
        |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
