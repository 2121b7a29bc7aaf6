//! Number and text formatting shared by the renderers.

use crate::address::head;

/// Holder percentage with two decimals, e.g. `12.35%`.
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Concentration percentage with one decimal, e.g. `48.2%`.
pub fn format_pct_short(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Compact USD amount: `$1.23B`, `$4.56M`, `$7.89K`, `$12.34`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "$0.00".to_string();
    }
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// RugCheck score on its 1000-point scale.
pub fn format_score(score: f64) -> String {
    format!("{score}/1000")
}

/// Filled cells for a holder bar; the bar saturates at 50% of supply.
pub fn bar_width(pct: f64, width: usize) -> usize {
    if !pct.is_finite() || pct <= 0.0 {
        return 0;
    }
    let fill = (pct * 2.0).min(100.0) / 100.0;
    ((fill * width as f64).round() as usize).min(width)
}

pub fn plural_markets(count: usize) -> String {
    if count == 1 {
        "1 market".to_string()
    } else {
        format!("{count} markets")
    }
}

/// First `n` characters followed by `...`; shorter text is returned as is.
pub fn truncate_address(address: &str, n: usize) -> String {
    let shown = head(address, n);
    if shown.len() == address.len() {
        return address.to_string();
    }
    format!("{shown}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn usd_suffixes() {
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(7_890.0), "$7.89K");
        assert_eq!(format_usd(4_560_000.0), "$4.56M");
        assert_eq!(format_usd(1_230_000_000.0), "$1.23B");
    }

    #[test]
    fn usd_handles_degenerate_values() {
        assert_eq!(format_usd(-5.0), "$0.00");
        assert_eq!(format_usd(f64::NAN), "$0.00");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn percentages_and_scores() {
        assert_eq!(format_pct(3.456), "3.46%");
        assert_eq!(format_pct_short(48.27), "48.3%");
        assert_eq!(format_score(501.0), "501/1000");
    }

    #[test]
    fn bar_width_doubles_and_saturates() {
        assert_eq!(bar_width(25.0, 20), 10);
        assert_eq!(bar_width(50.0, 20), 20);
        assert_eq!(bar_width(80.0, 20), 20);
        assert_eq!(bar_width(0.0, 20), 0);
    }

    #[test]
    fn market_pluralization() {
        assert_eq!(plural_markets(0), "0 markets");
        assert_eq!(plural_markets(1), "1 market");
        assert_eq!(plural_markets(3), "3 markets");
    }

    #[test]
    fn truncates_addresses() {
        assert_eq!(
            truncate_address("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1", 8),
            "5Q544fKr..."
        );
        assert_eq!(truncate_address("unknown", 8), "unknown");
        assert_eq!(truncate_address("PoolAcct", 8), "PoolAcct");
    }

    proptest! {
        #[test]
        fn bar_width_never_exceeds_width(pct in -100.0f64..1000.0, width in 0usize..200) {
            prop_assert!(bar_width(pct, width) <= width);
        }

        #[test]
        fn usd_always_has_dollar_prefix(value in proptest::num::f64::ANY) {
            prop_assert!(format_usd(value).starts_with('$'));
        }
    }
}
