use std::{path::PathBuf, sync::Arc};

use insta::assert_snapshot;
use lpscan_core::{
    render_report, FixtureSource, HolderKind, LaunchPlatform, OutputFormat, RiskFlag, RiskLevel,
    TokenReport, TokenScanner,
};

const MOODENG: &str = "ED5nyyWEzpPPiWimP8vYm7sD7TD3LAt3Q3gRTWHzPJBY";

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

async fn scan_fixture(name: &str) -> TokenReport {
    let source = Arc::new(FixtureSource::new(fixture_dir().join(name)));
    TokenScanner::new(source)
        .strict(true)
        .scan(MOODENG)
        .await
        .unwrap_or_else(|err| panic!("scan failed for fixture {name}: {err:#}"))
}

#[tokio::test(flavor = "current_thread")]
async fn pump_fun_launch_snapshot() {
    let report = scan_fixture("pump_fun_launch.json").await;
    let rendered = render_report(&report, OutputFormat::Json).unwrap();
    assert_snapshot!("pump_fun_launch", rendered);
}

#[tokio::test(flavor = "current_thread")]
async fn direct_deploy_falls_back_to_authority_flags() {
    let report = scan_fixture("direct_deploy.json").await;
    assert_eq!(report.token_name, "ED5nyy...");
    assert_eq!(report.token_symbol, "???");
    assert_eq!(report.risk_level, RiskLevel::Danger);
    assert_eq!(report.verdict, "High risk signals");
    assert_eq!(report.launch_platform, LaunchPlatform::DIRECT_DEPLOY);
    assert_eq!(report.total_markets, 1);
    assert_eq!(report.concentration, None);
    assert_eq!(
        report.risks,
        vec![
            RiskFlag::new("Mint authority: Enabled", false),
            RiskFlag::new("Freeze authority: Disabled", true),
            RiskFlag::new("Top 10 concentration check", true),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn clean_token_with_multiple_markets() {
    let report = scan_fixture("clean_orca.json").await;
    assert_eq!(report.risk_level, RiskLevel::Good);
    assert_eq!(report.rug_score, Some(910.0));
    assert_eq!(report.launch_platform, LaunchPlatform::ORCA);
    assert_eq!(report.total_liquidity_usd, Some(5_250_000.5));
    assert_eq!(report.supply.as_deref(), Some("99999712"));
    assert_eq!(report.risks, vec![RiskFlag::new("Mutable metadata", true)]);
    assert_eq!(report.top_holders[0].kind, HolderKind::Amm);
    assert_eq!(report.top_holders[1].kind, HolderKind::Wallet);
    assert_eq!(report.wallet_concentration, Some(8.25));

    let human = render_report(&report, OutputFormat::Human).unwrap();
    assert!(human.contains("2 markets detected"));
    assert!(human.contains("$5.25M"));
    assert!(human.contains("910/1000"));
}
