use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const MOODENG: &str = "ED5nyyWEzpPPiWimP8vYm7sD7TD3LAt3Q3gRTWHzPJBY";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../lpscan-core/tests/fixtures")
        .join(name)
}

fn lpscan() -> Command {
    let mut cmd = Command::cargo_bin("lpscan-cli").unwrap();
    for key in [
        "LPSCAN_ENDPOINT",
        "LPSCAN_TIMEOUT_SECS",
        "LPSCAN_MAX_RETRIES",
        "LPSCAN_STRICT",
        "LPSCAN_GOOD_SCORE",
        "LPSCAN_WARN_SCORE",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn scan_renders_human_report() {
    let path = fixture("pump_fun_launch.json");
    lpscan()
        .args(["scan", MOODENG, "--fixture", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moo Deng"))
        .stdout(predicate::str::contains("$MOODENG"))
        .stdout(predicate::str::contains("Medium Risk"))
        .stdout(predicate::str::contains("Pump.fun"))
        .stdout(predicate::str::contains("Top Holder Distribution"))
        .stderr(predicate::str::contains("[00] Connecting to Solana network..."))
        .stderr(predicate::str::contains("[07] ✓ Scan complete."));
}

#[test]
fn scan_emits_json() {
    let path = fixture("pump_fun_launch.json");
    let output = lpscan()
        .args(["scan", MOODENG, "--json", "--quiet"])
        .args(["--fixture", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["risk_level"], "warn");
    assert_eq!(value["launch_platform"]["name"], "Pump.fun");
    assert_eq!(value["top_holders"].as_array().unwrap().len(), 3);
}

#[test]
fn rejects_short_address() {
    lpscan()
        .args(["scan", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Enter a valid Solana contract address",
        ));
}

#[test]
fn links_lists_explorers() {
    lpscan()
        .args(["links", MOODENG])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "https://rugcheck.xyz/tokens/{MOODENG}"
        )))
        .stdout(predicate::str::contains(format!(
            "https://birdeye.so/token/{MOODENG}"
        )))
        .stdout(predicate::str::contains(format!(
            "https://solscan.io/token/{MOODENG}"
        )));
}

#[test]
fn config_file_thresholds_change_bucketing() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::fs::write(file.path(), "[thresholds]\ngood = 500.0\nwarn = 200.0\n").unwrap();
    let path = fixture("pump_fun_launch.json");

    lpscan()
        .args(["--config", file.path().to_str().unwrap()])
        .args(["scan", MOODENG, "--quiet", "--fixture", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"))
        .stdout(predicate::str::contains("Looks clean"));
}

#[test]
fn environment_thresholds_override_config_file() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::fs::write(file.path(), "max_retries = 1\n").unwrap();
    let path = fixture("pump_fun_launch.json");

    lpscan()
        .env("LPSCAN_GOOD_SCORE", "500")
        .args(["--config", file.path().to_str().unwrap()])
        .args(["scan", MOODENG, "--quiet", "--fixture", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"));
}

#[test]
fn missing_fixture_degrades_to_unknown_report() {
    lpscan()
        .args(["scan", MOODENG, "--quiet", "--fixture", "/nonexistent/lpscan.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown"))
        .stdout(predicate::str::contains("Could not score"));
}

#[test]
fn strict_mode_fails_on_missing_fixture() {
    lpscan()
        .args(["scan", MOODENG, "--strict", "--quiet"])
        .args(["--fixture", "/nonexistent/lpscan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read fixture"));
}

#[test]
#[ignore = "requires loopback networking"]
fn unreachable_api_renders_unscored_report() {
    lpscan()
        .args(["--endpoint", "http://127.0.0.1:9", "--timeout", "1s", "--max-retries", "0"])
        .args(["scan", MOODENG, "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));
}
