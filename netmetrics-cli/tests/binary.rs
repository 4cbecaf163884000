//! End-to-end runs of the `netmetrics` binary in a fresh process, so global
//! logging is installed exactly as in production.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const RING_CONFIG: &str = r#"{
    "Network": {
        "LoadNetwork": false,
        "NetworkType": 2,
        "ErdosRenyiProbability": 0.1,
        "NodesCount": 6,
        "RingGraphDegree": 2,
        "RewiringProbability": 0.1
    }
}"#;

fn run_binary(dir: &Path, log_format: Option<&str>) -> Result<Output, Box<dyn std::error::Error>> {
    let config = dir.join("Config.json");
    fs::write(&config, RING_CONFIG)?;
    let mut command = Command::new(env!("CARGO_BIN_EXE_netmetrics"));
    command
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(dir)
        .args(["--seed", "1", "--no-plot"])
        .env_remove("RUST_LOG")
        .env_remove("NETMETRICS_LOG_FORMAT");
    if let Some(format) = log_format {
        command.env("NETMETRICS_LOG_FORMAT", format);
    }
    Ok(command.output()?)
}

#[rstest]
#[case::human(None)]
#[case::json(Some("json"))]
fn run_succeeds_with_logging_installed(#[case] log_format: Option<&str>) -> TestResult {
    let dir = TempDir::new()?;
    let output = run_binary(dir.path(), log_format)?;
    let stderr = String::from_utf8(output.stderr)?;
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(!stderr.contains("failed to initialize logging"), "{stderr}");

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("Number of nodes"), "{stdout}");
    assert!(stdout.contains("runtime of application: "), "{stdout}");
    assert!(dir.path().join("Network.csv").is_file());
    assert!(dir.path().join("NetworkMetrics.csv").is_file());
    Ok(())
}

#[rstest]
fn json_diagnostics_are_one_object_per_line() -> TestResult {
    let dir = TempDir::new()?;
    let output = run_binary(dir.path(), Some("json"))?;
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    let lines: Vec<_> = stderr.lines().filter(|line| !line.trim().is_empty()).collect();
    assert!(!lines.is_empty());
    for line in lines {
        serde_json::from_str::<serde_json::Value>(line)?;
    }
    Ok(())
}

#[rstest]
fn unsupported_log_format_fails_before_running() -> TestResult {
    let dir = TempDir::new()?;
    let output = run_binary(dir.path(), Some("xml"))?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("unsupported log format"));
    assert!(!dir.path().join("Network.csv").exists());
    Ok(())
}
