// =============================================================================
// market-pulse — Runner
// =============================================================================
//
// Reads one JSON analysis request from the file named by the first argument
// (or stdin when absent), scores it and prints the JSON report on stdout.
// Logs go to stderr.
//
// Environment:
//   PULSE_CONFIG     config file path (default: pulse_config.json)
//   PULSE_MODEL_DIR  overrides the trained-model directory
//   RUST_LOG         tracing filter (default: info)
// =============================================================================

use std::io::Read;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use market_pulse::report::{AnalysisRequest, ReportBuilder};
use market_pulse::AnalyticsConfig;

const DEFAULT_CONFIG_PATH: &str = "pulse_config.json";

fn main() -> Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("PULSE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = AnalyticsConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalyticsConfig::default()
    });

    if let Ok(dir) = std::env::var("PULSE_MODEL_DIR") {
        config.model.dir = dir.into();
    }

    info!(
        model_dir = %config.model.dir.display(),
        model_enabled = config.model.enabled,
        risk_level = %config.fusion.risk_level,
        "market-pulse starting"
    );

    // ── 2. Read request ──────────────────────────────────────────────────
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read request from {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    let request: AnalysisRequest =
        serde_json::from_str(&raw).context("failed to parse analysis request")?;

    // ── 3. Score & report ────────────────────────────────────────────────
    let report = ReportBuilder::new(&config).analyze(&request);

    info!(
        symbol = %report.symbol,
        prediction = report.prediction.prediction,
        confidence = report.prediction.confidence,
        sentiment = %report.sentiment.label,
        action = %report.signal.action,
        "analysis complete"
    );

    let out = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{out}");

    Ok(())
}
