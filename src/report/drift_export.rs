//! Drift report export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::DriftCheck;

/// Metadata about the drift analysis run
#[derive(Serialize)]
pub struct DriftMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Tabscore version
    pub tabscore_version: String,
    /// Input file path
    pub input_file: String,
    /// Artifact bundle directory
    pub artifact_dir: String,
    /// Absolute tolerance used for comparisons
    pub tolerance: f64,
}

/// Full drift report: metadata plus every fitted-vs-observed check.
#[derive(Serialize)]
pub struct DriftReport {
    pub metadata: DriftMetadata,
    pub checks: Vec<DriftCheck>,
    /// True when any individual check is flagged.
    pub drifted: bool,
}

impl DriftReport {
    pub fn new(
        input_file: &Path,
        artifact_dir: &Path,
        tolerance: f64,
        checks: Vec<DriftCheck>,
    ) -> Self {
        let drifted = checks.iter().any(|c| c.drifted);
        Self {
            metadata: DriftMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tabscore_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.display().to_string(),
                artifact_dir: artifact_dir.display().to_string(),
                tolerance,
            },
            checks,
            drifted,
        }
    }
}

/// Write the drift report as pretty-printed JSON.
pub fn export_drift_report(report: &DriftReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing drift report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write drift report: {}", path.display()))?;
    Ok(())
}
