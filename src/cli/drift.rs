//! Drift subcommand - compare fitted statistics against a new dataset

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::{check_drift, load_dataset, Artifacts, CsvOptions};
use crate::report::{export_drift_report, DriftReport};
use crate::utils::{create_spinner, finish_with_success, print_info, print_success, print_warning};

/// Run the drift report: load artifacts and data, compare fitted statistics
/// to the new data, optionally export the result as JSON.
pub fn run_drift(
    input: &Path,
    artifact_dir: &Path,
    export: Option<&Path>,
    tolerance: f64,
    csv: &CsvOptions,
) -> Result<()> {
    let artifacts = Artifacts::load(artifact_dir)
        .context("refusing to run drift checks without valid artifacts")?;

    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(input, csv)?;
    finish_with_success(&spinner, &format!("Loaded {} rows", df.height()));

    let checks = check_drift(&df, &artifacts, tolerance)?;
    if checks.is_empty() {
        print_info("Bundle carries no fitted statistics to compare");
    }

    for check in &checks {
        let line = format!(
            "{} for '{}': trained {:.4} vs observed {:.4}",
            check.statistic, check.column, check.trained, check.observed
        );
        if check.drifted {
            print_warning(&format!("DRIFT {}", line));
        } else {
            print_success(&line);
        }
    }

    if let Some(path) = export {
        let report = DriftReport::new(input, artifact_dir, tolerance, checks);
        export_drift_report(&report, path)?;
        print_success(&format!("Drift report written to {}", path.display()));
    }

    Ok(())
}
