//! Tabscore: Batch Scoring CLI Tool
//!
//! A command-line tool for scoring tabular datasets with fitted
//! preprocessing artifacts and a pretrained model.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use cli::{Cli, Commands};
use pipeline::{check_drift, dataset_stats, load_dataset, score_batch, Artifacts, CsvOptions, ModelKind};
use report::ScoringSummary;
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_failure, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Drift {
                input,
                artifacts,
                export,
                tolerance,
                separator,
                decimal_comma,
                infer_schema_length,
            } => {
                let csv = CsvOptions {
                    separator: *separator as u8,
                    decimal_comma: *decimal_comma,
                    infer_schema_length: *infer_schema_length,
                };
                cli::drift::run_drift(input, artifacts, export.as_deref(), *tolerance, &csv)
            }
        };
    }

    // Main scoring pipeline - require input and artifacts
    let input = cli.input.clone().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let artifact_dir = cli.artifacts.clone().ok_or_else(|| {
        anyhow::anyhow!("Artifact directory is required. Use -a/--artifacts to specify.")
    })?;

    // Derive output path from input if not provided
    let output_path = cli.output_path().unwrap();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(
        &input,
        &artifact_dir,
        &output_path,
        cli.drift_tolerance,
        cli.fail_on_drift,
    );

    // Step 1: Load artifacts. Fatal if missing or corrupt - the process must
    // not score with a broken bundle.
    print_step_header(1, "Load Artifacts");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading artifact bundle...");
    let artifacts = match Artifacts::load(&artifact_dir) {
        Ok(artifacts) => artifacts,
        Err(err) => {
            finish_with_warning(&spinner, "Artifact bundle rejected");
            return Err(err).context("refusing to score without valid artifacts");
        }
    };
    finish_with_success(&spinner, "Artifact bundle loaded");
    print_info(&format!(
        "{} feature columns, {} field rules",
        artifacts.schema().len(),
        artifacts.pipeline.rules.len()
    ));
    print_step_time(step_start.elapsed());

    let mut summary = ScoringSummary::new(artifacts.schema().len());

    // Step 2: Load dataset
    print_step_header(2, "Load Dataset");

    let step_start = Instant::now();
    let df = load_dataset(&input, &cli.csv_options())?;
    let (rows, cols, memory_mb) = dataset_stats(&df);
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Step 3: Drift checks. A drifted statistic means the incoming data no
    // longer looks like the training data; predictions still use the stored
    // parameters, but the operator gets told.
    print_step_header(3, "Drift Check");

    let step_start = Instant::now();
    if cli.no_drift_check {
        print_info("Drift checks skipped (--no-drift-check)");
    } else {
        let checks = check_drift(&df, &artifacts, cli.drift_tolerance)?;
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
                summary.add_drift_warning(line);
            } else {
                print_success(&line);
            }
        }
        if cli.fail_on_drift && checks.iter().any(|c| c.drifted) {
            anyhow::bail!("Drift detected and --fail-on-drift is set; no predictions written");
        }
    }
    let drift_elapsed = step_start.elapsed();
    summary.set_drift_time(drift_elapsed);
    print_step_time(drift_elapsed);

    // Step 4: Score and save. All-or-nothing: a failure anywhere in the
    // batch discards the whole run, logs the cause, and reports a generic
    // failure status.
    print_step_header(4, "Score & Save");

    let step_start = Instant::now();
    let spinner = create_spinner("Scoring dataset...");
    match score_batch(&df, &artifacts, &output_path) {
        Ok(outcome) => {
            finish_with_success(
                &spinner,
                &format!(
                    "Saved {} scored rows to {}",
                    outcome.rows,
                    outcome.output.display()
                ),
            );
            summary.set_rows_scored(outcome.rows);
            summary.set_predictions(
                &outcome.predictions,
                artifacts.model.kind == ModelKind::Classifier,
            );
            if let (Some(stay), Some(leave)) = (
                artifacts.model.label(0.0),
                artifacts.model.label(1.0),
            ) {
                let positives = outcome.predictions.iter().filter(|p| **p >= 1.0).count();
                print_info(&format!(
                    "{}: {} | {}: {}",
                    leave,
                    positives,
                    stay,
                    outcome.rows - positives
                ));
            }
        }
        Err(err) => {
            finish_with_warning(&spinner, "Batch scoring failed");
            print_failure(&err);
            anyhow::bail!("Batch scoring failed; no output written");
        }
    }
    let score_elapsed = step_start.elapsed();
    summary.set_score_time(score_elapsed);
    print_step_time(score_elapsed);

    // Display summary
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}
