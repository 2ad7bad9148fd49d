//! Composed prediction operations: transform + model.
//!
//! Single-record prediction propagates pipeline errors directly so a caller
//! (an HTTP dispatcher, the CLI) can map them to status codes. Batch scoring
//! is all-or-nothing: any failure discards the whole batch and no partial
//! output file is produced.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::artifacts::Artifacts;
use super::error::PipelineError;
use super::loader::frame_to_records;
use super::record::RawRecord;
use super::transform::{transform, transform_one};

/// Column name predictions are appended under.
pub const PREDICTION_COLUMN: &str = "prediction";

/// Outcome of a completed batch scoring run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub rows: usize,
    pub output: PathBuf,
    pub predictions: Vec<f64>,
}

/// Predict one value per raw record.
pub fn predict_records(
    records: &[RawRecord],
    artifacts: &Artifacts,
) -> Result<Vec<f64>, PipelineError> {
    let features = transform(records, artifacts)?;
    Ok(features
        .iter()
        .map(|fv| artifacts.model.predict(fv))
        .collect())
}

/// Predict a single record.
pub fn predict_one(record: &RawRecord, artifacts: &Artifacts) -> Result<f64, PipelineError> {
    let features = transform_one(record, artifacts)?;
    Ok(artifacts.model.predict(&features))
}

/// Score every row of a dataset and write the augmented result.
///
/// The output keeps all original columns and gains one prediction column,
/// one row per input row. An existing file at `output` is overwritten.
pub fn score_batch(df: &DataFrame, artifacts: &Artifacts, output: &Path) -> Result<BatchOutcome> {
    let records = frame_to_records(df)?;
    let predictions = predict_records(&records, artifacts)
        .context("transforming batch for prediction")?;

    let mut scored = df.clone();
    scored
        .with_column(Series::new(PREDICTION_COLUMN.into(), predictions.clone()))
        .context("appending prediction column")?;

    save_dataset(&mut scored, output)?;

    Ok(BatchOutcome {
        rows: scored.height(),
        output: output.to_path_buf(),
        predictions,
    })
}

/// Save dataset to file (CSV or Parquet based on extension).
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
