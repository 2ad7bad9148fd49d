//! Dataset loader for CSV and Parquet files.
//!
//! Delimiter and decimal-separator conventions are the loader's concern, not
//! the pipeline's: some source files use `;` with decimal commas, so both
//! are configurable.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::record::{RawRecord, RawValue};

/// CSV parsing conventions of the source file.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub separator: u8,
    pub decimal_comma: bool,
    pub infer_schema_length: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            decimal_comma: false,
            infer_schema_length: 10000,
        }
    }
}

/// Load a dataset from a file (CSV or Parquet based on extension).
pub fn load_dataset(path: &Path, csv: &CsvOptions) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_separator(csv.separator)
            .with_decimal_comma(csv.decimal_comma)
            .with_infer_schema_length(Some(csv.infer_schema_length))
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let mut df = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    // Series::iter requires a single chunk; multi-file/multi-batch reads can
    // produce several.
    df.rechunk_mut();
    Ok(df)
}

/// Shape and estimated memory footprint of a loaded dataset.
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

/// Bridge a DataFrame into per-row raw records for the pipeline.
///
/// Nulls become `Missing`, strings stay strings (percentage suffixes and
/// categorical levels are the pipeline's job), booleans and numerics become
/// floats. Column dtypes outside that set are an error rather than a silent
/// skip.
pub fn frame_to_records(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let mut records = vec![RawRecord::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().as_str();
        let series = column.as_materialized_series();
        for (idx, value) in series.iter().enumerate() {
            let raw = anyvalue_to_raw(&value)
                .with_context(|| format!("Unsupported value in column '{}'", name))?;
            records[idx].insert(name, raw);
        }
    }

    Ok(records)
}

fn anyvalue_to_raw(value: &AnyValue) -> Result<RawValue> {
    let raw = match value {
        AnyValue::Null => RawValue::Missing,
        AnyValue::String(s) => RawValue::from_str_lossy(s),
        AnyValue::StringOwned(s) => RawValue::from_str_lossy(s.as_str()),
        AnyValue::Boolean(b) => RawValue::Num(if *b { 1.0 } else { 0.0 }),
        other => {
            let numeric: f64 = other
                .try_extract()
                .map_err(|_| anyhow::anyhow!("dtype {:?} is not loadable", other.dtype()))?;
            RawValue::Num(numeric)
        }
    };
    Ok(raw)
}
