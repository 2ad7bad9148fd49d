//! Drift detection between fitted artifacts and new data.
//!
//! The fitted scaler range and imputation mean describe the training data.
//! When new data's own statistics diverge from them, reusing the fitted
//! parameters still produces the *correct* transformation (that is the whole
//! point of persisting them), but the divergence itself is the operator's
//! early warning that the incoming distribution has shifted. Refitting on
//! new data instead of reusing the stored values would silently corrupt
//! predictions, so this module only ever fits throwaway statistics for
//! comparison.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::artifacts::Artifacts;

/// Which fitted statistic a check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatistic {
    ScaleRange,
    ImputationMean,
}

impl std::fmt::Display for DriftStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriftStatistic::ScaleRange => write!(f, "scale range"),
            DriftStatistic::ImputationMean => write!(f, "imputation mean"),
        }
    }
}

/// One fitted-vs-observed comparison.
#[derive(Debug, Clone, Serialize)]
pub struct DriftCheck {
    pub statistic: DriftStatistic,
    pub column: String,
    pub trained: f64,
    pub observed: f64,
    pub drifted: bool,
}

impl DriftCheck {
    pub fn delta(&self) -> f64 {
        (self.observed - self.trained).abs()
    }
}

/// Fit a throwaway min/max on a new-data column.
pub fn observed_range(df: &DataFrame, column: &str) -> Result<(f64, f64)> {
    let values = numeric_values(df, column)?;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    Ok((min, max))
}

/// Mean of a new-data column, ignoring nulls.
pub fn observed_mean(df: &DataFrame, column: &str) -> Result<f64> {
    let values = numeric_values(df, column)?;
    let sum: f64 = values.iter().sum();
    Ok(sum / values.len() as f64)
}

/// Compare the stored training statistics against the new data.
///
/// A check is flagged as drifted when fitted and observed values differ by
/// more than `tolerance`. Bundles without a scaler or imputation mean simply
/// produce fewer checks.
pub fn check_drift(df: &DataFrame, artifacts: &Artifacts, tolerance: f64) -> Result<Vec<DriftCheck>> {
    let mut checks = Vec::new();
    let pipeline = &artifacts.pipeline;

    if let Some(scaling) = &pipeline.scaling {
        let (min, max) = observed_range(df, &scaling.field)
            .with_context(|| format!("fitting observed range for '{}'", scaling.field))?;
        let observed = max - min;
        let trained = scaling.range();
        checks.push(DriftCheck {
            statistic: DriftStatistic::ScaleRange,
            column: scaling.field.clone(),
            trained,
            observed,
            drifted: (observed - trained).abs() > tolerance,
        });
    }

    if let Some(imputation) = &pipeline.imputation {
        let observed = observed_mean(df, &imputation.field)
            .with_context(|| format!("computing observed mean for '{}'", imputation.field))?;
        checks.push(DriftCheck {
            statistic: DriftStatistic::ImputationMean,
            column: imputation.field.clone(),
            trained: imputation.value,
            observed,
            drifted: (observed - imputation.value).abs() > tolerance,
        });
    }

    Ok(checks)
}

fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df
        .column(column)
        .with_context(|| format!("column '{}' not found in dataset", column))?;

    let values: Vec<f64> = col
        .as_materialized_series()
        .iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| v.try_extract::<f64>().ok())
        .collect();

    if values.is_empty() {
        anyhow::bail!("column '{}' has no numeric values to fit", column);
    }
    Ok(values)
}
