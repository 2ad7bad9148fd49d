//! Integration tests for batch scoring and dataset round-trips

use polars::prelude::*;

use tabscore::pipeline::{
    frame_to_records, load_dataset, predict_one, score_batch, CsvOptions, RawRecord, RawValue,
    PREDICTION_COLUMN,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_batch_scoring_appends_prediction_column() {
    let artifacts = attrition_artifacts();
    let df = employee_dataframe();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("scored.csv");

    let outcome = score_batch(&df, &artifacts, &output).unwrap();

    assert_eq!(outcome.rows, 4);
    assert_eq!(outcome.predictions.len(), 4);
    assert!(outcome
        .predictions
        .iter()
        .all(|p| *p == 0.0 || *p == 1.0));

    // Read the file back and check the augmented shape.
    let scored = load_dataset(&output, &CsvOptions::default()).unwrap();
    assert_eq!(scored.height(), 4);
    assert_eq!(scored.width(), df.width() + 1);

    let written = scored.column(PREDICTION_COLUMN).unwrap();
    let written: Vec<f64> = written
        .as_materialized_series()
        .iter()
        .map(|v| v.try_extract::<f64>().unwrap())
        .collect();
    assert_eq!(written, outcome.predictions);
}

#[test]
fn test_large_random_batch_scores_every_row() {
    let artifacts = attrition_artifacts();
    let df = random_employee_dataframe(500);

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("scored.csv");

    let outcome = score_batch(&df, &artifacts, &output).unwrap();
    assert_eq!(outcome.rows, 500);
    assert_eq!(outcome.predictions.len(), 500);
    assert!(outcome
        .predictions
        .iter()
        .all(|p| *p == 0.0 || *p == 1.0));
}

#[test]
fn test_failed_batch_writes_nothing() {
    let artifacts = attrition_artifacts();
    let df = df! {
        "satisfaction_level" => [0.4f64],
        "last_evaluation" => ["87%"],
        "number_project" => [4i64],
        "average_monthly_hours" => [200.0f64],
        "salary" => ["gigantic"],
        "department" => ["sales"],
    }
    .unwrap();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("scored.csv");

    let err = score_batch(&df, &artifacts, &output).unwrap_err();
    assert!(err.to_string().contains("transforming batch"));
    assert!(!output.exists());
}

#[test]
fn test_parquet_output() {
    let artifacts = attrition_artifacts();
    let df = employee_dataframe();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("scored.parquet");

    let outcome = score_batch(&df, &artifacts, &output).unwrap();
    assert_eq!(outcome.rows, 4);

    let scored = load_dataset(&output, &CsvOptions::default()).unwrap();
    assert_eq!(scored.height(), 4);
    assert!(scored.column(PREDICTION_COLUMN).is_ok());
}

#[test]
fn test_unsupported_output_extension_is_rejected() {
    let artifacts = attrition_artifacts();
    let df = employee_dataframe();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("scored.xlsx");

    let err = score_batch(&df, &artifacts, &output).unwrap_err();
    assert!(err.to_string().contains("Unsupported output format"));
}

#[test]
fn test_regressor_prediction_is_the_raw_decision_value() {
    let artifacts = house_artifacts();
    let record = RawRecord::new()
        .with("LivingArea", 120.0)
        .with("Num_Bedrooms", 3.0)
        .with("Province", "Utrecht");

    let price = predict_one(&record, &artifacts).unwrap();
    // 3000*120 + 15000*3 + 18000 + 50000
    assert!((price - 473_000.0).abs() < 1e-6);
}

#[test]
fn test_classifier_labels_map_to_outcomes() {
    let artifacts = attrition_artifacts();
    assert_eq!(artifacts.model.label(0.0), Some("Employee will stay"));
    assert_eq!(artifacts.model.label(1.0), Some("Employee will leave"));

    let artifacts = house_artifacts();
    assert_eq!(artifacts.model.label(0.0), None);
}

#[test]
fn test_frame_to_records_preserves_row_order() {
    let df = employee_dataframe();
    let records = frame_to_records(&df).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(
        records[1].get("department"),
        Some(&RawValue::Str("RandD".to_string()))
    );
    // Null satisfaction arrives as a missing value, not a zero.
    assert!(records[1].get("satisfaction_level").unwrap().is_missing());
}
