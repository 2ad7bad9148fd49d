//! Shared test utilities and fixture generators

use std::collections::HashMap;
use std::path::PathBuf;

use polars::prelude::*;
use tempfile::TempDir;

use tabscore::pipeline::{
    Artifacts, FieldRule, FieldSpec, Imputation, Model, ModelKind, PipelineArtifact, RawRecord,
    Scaling, MODEL_FILE, PIPELINE_FILE,
};

/// Fitted preprocessing for the employee-attrition case study.
///
/// Mirrors a typical HR dataset: one imputed field (satisfaction mean), one
/// scaled field (monthly hours), an ordinal salary encoding, a bucketed
/// department with an "other" catch-all, and one derived ratio feature.
pub fn attrition_pipeline() -> PipelineArtifact {
    let mut encodings = HashMap::new();
    encodings.insert(
        "salary".to_string(),
        HashMap::from([
            ("low".to_string(), 0.0),
            ("medium".to_string(), 1.0),
            ("high".to_string(), 2.0),
        ]),
    );

    PipelineArtifact {
        schema: vec![
            "satisfaction_level".to_string(),
            "last_evaluation".to_string(),
            "number_project".to_string(),
            "average_monthly_hours".to_string(),
            "hours_per_project".to_string(),
            "salary".to_string(),
            "RandD".to_string(),
            "management".to_string(),
            "other".to_string(),
        ],
        rules: vec![
            FieldSpec {
                field: "average_monthly_hours".to_string(),
                rule: FieldRule::Numeric,
            },
            FieldSpec {
                field: "number_project".to_string(),
                rule: FieldRule::Numeric,
            },
            FieldSpec {
                field: "satisfaction_level".to_string(),
                rule: FieldRule::Numeric,
            },
            FieldSpec {
                field: "last_evaluation".to_string(),
                rule: FieldRule::Percentage,
            },
            FieldSpec {
                field: "salary".to_string(),
                rule: FieldRule::Encode,
            },
            FieldSpec {
                field: "department".to_string(),
                rule: FieldRule::Bucket {
                    allowed: vec!["RandD".to_string(), "management".to_string()],
                    fallback: "other".to_string(),
                },
            },
            FieldSpec {
                field: "hours_per_project".to_string(),
                rule: FieldRule::Ratio {
                    numerator: "average_monthly_hours".to_string(),
                    denominator: "number_project".to_string(),
                },
            },
        ],
        encodings,
        imputation: Some(Imputation {
            field: "satisfaction_level".to_string(),
            value: 0.61,
        }),
        scaling: Some(Scaling {
            field: "average_monthly_hours".to_string(),
            min: 96.0,
            max: 310.0,
        }),
    }
}

pub fn attrition_model() -> Model {
    Model {
        kind: ModelKind::Classifier,
        weights: vec![-2.0, 0.5, 0.1, 1.0, 0.02, -0.3, 0.4, 0.1, 0.0],
        intercept: -0.5,
        threshold: 0.5,
        labels: Some([
            "Employee will stay".to_string(),
            "Employee will leave".to_string(),
        ]),
    }
}

pub fn attrition_artifacts() -> Artifacts {
    Artifacts::from_parts(attrition_pipeline(), attrition_model()).unwrap()
}

/// Fitted preprocessing for the house-price case study: same code path,
/// different bundle. No imputation, no scaling, a province bucket, and a
/// regression model.
pub fn house_artifacts() -> Artifacts {
    let pipeline = PipelineArtifact {
        schema: vec![
            "LivingArea".to_string(),
            "Num_Bedrooms".to_string(),
            "Noord Holland".to_string(),
            "Zuid Holland".to_string(),
            "Utrecht".to_string(),
            "countryside".to_string(),
        ],
        rules: vec![
            FieldSpec {
                field: "LivingArea".to_string(),
                rule: FieldRule::Numeric,
            },
            FieldSpec {
                field: "Num_Bedrooms".to_string(),
                rule: FieldRule::Numeric,
            },
            FieldSpec {
                field: "Province".to_string(),
                rule: FieldRule::Bucket {
                    allowed: vec![
                        "Noord Holland".to_string(),
                        "Zuid Holland".to_string(),
                        "Utrecht".to_string(),
                    ],
                    fallback: "countryside".to_string(),
                },
            },
        ],
        encodings: HashMap::new(),
        imputation: None,
        scaling: None,
    };

    let model = Model {
        kind: ModelKind::Regressor,
        weights: vec![3000.0, 15000.0, 25000.0, 22000.0, 18000.0, -5000.0],
        intercept: 50000.0,
        threshold: 0.5,
        labels: None,
    };

    Artifacts::from_parts(pipeline, model).unwrap()
}

/// A complete, valid raw record for the attrition bundle.
pub fn employee_record() -> RawRecord {
    RawRecord::new()
        .with("satisfaction_level", 0.4)
        .with("last_evaluation", "87%")
        .with("number_project", 4.0)
        .with("average_monthly_hours", 200.0)
        .with("salary", "low")
        .with("department", "sales")
}

/// Write an artifact bundle into a temporary directory as JSON files.
pub fn write_artifact_dir(artifacts: &Artifacts) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();

    let pipeline_json = serde_json::to_string_pretty(&artifacts.pipeline).unwrap();
    std::fs::write(dir.join(PIPELINE_FILE), pipeline_json).unwrap();

    let model_json = serde_json::to_string_pretty(&artifacts.model).unwrap();
    std::fs::write(dir.join(MODEL_FILE), model_json).unwrap();

    (temp_dir, dir)
}

/// A small new-data DataFrame matching the attrition bundle's raw fields.
pub fn employee_dataframe() -> DataFrame {
    df! {
        "satisfaction_level" => [Some(0.38f64), None, Some(0.72), Some(0.11)],
        "last_evaluation" => ["53%", "87%", "42%", "99%"],
        "number_project" => [2i64, 5, 3, 6],
        "average_monthly_hours" => [157.0f64, 262.0, 185.0, 305.0],
        "salary" => ["low", "medium", "high", "low"],
        "department" => ["sales", "RandD", "management", "support"],
    }
    .unwrap()
}

/// Generate a larger random batch matching the attrition bundle's raw
/// fields. Every row is valid: categorical values are drawn from the fitted
/// vocabularies.
pub fn random_employee_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let salaries = ["low", "medium", "high"];
    let departments = ["sales", "RandD", "management", "support", "hr"];

    let mut satisfaction = Vec::with_capacity(rows);
    let mut evaluation = Vec::with_capacity(rows);
    let mut projects = Vec::with_capacity(rows);
    let mut hours = Vec::with_capacity(rows);
    let mut salary = Vec::with_capacity(rows);
    let mut department = Vec::with_capacity(rows);

    for _ in 0..rows {
        satisfaction.push(if rng.gen_bool(0.1) {
            None
        } else {
            Some(rng.gen_range(0.05..1.0))
        });
        evaluation.push(format!("{}%", rng.gen_range(30..100)));
        projects.push(rng.gen_range(1i64..8));
        hours.push(rng.gen_range(96.0f64..310.0));
        salary.push(salaries[rng.gen_range(0..salaries.len())]);
        department.push(departments[rng.gen_range(0..departments.len())]);
    }

    df! {
        "satisfaction_level" => satisfaction,
        "last_evaluation" => evaluation,
        "number_project" => projects,
        "average_monthly_hours" => hours,
        "salary" => salary,
        "department" => department,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}
