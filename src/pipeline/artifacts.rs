//! Fitted artifact bundle: feature schema, preprocessing parameters, rule
//! table, and the pretrained model.
//!
//! Everything here is produced once by a training process, loaded read-only
//! at startup, and passed explicitly into `transform`/`predict` calls. The
//! pipeline never mutates it. Loading validates internal consistency up
//! front so a corrupt or mismatched bundle refuses to serve at all instead
//! of failing one record at a time.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use super::model::Model;
use super::rules::{FieldRule, FieldSpec};

pub const PIPELINE_FILE: &str = "pipeline.json";
pub const MODEL_FILE: &str = "model.json";

/// Training-set mean used to fill the one designated imputable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputation {
    pub field: String,
    pub value: f64,
}

/// Training-set min/max used to linearly rescale one designated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

impl Scaling {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Rescales into the training range. Deliberately unclamped: values
    /// outside [0, 1] are the out-of-distribution signal drift checks look
    /// for.
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }
}

/// The fitted preprocessing half of the bundle (`pipeline.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Ordered column names the model requires, fixed at training time.
    pub schema: Vec<String>,
    /// Per-field transformation rules, evaluated in order.
    pub rules: Vec<FieldSpec>,
    /// Fitted encoding tables, one per `encode`-ruled field.
    #[serde(default)]
    pub encodings: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub imputation: Option<Imputation>,
    #[serde(default)]
    pub scaling: Option<Scaling>,
}

/// The complete read-only context a scoring process needs.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub pipeline: PipelineArtifact,
    pub model: Model,
}

impl Artifacts {
    /// Loads `pipeline.json` and `model.json` from an artifact directory and
    /// validates that they agree with each other.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let pipeline_path = dir.join(PIPELINE_FILE);
        let raw = fs::read_to_string(&pipeline_path).map_err(|source| ArtifactError::Io {
            path: pipeline_path.clone(),
            source,
        })?;
        let pipeline: PipelineArtifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: pipeline_path,
                source,
            })?;

        let model = Model::load(&dir.join(MODEL_FILE))?;

        let artifacts = Self { pipeline, model };
        artifacts.validate()?;
        Ok(artifacts)
    }

    /// Constructs a bundle from already-deserialized parts, running the same
    /// validation as `load`. Useful for embedding artifacts in tests.
    pub fn from_parts(pipeline: PipelineArtifact, model: Model) -> Result<Self, ArtifactError> {
        let artifacts = Self { pipeline, model };
        artifacts.validate()?;
        Ok(artifacts)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let p = &self.pipeline;

        if p.schema.is_empty() {
            return Err(invalid("feature schema is empty"));
        }

        if self.model.weights.len() != p.schema.len() {
            return Err(invalid(format!(
                "model has {} weights but the schema has {} columns",
                self.model.weights.len(),
                p.schema.len()
            )));
        }

        if let Some(scaling) = &p.scaling {
            if !(scaling.range() > 0.0) {
                return Err(invalid(format!(
                    "scaling range for '{}' is not positive (min={}, max={})",
                    scaling.field, scaling.min, scaling.max
                )));
            }
            let produced = p.rules.iter().any(|spec| {
                spec.rule
                    .output_columns(&spec.field)
                    .contains(&scaling.field.as_str())
            });
            if !produced {
                return Err(invalid(format!(
                    "scaling field '{}' is not produced by any rule",
                    scaling.field
                )));
            }
        }

        // Ratios read from the working record, so their operands must come
        // from earlier rules; checking order here keeps a bad bundle from
        // failing one record at a time later.
        let mut produced: HashSet<&str> = HashSet::new();
        for spec in &p.rules {
            if let FieldRule::Ratio {
                numerator,
                denominator,
            } = &spec.rule
            {
                for operand in [numerator, denominator] {
                    if !produced.contains(operand.as_str()) {
                        return Err(invalid(format!(
                            "ratio '{}' depends on '{}', which no earlier rule produces",
                            spec.field, operand
                        )));
                    }
                }
            }
            produced.extend(spec.rule.output_columns(&spec.field));
        }

        for spec in &p.rules {
            if let FieldRule::Encode = spec.rule {
                match p.encodings.get(&spec.field) {
                    None => {
                        return Err(invalid(format!(
                            "field '{}' has an encode rule but no encoding table",
                            spec.field
                        )))
                    }
                    Some(t) if t.is_empty() => {
                        return Err(invalid(format!(
                            "encoding table for '{}' is empty",
                            spec.field
                        )))
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(imputation) = &p.imputation {
            let covered = p.rules.iter().any(|spec| {
                spec.field == imputation.field
                    && matches!(spec.rule, FieldRule::Numeric | FieldRule::Percentage)
            });
            if !covered {
                return Err(invalid(format!(
                    "imputation field '{}' has no numeric rule",
                    imputation.field
                )));
            }
        }

        // Every schema column must be producible by some rule, otherwise
        // projection can never succeed.
        for column in &p.schema {
            let producible = p.rules.iter().any(|spec| {
                spec.rule
                    .output_columns(&spec.field)
                    .contains(&column.as_str())
            });
            if !producible {
                return Err(invalid(format!(
                    "schema column '{}' is not produced by any rule",
                    column
                )));
            }
        }

        Ok(())
    }

    pub fn schema(&self) -> &[String] {
        &self.pipeline.schema
    }
}

fn invalid(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        reason: reason.into(),
    }
}
