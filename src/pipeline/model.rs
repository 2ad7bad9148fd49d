//! The pretrained model as a narrow collaborator.
//!
//! Training happens elsewhere; this crate only deserializes the fitted
//! coefficients and applies them to feature vectors. A classifier produces a
//! 0/1 decision (via a sigmoid and a threshold), a regressor the raw score.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use super::record::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Classifier,
    Regressor,
}

/// A fitted linear model loaded from `model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub kind: ModelKind,
    /// One weight per feature-schema column, in schema order.
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Decision threshold on the classifier probability.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Optional human-readable labels for classifier outcomes 0 and 1.
    #[serde(default)]
    pub labels: Option<[String; 2]>,
}

fn default_threshold() -> f64 {
    0.5
}

impl Model {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Raw linear score: dot product of weights and features plus intercept.
    pub fn decision_value(&self, features: &FeatureVector) -> f64 {
        debug_assert_eq!(self.weights.len(), features.len());
        let dot: f64 = self
            .weights
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept
    }

    /// The prediction value appended to scored records.
    ///
    /// Classifiers return 0.0 or 1.0 after thresholding the sigmoid of the
    /// decision value; regressors return the decision value itself.
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        let score = self.decision_value(features);
        match self.kind {
            ModelKind::Classifier => {
                let probability = sigmoid(score);
                if probability >= self.threshold {
                    1.0
                } else {
                    0.0
                }
            }
            ModelKind::Regressor => score,
        }
    }

    /// Human-readable label for a classifier prediction, if the bundle
    /// carries labels.
    pub fn label(&self, prediction: f64) -> Option<&str> {
        let labels = self.labels.as_ref()?;
        if prediction >= 1.0 {
            Some(labels[1].as_str())
        } else {
            Some(labels[0].as_str())
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
