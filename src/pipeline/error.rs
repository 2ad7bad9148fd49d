//! Error types for the transformation pipeline and artifact loading.
//!
//! Transform-time failures are deliberately strict: the pipeline never
//! substitutes a default for a value it cannot produce, because a silent
//! default would hide exactly the schema or distribution mismatch an
//! operator needs to see before trusting predictions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while transforming raw records into feature vectors.
///
/// The first three variants are schema violations (a required output column
/// cannot be produced), `TypeCoercion` covers malformed numeric input, and
/// `DivisionByZero` covers undefined derived features. All of them abort the
/// current call; none are recovered locally.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input field is absent or empty and is not the designated
    /// imputation field.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A categorical value has no entry in the fitted encoding table.
    ///
    /// Only bucketed fields fall back to a catch-all value; encoded fields
    /// must match the table exactly.
    #[error("value '{value}' for field '{field}' is not in the fitted encoding table")]
    UnknownCategory { field: String, value: String },

    /// A schema column could not be produced by any transformation step.
    #[error("schema column '{column}' was not produced by the pipeline")]
    MissingColumn { column: String },

    /// A field value could not be parsed into the numeric type a later step
    /// requires.
    #[error("cannot coerce '{value}' in field '{field}' to a number")]
    TypeCoercion { field: String, value: String },

    /// A derived ratio feature has a zero denominator.
    #[error("derived feature '{feature}': denominator '{denominator}' is zero")]
    DivisionByZero { feature: String, denominator: String },
}

impl PipelineError {
    /// Whether this error belongs to the schema-violation family.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingField { .. }
                | PipelineError::UnknownCategory { .. }
                | PipelineError::MissingColumn { .. }
        )
    }
}

/// Errors raised while loading or validating the artifact bundle.
///
/// These are fatal at startup: the process must not serve predictions with
/// missing or corrupt artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse artifact file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The bundle parsed but its contents are internally inconsistent.
    #[error("invalid artifact bundle: {reason}")]
    Invalid { reason: String },
}
