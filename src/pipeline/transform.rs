//! The feature transformation pipeline.
//!
//! Converts raw records into feature vectors exactly as the model saw its
//! training data: same buckets, same encodings, same scaling range, same
//! imputation mean, same column order. The per-field rule table drives every
//! step; there is no field-name branching here.
//!
//! Every step is strict. A value the fitted artifacts cannot account for is
//! surfaced as an error instead of coerced away, so schema violations and
//! distribution drift are caught before predictions are trusted.

use std::collections::HashMap;

use super::artifacts::{Artifacts, Imputation};
use super::error::PipelineError;
use super::record::{FeatureVector, RawRecord, RawValue};
use super::rules::FieldRule;

/// Transforms a batch of raw records into feature vectors in schema order.
///
/// Pure function over its inputs: same records and same artifacts always
/// produce identical output. An empty input batch yields an empty output,
/// not an error. Any per-record failure aborts the whole call.
pub fn transform(
    records: &[RawRecord],
    artifacts: &Artifacts,
) -> Result<Vec<FeatureVector>, PipelineError> {
    records
        .iter()
        .map(|record| transform_one(record, artifacts))
        .collect()
}

/// Transforms a single raw record.
pub fn transform_one(
    record: &RawRecord,
    artifacts: &Artifacts,
) -> Result<FeatureVector, PipelineError> {
    let pipeline = &artifacts.pipeline;
    let imputation = pipeline.imputation.as_ref();
    let mut working: HashMap<String, f64> = HashMap::new();

    for spec in &pipeline.rules {
        let field = spec.field.as_str();
        match &spec.rule {
            FieldRule::Numeric => {
                let value = numeric_value(record, field, imputation)?;
                working.insert(field.to_string(), value);
            }
            FieldRule::Percentage => {
                let value = fraction_value(record, field, imputation)?;
                working.insert(field.to_string(), value);
            }
            FieldRule::Bucket { allowed, fallback } => {
                let raw = categorical_value(record, field)?;
                // Out-of-list values legitimately collapse to the fallback
                // bucket; this is the one place an unexpected category is
                // not an error.
                let bucket = if allowed.iter().any(|a| a == &raw) {
                    raw.as_str()
                } else {
                    fallback.as_str()
                };
                for column in allowed.iter().chain(std::iter::once(fallback)) {
                    let indicator = if column == bucket { 1.0 } else { 0.0 };
                    working.insert(column.clone(), indicator);
                }
            }
            FieldRule::Encode => {
                let raw = categorical_value(record, field)?;
                // Load-time validation guarantees a table, but hand-built
                // bundles can bypass it, so this stays an error, not a panic.
                let table = pipeline.encodings.get(field).ok_or_else(|| {
                    PipelineError::MissingColumn {
                        column: field.to_string(),
                    }
                })?;
                let code = table
                    .get(&raw)
                    .copied()
                    .ok_or_else(|| PipelineError::UnknownCategory {
                        field: field.to_string(),
                        value: raw.clone(),
                    })?;
                working.insert(field.to_string(), code);
            }
            FieldRule::Ratio {
                numerator,
                denominator,
            } => {
                let n = operand(&working, numerator)?;
                let d = operand(&working, denominator)?;
                if d == 0.0 {
                    return Err(PipelineError::DivisionByZero {
                        feature: field.to_string(),
                        denominator: denominator.clone(),
                    });
                }
                working.insert(field.to_string(), n / d);
            }
        }
    }

    // Rescaling runs after the rule walk so derived ratios read the raw
    // (pre-scaled) value, matching training-time order.
    if let Some(scaling) = &pipeline.scaling {
        match working.get_mut(&scaling.field) {
            Some(value) => *value = scaling.apply(*value),
            None => {
                return Err(PipelineError::MissingColumn {
                    column: scaling.field.clone(),
                })
            }
        }
    }

    // Projection: exactly the schema's columns, in schema order. Extra
    // working columns are dropped; absent ones are a hard error.
    let values = pipeline
        .schema
        .iter()
        .map(|column| {
            working
                .get(column)
                .copied()
                .ok_or_else(|| PipelineError::MissingColumn {
                    column: column.clone(),
                })
        })
        .collect::<Result<Vec<f64>, PipelineError>>()?;

    Ok(FeatureVector::new(values))
}

fn numeric_value(
    record: &RawRecord,
    field: &str,
    imputation: Option<&Imputation>,
) -> Result<f64, PipelineError> {
    match record.get(field) {
        None | Some(RawValue::Missing) => impute_or_missing(field, imputation),
        Some(RawValue::Num(v)) => Ok(*v),
        Some(RawValue::Str(s)) => parse_number(field, s),
    }
}

/// Percentage-like fields are canonically fractions in [0, 1]. A trailing
/// `%` string is stripped and its integer part divided by 100; bare numbers
/// (or numeric strings) are taken as fractions unchanged. Callers feeding
/// whole percentages without the `%` symbol must normalize first.
fn fraction_value(
    record: &RawRecord,
    field: &str,
    imputation: Option<&Imputation>,
) -> Result<f64, PipelineError> {
    match record.get(field) {
        None | Some(RawValue::Missing) => impute_or_missing(field, imputation),
        Some(RawValue::Num(v)) => Ok(*v),
        Some(RawValue::Str(s)) => {
            let trimmed = s.trim();
            match trimmed.strip_suffix('%') {
                Some(integer_part) => {
                    let percent: i64 = integer_part.trim().parse().map_err(|_| {
                        PipelineError::TypeCoercion {
                            field: field.to_string(),
                            value: s.clone(),
                        }
                    })?;
                    Ok(percent as f64 / 100.0)
                }
                None => parse_number(field, trimmed),
            }
        }
    }
}

fn categorical_value(record: &RawRecord, field: &str) -> Result<String, PipelineError> {
    match record.get(field) {
        None | Some(RawValue::Missing) => Err(PipelineError::MissingField {
            field: field.to_string(),
        }),
        Some(RawValue::Str(s)) => Ok(s.trim().to_string()),
        Some(RawValue::Num(v)) => Err(PipelineError::TypeCoercion {
            field: field.to_string(),
            value: v.to_string(),
        }),
    }
}

fn operand(working: &HashMap<String, f64>, field: &str) -> Result<f64, PipelineError> {
    working
        .get(field)
        .copied()
        .ok_or_else(|| PipelineError::MissingField {
            field: field.to_string(),
        })
}

fn impute_or_missing(field: &str, imputation: Option<&Imputation>) -> Result<f64, PipelineError> {
    match imputation {
        Some(imp) if imp.field == field => Ok(imp.value),
        _ => Err(PipelineError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64, PipelineError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::TypeCoercion {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
