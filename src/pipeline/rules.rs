//! Declarative per-field transformation rules.
//!
//! The rule table is data, not code: each fitted artifact bundle carries a
//! list of `FieldSpec`s describing how every raw field is turned into model
//! input. A new case study (different dataset, different model) is a new
//! bundle, not new branching logic.

use serde::{Deserialize, Serialize};

/// How one raw field is transformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    /// Plain numeric field. Strings are parsed; a missing value is an error
    /// unless this is the designated imputation field.
    Numeric,

    /// Percentage-like field, canonically a fraction in [0, 1]. A trailing
    /// `%` string such as `"87%"` is stripped and its integer part divided
    /// by 100; bare numbers are taken as fractions unchanged.
    Percentage,

    /// High-cardinality categorical collapsed to a small set of named
    /// buckets. Values outside `allowed` map to `fallback`; the field is
    /// then one-hot expanded into one indicator column per bucket and the
    /// original column is dropped.
    Bucket {
        allowed: Vec<String>,
        fallback: String,
    },

    /// Ordinal categorical replaced by its numeric code from the fitted
    /// encoding table. An unrecognized value is an error, never zero.
    Encode,

    /// Derived ratio of two already-processed numeric fields. A zero
    /// denominator is an error, never infinity.
    Ratio {
        numerator: String,
        denominator: String,
    },
}

/// One entry of the rule table: a raw field name and its transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: String,
    pub rule: FieldRule,
}

impl FieldRule {
    /// Column names this rule contributes to the working record.
    ///
    /// Buckets contribute one indicator column per bucket value; every other
    /// rule contributes the field's own name (ratios under the derived
    /// feature's name, which is the `field` of their spec).
    pub fn output_columns<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        match self {
            FieldRule::Bucket { allowed, fallback } => {
                let mut cols: Vec<&str> = allowed.iter().map(String::as_str).collect();
                cols.push(fallback.as_str());
                cols
            }
            _ => vec![field],
        }
    }
}
