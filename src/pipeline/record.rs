//! Typed intermediate representation for raw input and model-ready output.
//!
//! Raw Records arrive from CSV rows or request parameters as loosely typed
//! field/value pairs; Feature Vectors leave the pipeline as ordered numeric
//! sequences aligned to the model's feature schema. Keeping both explicit
//! (instead of stringly-typed maps all the way down) lets schema conformance
//! be checked by construction rather than discovered at prediction time.

use std::collections::HashMap;

/// A single untyped field value as delivered by a loader or dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Textual value (categorical levels, percentage strings, unparsed numbers).
    Str(String),
    /// Numeric value.
    Num(f64),
    /// Absent or empty value.
    Missing,
}

impl RawValue {
    /// Treats the empty string as missing, matching how form fields and CSV
    /// cells report absent values.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.is_empty() {
            RawValue::Missing
        } else {
            RawValue::Str(s.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Num(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Str(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Str(v)
    }
}

/// One raw input record: a mapping from field name to untyped value.
///
/// Field order is irrelevant here; the feature schema imposes ordering at
/// projection time.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, handy in tests and request handlers.
    pub fn with(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<RawValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Returns the value for a field. An absent key and an explicit
    /// `Missing` value are treated the same by the pipeline.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, RawValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One model-ready row: numeric values in exact feature-schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_becomes_missing() {
        assert_eq!(RawValue::from_str_lossy(""), RawValue::Missing);
        assert_eq!(
            RawValue::from_str_lossy("low"),
            RawValue::Str("low".to_string())
        );
    }

    #[test]
    fn builder_inserts_fields() {
        let record = RawRecord::new()
            .with("salary", "low")
            .with("number_project", 3.0);

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("salary"), Some(&RawValue::Str("low".into())));
        assert_eq!(record.get("number_project"), Some(&RawValue::Num(3.0)));
        assert_eq!(record.get("department"), None);
    }
}
