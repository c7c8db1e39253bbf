//! Trained-column schema and alignment

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::PipelineError;
use crate::features::FeatureFrame;

/// Ordered feature columns the residual model was fitted on
///
/// The residual model consumes a positional vector, so column order here is
/// the order of the model's coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TrainedSchema {
    columns: Vec<String>,
}

impl TrainedSchema {
    /// Builds a schema; an empty or repeating column list is rejected
    pub fn new(columns: Vec<String>) -> Result<Self, PipelineError> {
        if columns.is_empty() {
            return Err(PipelineError::schema("trained-column list is empty"));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(PipelineError::schema(format!(
                "trained-column list repeats {dup}"
            )));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<String>> for TrainedSchema {
    type Error = PipelineError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<TrainedSchema> for Vec<String> {
    fn from(schema: TrainedSchema) -> Self {
        schema.columns
    }
}

/// Reindexes `frame` against `schema`
///
/// The result has exactly the schema's columns in the schema's order. A
/// column the frame lacks is filled with 0.0, a column the schema lacks is
/// dropped. Aligning an aligned frame returns it unchanged.
pub fn align(frame: &FeatureFrame, schema: &TrainedSchema) -> FeatureFrame {
    let mut aligned = FeatureFrame::new();
    for column in schema.columns() {
        let value = frame.get(column).unwrap_or(0.0);
        // schema columns are unique, so push cannot fail
        let _ = aligned.push(column.as_str(), value);
    }
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: &[&str]) -> TrainedSchema {
        TrainedSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_rejects_empty_schema() {
        assert!(matches!(TrainedSchema::new(vec![]), Err(PipelineError::SchemaMismatch(_))));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let result = TrainedSchema::new(vec!["a".into(), "b".into(), "a".into()]);
        assert!(matches!(result, Err(PipelineError::SchemaMismatch(msg)) if msg.contains('a')));
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<TrainedSchema>("[\"x\",\"y\"]").is_ok());
        assert!(serde_json::from_str::<TrainedSchema>("[]").is_err());
    }

    #[test]
    fn test_contains() {
        let s = schema(&["PatientAge", "ClaimType_Routine"]);
        assert!(s.contains("ClaimType_Routine"));
        assert!(!s.contains("ClaimType_Emergency"));
    }
}
