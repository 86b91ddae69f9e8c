//! Monitoring sample record.
//!
//! On the wire a sample is a JSON array whose first element is the status
//! code. Graphite puts a timestamp after it; anything past the first element
//! is carried along but never interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when a JSON array cannot be read as a sample.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    /// The array had no status element.
    #[error("sample is empty, expected a status code as the first element")]
    Empty,
}

/// One observed datapoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct Sample {
    /// Status code: `0` is up, anything else is down. `None` when the JSON
    /// element is null or not a number, which also counts as down.
    pub status_code: Option<f64>,

    /// Uninterpreted trailing fields (usually a timestamp).
    pub trailing: Vec<Value>,
}

impl Sample {
    /// Sample reporting "up".
    pub fn up() -> Self {
        Self::with_status(0.0)
    }

    /// Sample reporting "down".
    pub fn down() -> Self {
        Self::with_status(1.0)
    }

    /// Sample with an explicit numeric status code.
    pub fn with_status(status_code: f64) -> Self {
        Self {
            status_code: Some(status_code),
            trailing: Vec::new(),
        }
    }

    /// Attach a timestamp as the trailing field.
    pub fn at(mut self, timestamp: i64) -> Self {
        self.trailing = vec![Value::from(timestamp)];
        self
    }

    /// Whether this sample counts toward the up percentage.
    pub fn is_up(&self) -> bool {
        self.status_code == Some(0.0)
    }
}

impl TryFrom<Vec<Value>> for Sample {
    type Error = SampleError;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        let mut iter = values.into_iter();
        let status_code = match iter.next() {
            None => return Err(SampleError::Empty),
            Some(Value::Number(n)) => n.as_f64(),
            // null, strings, bools: never equal to 0, so down
            Some(_) => None,
        };

        Ok(Self {
            status_code,
            trailing: iter.collect(),
        })
    }
}

impl From<Sample> for Vec<Value> {
    fn from(sample: Sample) -> Self {
        let status = match sample.status_code {
            None => Value::Null,
            // Keep integral codes as integers so they round-trip the way Graphite sends them.
            Some(code) if code.fract() == 0.0 && code.abs() < i64::MAX as f64 => {
                Value::from(code as i64)
            }
            Some(code) => Value::from(code),
        };

        let mut values = Vec::with_capacity(1 + sample.trailing.len());
        values.push(status);
        values.extend(sample.trailing);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graphite_pair_parses() {
        let sample: Sample = serde_json::from_value(json!([0, 1234567890])).unwrap();
        assert!(sample.is_up());
        assert_eq!(sample.trailing, vec![json!(1234567890)]);
    }

    #[test]
    fn test_float_zero_is_up() {
        let sample: Sample = serde_json::from_value(json!([0.0])).unwrap();
        assert!(sample.is_up());

        let sample: Sample = serde_json::from_value(json!([-0.0, 1])).unwrap();
        assert!(sample.is_up());
    }

    #[test]
    fn test_non_zero_and_null_are_down() {
        let one: Sample = serde_json::from_value(json!([1, 1234567890])).unwrap();
        assert!(!one.is_up());

        let seven: Sample = serde_json::from_value(json!([7])).unwrap();
        assert!(!seven.is_up());

        let null: Sample = serde_json::from_value(json!([null, 1234567890])).unwrap();
        assert_eq!(null.status_code, None);
        assert!(!null.is_up());
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        let err = serde_json::from_value::<Sample>(json!([])).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_numeric_status_is_down() {
        let text: Sample = serde_json::from_value(json!(["0", 1])).unwrap();
        assert_eq!(text.status_code, None);
        assert!(!text.is_up());
        assert_eq!(text.trailing, vec![json!(1)]);

        let flag: Sample = serde_json::from_value(json!([false])).unwrap();
        assert!(!flag.is_up());

        let nested: Sample = serde_json::from_value(json!([{"code": 0}, 5])).unwrap();
        assert!(!nested.is_up());
    }

    #[test]
    fn test_serializes_back_to_array() {
        let value = serde_json::to_value(Sample::down().at(42)).unwrap();
        assert_eq!(value, json!([1, 42]));

        let value = serde_json::to_value(Sample::with_status(0.5)).unwrap();
        assert_eq!(value, json!([0.5]));
    }
}
