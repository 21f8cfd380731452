//! Values seen by validation rules.
//!
//! A DTO property is either missing from the input, present with a JSON
//! value, or holds the error a transform produced while converting it.
//! Transforms never fail by panicking or returning `Err`; they hand a
//! [`FieldValue::Failed`] to the validation step, which turns it into a
//! field-level message.

use serde_json::Value;
use thiserror::Error;

/// Error produced by a value transform.
///
/// The message is user-facing and is reported verbatim by rules that
/// surface transform failures (e.g. `"date is not a valid Date"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// State of a single DTO property during binding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// The key does not exist in the input.
    #[default]
    Absent,
    /// The key exists; `null` is a present value.
    Present(Value),
    /// A transform rejected the input.
    Failed(TransformError),
}

impl FieldValue {
    /// Build from an optional JSON value, treating `None` as absent.
    pub fn from_option(value: Option<&Value>) -> Self {
        match value {
            Some(value) => Self::Present(value.clone()),
            None => Self::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Present(Value::Null))
    }

    /// Absent or `null`.
    pub fn is_nullish(&self) -> bool {
        self.is_absent() || self.is_null()
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_error(&self) -> Option<&TransformError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Apply `f` to a present value, leaving absent and failed values alone.
    pub fn map_present(self, f: impl FnOnce(Value) -> Value) -> Self {
        match self {
            Self::Present(value) => Self::Present(f(value)),
            other => other,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Present(value)
    }
}

impl From<Result<Value, TransformError>> for FieldValue {
    fn from(result: Result<Value, TransformError>) -> Self {
        match result {
            Ok(value) => Self::Present(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Render a constraint value the way messages print it: strings without
/// quotes, arrays joined with `", "`.
pub fn display_constraint(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_constraint)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
