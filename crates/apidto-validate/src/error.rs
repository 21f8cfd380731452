//! Validation error types and JSON error format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Error from a single validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleError {
    /// The rule name (e.g. "isString", "isLength", "min")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional parameters describing the constraint
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, serde_json::Value>,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the error.
    pub fn param(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.params.insert(key.into(), v);
        }
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RuleError {}

/// Validation failure of one property.
///
/// Failed constraints are kept in evaluation order. Nested DTOs report
/// their own failures as `children`; array elements appear as children
/// named after their index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub property: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<RuleError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            constraints: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Error for a property that is not declared on the DTO.
    pub fn not_whitelisted(property: impl Into<String>) -> Self {
        let property = property.into();
        let message = format!("property {property} should not exist");
        let mut error = Self::new(property);
        error.add(RuleError::new("whitelistValidation", message));
        error
    }

    /// Error for input that is not an object at all.
    pub fn unknown_value() -> Self {
        let mut error = Self::new("");
        error.add(RuleError::new(
            "unknownValue",
            "an unknown value was passed to the validate function",
        ));
        error
    }

    pub fn add(&mut self, error: RuleError) {
        self.constraints.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.children.is_empty()
    }

    /// First message of this error, descending into children when this
    /// level carries no constraints.
    pub fn first_message(&self) -> Option<&str> {
        match self.constraints.first() {
            Some(rule) => Some(rule.message.as_str()),
            None => self.children.first().and_then(ValidationError::first_message),
        }
    }

    fn collect_messages<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.constraints.iter().map(|c| c.message.as_str()));
        for child in &self.children {
            child.collect_messages(out);
        }
    }

    fn collect_fields(&self, prefix: Option<&str>, out: &mut Vec<FieldErrorResponse>) {
        let path = match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}.{}", self.property),
            _ => self.property.clone(),
        };
        for rule in &self.constraints {
            out.push(FieldErrorResponse {
                field: path.clone(),
                code: rule.code.clone(),
                message: rule.message.clone(),
                params: if rule.params.is_empty() {
                    None
                } else {
                    Some(rule.params.clone())
                },
            });
        }
        for child in &self.children {
            child.collect_fields(Some(&path), out);
        }
    }
}

/// Ordered collection of property errors for one DTO.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty validation errors collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ValidationError) {
        if !error.is_empty() {
            self.errors.push(error);
        }
    }

    /// Merge another collection into this one, keeping order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of properties with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get the error of a property.
    pub fn get(&self, property: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.property == property)
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Convert errors of a `validator::Validate` derive into property errors,
    /// sorted by field name.
    pub fn from_validator_errors(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Self::new();
        for (field, error_kinds) in fields {
            let mut property = ValidationError::new(field.to_string());
            for error in error_kinds {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} failed {} validation", error.code));
                let mut rule = RuleError::new(error.code.to_string(), message);
                for (key, value) in &error.params {
                    rule = rule.param(key.to_string(), value);
                }
                property.add(rule);
            }
            out.push(property);
        }
        out
    }

    /// Message of the first failed constraint.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().and_then(ValidationError::first_message)
    }

    /// Every constraint message, depth-first, in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for error in &self.errors {
            error.collect_messages(&mut out);
        }
        out
    }

    /// Flatten into field errors with dotted paths (`items.0.name`).
    pub fn field_errors(&self) -> Vec<FieldErrorResponse> {
        let mut out = Vec::new();
        for error in &self.errors {
            error.collect_fields(None, &mut out);
        }
        out
    }

    /// Convert to the standard error response format.
    pub fn to_api_error(&self) -> ApiValidationError {
        ApiValidationError {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: "Validation failed".to_string(),
                fields: self.field_errors(),
            },
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_message() {
            Some(message) => write!(f, "Validation failed: {message}"),
            None => write!(f, "Validation failed"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        let mut out = Self::new();
        for error in errors {
            out.push(error);
        }
        out
    }
}

/// API response format for validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValidationError {
    pub error: ErrorBody,
}

/// Error body in API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    pub fields: Vec<FieldErrorResponse>,
}

/// Single field error in API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldErrorResponse {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, serde_json::Value>>,
}
