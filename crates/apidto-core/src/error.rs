//! Error types for apidto

use apidto_validate::{FieldErrorResponse, ValidationErrors};
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for DTO binding
pub type Result<T, E = DtoError> = std::result::Result<T, E>;

/// Invalid field declaration, reported when a schema is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("EnumOptions object should have exactly one key")]
    EnumOptionsShape,
    #[error("enum name `{0}` is not a bare identifier")]
    InvalidEnumName(String),
    /// A configured constant or enum value failed to serialize.
    #[error("{context} value cannot be represented as JSON: {reason}")]
    UnrepresentableValue {
        context: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn to_json_value<T: Serialize>(
        context: &'static str,
        value: T,
    ) -> std::result::Result<serde_json::Value, Self> {
        serde_json::to_value(value).map_err(|err| Self::UnrepresentableValue {
            context,
            reason: err.to_string(),
        })
    }
}

/// Failure to convert between wire data and a DTO.
#[derive(Debug, Error)]
pub enum DtoError {
    /// Input broke one or more field constraints.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// Validated input still did not fit the Rust type.
    #[error("failed to deserialize {dto}: {source}")]
    Deserialize {
        dto: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {dto}: {source}")]
    Serialize {
        dto: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DtoError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DtoError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Standard API error type
///
/// Provides structured error responses following a consistent JSON format.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error type identifier
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Every failed constraint message, in evaluation order
    pub messages: Vec<String>,
    /// Optional field-level validation errors
    pub fields: Option<Vec<FieldErrorResponse>>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(
        status: StatusCode,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error_type: error_type.into(),
            message: message.into(),
            messages: Vec::new(),
            fields: None,
        }
    }

    /// Create a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// Create a 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// 400 carrying every constraint message of `errors`.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut err = Self::new(StatusCode::BAD_REQUEST, "validation_error", "Validation failed");
        err.messages = errors.messages().into_iter().map(str::to_string).collect();
        err.fields = Some(errors.field_errors());
        err
    }

    /// JSON body of the error response.
    pub fn to_json(&self) -> serde_json::Value {
        let response = ErrorResponse {
            error: ErrorBody {
                error_type: &self.error_type,
                message: &self.message,
                messages: &self.messages,
                fields: self.fields.as_deref(),
            },
        };
        serde_json::to_value(response).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl std::error::Error for ApiError {}

/// JSON representation of API error response
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "type")]
    error_type: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    messages: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldErrorResponse]>,
}

impl From<DtoError> for ApiError {
    fn from(err: DtoError) -> Self {
        match err {
            DtoError::Validation(errors) => ApiError::validation(&errors),
            DtoError::Deserialize { .. } => ApiError::bad_request(err.to_string()),
            DtoError::Serialize { .. } => ApiError::internal(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(&errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidto_validate::{RuleError, ValidationError};
    use serde_json::json;

    fn errors() -> ValidationErrors {
        let mut code = ValidationError::new("countryCode");
        code.add(RuleError::new(
            "isLength",
            "countryCode must be shorter than or equal to 2 characters",
        ));
        let mut ts = ValidationError::new("timestamp");
        ts.add(RuleError::new("isString", "timestamp must be a string"));
        ValidationErrors::from(vec![code, ts])
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err = ApiError::from(DtoError::Validation(errors()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.messages,
            vec![
                "countryCode must be shorter than or equal to 2 characters",
                "timestamp must be a string",
            ]
        );
    }

    #[test]
    fn json_body() {
        let body = ApiError::validation(&errors()).to_json();
        assert_eq!(body["error"]["type"], "validation_error");
        assert_eq!(body["error"]["messages"][1], "timestamp must be a string");
        assert_eq!(body["error"]["fields"][0]["field"], "countryCode");

        let plain = ApiError::bad_request("nope").to_json();
        assert_eq!(plain, json!({"error": {"type": "bad_request", "message": "nope"}}));
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::EnumOptionsShape.to_string(),
            "EnumOptions object should have exactly one key"
        );
    }
}
