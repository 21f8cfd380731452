//! Request extractors
//!
//! Bind a DTO from the parts of an `http` request, running the same
//! transforms and rules as [`input`](crate::binding::input). Rejections are
//! 400 [`ApiError`]s listing every failed constraint.

use crate::binding::{input_with, BindOptions};
use crate::dto::Dto;
use crate::error::{ApiError, DtoError, Result};
use crate::trace_warn;
use http::request::Parts;
use http::HeaderMap;
use serde_json::{Map, Value};
use std::ops::Deref;

/// Trait for extracting data from request parts (headers, path, query)
pub trait FromRequestParts: Sized {
    /// Extract from request parts
    fn from_request_parts(parts: &Parts) -> Result<Self, ApiError>;
}

/// Header DTO extractor
///
/// Each field is read from the header named by its wire name, compared
/// case-insensitively. Repeated headers are joined with `", "`; headers the
/// DTO does not declare are ignored.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct TenantHeaders {
///     tenant_id: String,
/// }
///
/// dto!(TenantHeaders {
///     tenant_id => is_string(StringOptions::new().name("x-tenant-id")),
/// });
///
/// let TypedHeaders(headers) = TypedHeaders::<TenantHeaders>::from_request_parts(&parts)?;
/// ```
#[derive(Debug, Clone)]
pub struct TypedHeaders<T>(pub T);

impl<T: Dto> TypedHeaders<T> {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let value = Value::Object(header_values::<T>(headers));
        input_with::<T>(value, &BindOptions::headers())
            .map(TypedHeaders)
            .map_err(|err| reject(T::dto_name(), "headers", err))
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Dto> FromRequestParts for TypedHeaders<T> {
    fn from_request_parts(parts: &Parts) -> Result<Self, ApiError> {
        Self::from_headers(&parts.headers)
    }
}

impl<T> Deref for TypedHeaders<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header_values<T: Dto>(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for (property, spec) in T::schema().fields() {
        let wire = spec.wire_name(property);
        let values: Vec<&str> = headers
            .get_all(wire)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if !values.is_empty() {
            map.insert(wire.to_string(), Value::String(values.join(", ")));
        }
    }
    map
}

/// Query string DTO extractor
///
/// Values arrive as strings; number and boolean fields need `stringified`.
/// A repeated key becomes an array, which array fields with `force` also
/// accept as a single value.
#[derive(Debug, Clone)]
pub struct TypedQuery<T>(pub T);

impl<T: Dto> TypedQuery<T> {
    pub fn from_query(query: &str) -> Result<Self, ApiError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

        let mut map = Map::new();
        for (key, value) in pairs {
            match map.get_mut(&key) {
                Some(Value::Array(items)) => items.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
                None => {
                    map.insert(key, Value::String(value));
                }
            }
        }

        input_with::<T>(Value::Object(map), &BindOptions::query())
            .map(TypedQuery)
            .map_err(|err| reject(T::dto_name(), "query", err))
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Dto> FromRequestParts for TypedQuery<T> {
    fn from_request_parts(parts: &Parts) -> Result<Self, ApiError> {
        Self::from_query(parts.uri.query().unwrap_or_default())
    }
}

impl<T> Deref for TypedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON body DTO, bound with strict options: undeclared properties are
/// rejected.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T: Dto> ValidatedJson<T> {
    pub fn from_bytes(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
        crate::binding::input::<T>(value)
            .map(ValidatedJson)
            .map_err(|err| reject(T::dto_name(), "body", err))
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn reject(dto: &'static str, source: &'static str, err: DtoError) -> ApiError {
    let err = ApiError::from(err);
    trace_warn!(
        dto,
        source,
        messages = ?err.messages,
        "request rejected"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorators::{is_number, is_string, NumberOptions, StringOptions};
    use crate::options::PropertyOptionsExt;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Paging {
        page: i64,
        tags: Option<Vec<String>>,
    }

    crate::dto!(Paging {
        page => is_number(NumberOptions::new().integer().stringified().min(1.0)),
        tags => is_string(StringOptions::new().optional().array()),
    });

    #[test]
    fn query_repeats_become_arrays() {
        let TypedQuery(paging) = TypedQuery::<Paging>::from_query("page=2&tags=a&tags=b&x=1").unwrap();
        assert_eq!(
            paging,
            Paging {
                page: 2,
                tags: Some(vec!["a".into(), "b".into()])
            }
        );
    }

    #[test]
    fn query_rejections_are_bad_requests() {
        let err = TypedQuery::<Paging>::from_query("page=0").unwrap_err();
        assert_eq!(err.status, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.messages, vec!["page must not be less than 1"]);
    }

    #[test]
    fn json_body_is_strict() {
        let err = ValidatedJson::<Paging>::from_bytes(br#"{"page": 1, "extra": true}"#).unwrap_err();
        assert_eq!(err.messages, vec!["property extra should not exist"]);

        let err = ValidatedJson::<Paging>::from_bytes(b"{").unwrap_err();
        assert_eq!(err.error_type, "bad_request");
    }
}
