use super::map_scalars;
use crate::compose::compose;
use crate::field::{Behavior, FieldSpec, Transform, TransformParams};
use crate::options::{impl_property_options, PropertyOptions};
use crate::transform::transform_handling_optional;
use apidto_openapi::JsonSchema;
use apidto_validate::{date, rules, TransformError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Wire format of a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `yyyy-mm-dd`
    #[default]
    Date,
    /// Strict ISO-8601, written as `yyyy-mm-ddTHH:MM:SS.mmmZ`.
    DateTime,
}

impl DateFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
        }
    }

    fn format(self, instant: &DateTime<Utc>) -> String {
        match self {
            Self::Date => date::format_date(instant),
            Self::DateTime => date::format_date_time(instant),
        }
    }
}

/// Options of a `DateTime<Utc>` field.
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    base: PropertyOptions<DateTime<Utc>>,
    format: DateFormat,
}

impl DateOptions {
    pub fn new(format: DateFormat) -> Self {
        Self {
            base: PropertyOptions::default(),
            format,
        }
    }

    pub fn date() -> Self {
        Self::new(DateFormat::Date)
    }

    pub fn date_time() -> Self {
        Self::new(DateFormat::DateTime)
    }
}

impl_property_options!(DateOptions, DateTime<Utc>);

pub fn is_date(options: DateOptions) -> FieldSpec {
    let format = options.format;
    let each = options.base.is_array();

    // defaults and examples are documented and substituted in wire form
    let mut base = options.base;
    base.default = base.default.map(|v| map_scalars(v, |v| to_wire(format, v)));
    base.example = base.example.map(|v| map_scalars(v, |v| to_wire(format, v)));

    let inbound = transform_handling_optional(base.optional, base.nullable, move |params| {
        parse(format, params)
    });
    let outbound = Transform::outbound(move |params| {
        params
            .value
            .clone()
            .map_present(|v| map_scalars(v, |v| to_wire(format, v)))
    });

    compose(
        JsonSchema::string().with_format(format.as_str()),
        &base,
        vec![
            Behavior::Transform(inbound),
            Behavior::Transform(outbound),
            Behavior::rule(rules::is_date(each)),
        ],
    )
}

fn parse(format: DateFormat, params: &TransformParams<'_>) -> Result<Value, TransformError> {
    match params.value.as_value() {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| parse_one(format, params.key, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Some(value) => parse_one(format, params.key, value),
        None => Err(TransformError::new(format!("{} does not exist", params.key))),
    }
}

fn parse_one(format: DateFormat, key: &str, value: &Value) -> Result<Value, TransformError> {
    let raw = value.as_str().unwrap_or_default();
    let instant = match format {
        DateFormat::Date => {
            if !date::is_date_shaped(raw) {
                return Err(TransformError::new(format!(
                    "{key} is not formatted as `yyyy-mm-dd`"
                )));
            }
            date::parse_iso8601(raw)
                .ok_or_else(|| TransformError::new(format!("{key} is not a valid Date")))?
        }
        DateFormat::DateTime => date::parse_iso8601(raw)
            .ok_or_else(|| TransformError::new(format!("{key} is not ISO8601 format")))?,
    };
    Ok(Value::String(
        instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ))
}

fn to_wire(format: DateFormat, value: Value) -> Value {
    match value.as_str().and_then(date::parse_iso8601) {
        Some(instant) => Value::String(format.format(&instant)),
        None => value,
    }
}
