use super::map_scalars;
use crate::compose::compose;
use crate::field::{Behavior, FieldSpec, Transform};
use crate::options::{impl_property_options, PropertyOptions};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

static NUMERIC_STRING: OnceLock<Regex> = OnceLock::new();

fn numeric_string() -> &'static Regex {
    NUMERIC_STRING.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatFormat {
    Float,
    Double,
}

impl FloatFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerFormat {
    Int32,
    Int64,
}

impl IntegerFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        }
    }
}

/// Schema type of a number field. Formats only show up in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Number(Option<FloatFormat>),
    /// Rejects decimal places on input. Output is not truncated.
    Integer(Option<IntegerFormat>),
}

impl Default for NumberKind {
    fn default() -> Self {
        Self::Number(None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    base: PropertyOptions<f64>,
    kind: NumberKind,
    min: Option<f64>,
    max: Option<f64>,
    stringified: bool,
}

impl NumberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integer(mut self) -> Self {
        self.kind = NumberKind::Integer(None);
        self
    }

    pub fn integer_format(mut self, format: IntegerFormat) -> Self {
        self.kind = NumberKind::Integer(Some(format));
        self
    }

    pub fn float_format(mut self, format: FloatFormat) -> Self {
        self.kind = NumberKind::Number(Some(format));
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Coerce numeric strings (`"12"`, `"-0.5"`, `".5"`) on input.
    pub fn stringified(mut self) -> Self {
        self.stringified = true;
        self
    }
}

impl_property_options!(NumberOptions, f64, encode = encode_number);

/// JSON form of a number, integral values without a fraction.
pub(crate) fn encode_number(n: f64) -> Option<Value> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(Value::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

pub fn is_number(options: NumberOptions) -> FieldSpec {
    let each = options.base.is_array();
    let fragment = match options.kind {
        NumberKind::Number(format) => {
            with_format(JsonSchema::number(), format.map(FloatFormat::as_str))
        }
        NumberKind::Integer(format) => {
            with_format(JsonSchema::integer(), format.map(IntegerFormat::as_str))
        }
    };
    let fragment = JsonSchema {
        minimum: options.min,
        maximum: options.max,
        ..fragment
    };

    let integer = matches!(options.kind, NumberKind::Integer(_));
    let mut extras = vec![Behavior::rule(rules::is_number(integer, each))];
    if options.stringified {
        extras.push(Behavior::Transform(Transform::inbound(|params| {
            params.value.clone().map_present(|v| map_scalars(v, parse_number))
        })));
    }
    if let Some(min) = options.min {
        extras.push(Behavior::rule(rules::min(min, each)));
    }
    if let Some(max) = options.max {
        extras.push(Behavior::rule(rules::max(max, each)));
    }
    compose(fragment, &options.base, extras)
}

fn with_format(schema: JsonSchema, format: Option<&str>) -> JsonSchema {
    match format {
        Some(format) => schema.with_format(format),
        None => schema,
    }
}

fn parse_number(value: Value) -> Value {
    let parsed = value
        .as_str()
        .filter(|s| numeric_string().is_match(s))
        .and_then(|s| s.parse::<f64>().ok())
        .and_then(encode_number);
    parsed.unwrap_or(value)
}
