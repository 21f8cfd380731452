use super::map_scalars;
use crate::compose::compose;
use crate::field::{Behavior, FieldSpec, Transform};
use crate::options::{impl_property_options, PropertyOptions};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct BooleanOptions {
    base: PropertyOptions<bool>,
    stringified: bool,
}

impl BooleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `"true"` and `"false"` on input and write strings on output.
    /// Matching is exact: `"True"` or `"true "` stay strings and fail.
    pub fn stringified(mut self) -> Self {
        self.stringified = true;
        self
    }
}

impl_property_options!(BooleanOptions, bool);

pub fn is_boolean(options: BooleanOptions) -> FieldSpec {
    let each = options.base.is_array();
    let mut extras = vec![Behavior::rule(rules::is_boolean(each))];
    if options.stringified {
        extras.push(Behavior::Transform(Transform::inbound(|params| {
            params.value.clone().map_present(|v| map_scalars(v, parse_bool))
        })));
        extras.push(Behavior::Transform(Transform::outbound(|params| {
            params.value.clone().map_present(|v| map_scalars(v, print_bool))
        })));
    }
    compose(JsonSchema::boolean(), &options.base, extras)
}

fn parse_bool(value: Value) -> Value {
    match value.as_str() {
        Some("true") => Value::Bool(true),
        Some("false") => Value::Bool(false),
        _ => value,
    }
}

fn print_bool(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::String(b.to_string()),
        other => other,
    }
}
