use crate::compose::compose;
use crate::field::{Behavior, FieldSpec};
use crate::options::{impl_property_options, PropertyOptions};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use serde_json::Value;

/// Options of a field accepting any JSON value except `null`.
#[derive(Debug, Clone, Default)]
pub struct UnknownOptions {
    base: PropertyOptions<Value>,
}

impl UnknownOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_property_options!(UnknownOptions, Value);

pub fn is_unknown(options: UnknownOptions) -> FieldSpec {
    let fragment = JsonSchema {
        one_of: Some(vec![
            JsonSchema::string(),
            JsonSchema::number(),
            JsonSchema::integer(),
            JsonSchema::boolean(),
            JsonSchema::typed("array"),
            JsonSchema::object(),
        ]),
        ..Default::default()
    };
    compose(fragment, &options.base, vec![Behavior::rule(rules::is_defined())])
}
