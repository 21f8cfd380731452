use crate::compose::compose;
use crate::field::{Behavior, FieldSpec};
use crate::options::{impl_property_options, PropertyOptions};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use serde_json::{Map, Value};

/// Options of a free-form JSON object field.
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    base: PropertyOptions<Map<String, Value>>,
    message: Option<String>,
    min_properties: Option<usize>,
    max_properties: Option<usize>,
}

impl ObjectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the "must be an object" message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn min_properties(mut self, min: usize) -> Self {
        self.min_properties = Some(min);
        self
    }

    pub fn max_properties(mut self, max: usize) -> Self {
        self.max_properties = Some(max);
        self
    }
}

impl_property_options!(ObjectOptions, Map<String, Value>);

pub fn is_object(options: ObjectOptions) -> FieldSpec {
    let each = options.base.is_array();
    let mut fragment = JsonSchema::object();
    fragment.min_properties = options.min_properties.map(|n| n as u64);
    fragment.max_properties = options.max_properties.map(|n| n as u64);

    let is_object = rules::is_object(each);
    let mut extras = vec![Behavior::rule(match options.message {
        Some(message) => is_object.message(message),
        None => is_object,
    })];
    if let Some(min) = options.min_properties.filter(|n| *n > 0) {
        extras.push(Behavior::rule(rules::min_properties(min, each)));
    }
    if let Some(max) = options.max_properties {
        extras.push(Behavior::rule(rules::max_properties(max, each)));
    }
    compose(fragment, &options.base, extras)
}
