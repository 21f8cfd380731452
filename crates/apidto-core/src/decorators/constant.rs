use crate::compose::compose;
use crate::error::ConfigError;
use crate::field::{Behavior, FieldSpec};
use crate::options::{PropertyOptions, PropertyOptionsExt};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use serde::Serialize;
use serde_json::Value;

/// Options of a field holding one fixed value.
///
/// Combined with a fixed-length array it describes tuples such as
/// `[1, 1, 1]`.
#[derive(Debug, Clone)]
pub struct ConstantOptions<T = Value> {
    base: PropertyOptions<T>,
    value: Value,
}

impl<T: Serialize> ConstantOptions<T> {
    pub fn new(value: T) -> Result<Self, ConfigError> {
        Ok(Self {
            base: PropertyOptions::default(),
            value: ConfigError::to_json_value("constant", value)?,
        })
    }
}

impl<T: Serialize> PropertyOptionsExt<T> for ConstantOptions<T> {
    fn base(&self) -> &PropertyOptions<T> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyOptions<T> {
        &mut self.base
    }
}

pub fn is_constant<T: Serialize>(options: ConstantOptions<T>) -> FieldSpec {
    let each = options.base.is_array();
    let fragment = JsonSchema {
        enum_values: Some(vec![options.value.clone()]),
        ..Default::default()
    };
    compose(
        fragment,
        &options.base,
        vec![Behavior::rule(rules::equals(options.value, each))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn keeps_the_serialized_value() {
        let options = ConstantOptions::new([1, 2]).unwrap();
        assert_eq!(options.value, json!([1, 2]));
    }

    #[test]
    fn unserializable_values_are_config_errors() {
        let keyed_by_pairs = BTreeMap::from([((1, 2), "a")]);
        match ConstantOptions::new(keyed_by_pairs) {
            Err(ConfigError::UnrepresentableValue { context, .. }) => {
                assert_eq!(context, "constant")
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }
}
