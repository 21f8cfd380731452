use crate::compose::compose;
use crate::dto::DtoEnum;
use crate::error::ConfigError;
use crate::field::{Behavior, FieldSpec};
use crate::options::{PropertyOptions, PropertyOptionsExt};
use apidto_openapi::JsonSchema;
use apidto_validate::rules;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn identifier() -> &'static Regex {
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap())
}

/// Options of a field restricted to a named set of values.
///
/// The name becomes the component the field schema refers to; fields
/// sharing a name share the component.
#[derive(Debug, Clone)]
pub struct EnumOptions<T = Value> {
    base: PropertyOptions<T>,
    name: String,
    values: Vec<Value>,
}

impl<T: Serialize> EnumOptions<T> {
    /// Enum component `name` with the given values.
    pub fn named(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !identifier().is_match(&name) {
            return Err(ConfigError::InvalidEnumName(name));
        }
        let values = values
            .into_iter()
            .map(|value| ConfigError::to_json_value("enum", value))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            base: PropertyOptions::default(),
            name,
            values,
        })
    }

    /// Name and values from a record holding exactly one entry, e.g.
    /// `[("Color", vec!["red", "blue"])]`.
    pub fn from_record<K, V>(record: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: Into<String>,
        V: IntoIterator<Item = T>,
    {
        let mut entries = record.into_iter();
        match (entries.next(), entries.next()) {
            (Some((name, values)), None) => Self::named(name, values),
            _ => Err(ConfigError::EnumOptionsShape),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl<E: DtoEnum> EnumOptions<E> {
    /// Name and variants of a Rust enum.
    pub fn of() -> Result<Self, ConfigError> {
        Self::named(E::NAME, E::variants())
    }
}

impl<T: Serialize> PropertyOptionsExt<T> for EnumOptions<T> {
    fn base(&self) -> &PropertyOptions<T> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyOptions<T> {
        &mut self.base
    }
}

/// With `ArrayShape::force` the items still refer to the component, which
/// keeps array query parameters documented by reference.
pub fn is_enum<T: Serialize>(options: EnumOptions<T>) -> FieldSpec {
    let each = options.base.is_array();
    compose(
        JsonSchema::named_enum(options.name.as_str(), options.values.clone()),
        &options.base,
        vec![Behavior::rule(rules::is_in(options.values, each))],
    )
}
