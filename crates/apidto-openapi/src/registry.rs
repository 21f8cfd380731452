//! Named component schemas and `$ref` linking.

use crate::schema::JsonSchema;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default location of component schemas.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Collects named component schemas while property schemas are resolved.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    prefix: String,
    schemas: BTreeMap<String, JsonSchema>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_prefix(COMPONENTS_PREFIX)
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            schemas: BTreeMap::new(),
        }
    }

    /// `$ref` path of a component.
    pub fn ref_path(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&JsonSchema> {
        self.schemas.get(name)
    }

    /// Register a component. An existing component of the same name is kept.
    pub fn insert(&mut self, name: impl Into<String>, schema: JsonSchema) {
        self.schemas.entry(name.into()).or_insert(schema);
    }

    /// Register a component, replacing an existing one.
    pub fn set(&mut self, name: impl Into<String>, schema: JsonSchema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Resolve the markers of a property schema.
    ///
    /// Enums carrying a name are moved into a `{type, enum}` component and
    /// replaced by a reference. A reference with other keywords next to it
    /// is wrapped in `allOf`.
    pub fn resolve(&mut self, mut schema: JsonSchema) -> JsonSchema {
        if let Some(items) = schema.items.take() {
            schema.items = Some(Box::new(self.resolve(*items)));
        }
        if let Some(members) = schema.one_of.take() {
            schema.one_of = Some(members.into_iter().map(|m| self.resolve(m)).collect());
        }
        if let Some(members) = schema.all_of.take() {
            schema.all_of = Some(members.into_iter().map(|m| self.resolve(m)).collect());
        }
        if let Some(properties) = schema.properties.take() {
            schema.properties = Some(
                properties
                    .into_iter()
                    .map(|(name, property)| (name, self.resolve(property)))
                    .collect(),
            );
        }

        if let Some(name) = schema.enum_name.take() {
            let component = JsonSchema {
                schema_type: schema.schema_type.take(),
                enum_values: schema.enum_values.take(),
                ..Default::default()
            };
            self.insert(name.clone(), component);
            schema.component = Some(name);
        }

        if let Some(name) = schema.component.take() {
            let reference = JsonSchema::reference(self.ref_path(&name));
            if schema.has_siblings() {
                schema.all_of = Some(vec![reference]);
            } else {
                schema = reference;
            }
        }

        schema
    }

    pub fn schemas(&self) -> &BTreeMap<String, JsonSchema> {
        &self.schemas
    }

    /// Components rendered as JSON values.
    pub fn to_values(&self) -> BTreeMap<String, Value> {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.clone(), schema.to_value()))
            .collect()
    }
}
