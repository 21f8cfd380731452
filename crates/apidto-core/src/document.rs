//! OpenAPI documents from DTO schemas.
//!
//! Every DTO becomes an object component keyed by its name. Property
//! schemas are the fragments merged by `compose`, keyed by wire name, with
//! named enums and nested DTOs turned into components of their own.

use crate::dto::{Dto, DtoSchema};
use crate::field::FieldSpec;
use crate::trace_debug;
use apidto_openapi::{ComponentRegistry, JsonSchema, OpenApiSpec, Parameter, ParameterIn};
use serde_json::Value;
use std::collections::BTreeMap;

/// Component schemas of `schemas` and every DTO they nest, as JSON.
pub fn generate_schemas(schemas: &[&DtoSchema]) -> BTreeMap<String, Value> {
    let mut registry = ComponentRegistry::new();
    for schema in schemas {
        register_schema(&mut registry, schema);
    }
    registry.to_values()
}

/// Register the object component of `schema`, and of the DTOs it nests.
/// A DTO already in the registry is left as it is.
pub fn register_schema(registry: &mut ComponentRegistry, schema: &DtoSchema) {
    if registry.contains(schema.name()) {
        return;
    }
    // placeholder so a DTO nesting itself terminates
    registry.set(schema.name(), JsonSchema::object());
    let object = object_schema(registry, schema);
    registry.set(schema.name(), object);
    trace_debug!(dto = schema.name(), "component registered");
}

/// Object schema of a DTO with resolved property schemas.
pub fn object_schema(registry: &mut ComponentRegistry, schema: &DtoSchema) -> JsonSchema {
    let mut object = JsonSchema::object();
    for (property, spec) in schema.fields() {
        let wire = spec.wire_name(property);
        let resolved = property_schema(registry, spec);
        object = object.with_property(wire, resolved);
        if spec.required() {
            object = object.with_required(wire);
        }
    }
    object
}

fn property_schema(registry: &mut ComponentRegistry, spec: &FieldSpec) -> JsonSchema {
    if let Some(nested) = spec.nested() {
        register_schema(registry, (nested.schema)());
    }
    let fragment = spec.schema().cloned().unwrap_or_default();
    registry.resolve(fragment)
}

/// DTO support for [`OpenApiSpec`].
pub trait OpenApiSpecExt: Sized {
    /// Add the component of `T` and of the DTOs it nests.
    fn register_dto<T: Dto>(self) -> Self;

    /// One parameter per field of `T`, e.g. for query strings and header
    /// DTOs. Components the fields refer to are registered.
    fn parameters_for<T: Dto>(&mut self, location: ParameterIn) -> Vec<Parameter>;
}

impl OpenApiSpecExt for OpenApiSpec {
    fn register_dto<T: Dto>(mut self) -> Self {
        register_schema(&mut self.components, T::schema());
        self
    }

    fn parameters_for<T: Dto>(&mut self, location: ParameterIn) -> Vec<Parameter> {
        T::schema()
            .fields()
            .iter()
            .map(|(property, spec)| {
                let mut schema = property_schema(&mut self.components, spec);
                Parameter {
                    name: spec.wire_name(property).to_string(),
                    location,
                    required: spec.required(),
                    description: schema.description.take(),
                    deprecated: schema.deprecated.take(),
                    schema,
                }
            })
            .collect()
    }
}
