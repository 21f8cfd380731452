//! Conversion between wire data and DTOs.
//!
//! Input runs, per declared field: read the wire key, apply inbound
//! transforms, run the rules (unless the optional/nullable skip applies),
//! recurse into nested DTOs. When no field failed, the property-keyed map
//! is deserialized with `serde`. Output serializes with `serde`, applies
//! outbound transforms and renames properties to their wire names.

use crate::dto::{Dto, DtoSchema};
use crate::error::DtoError;
use crate::field::{FieldSpec, NestedType};
use crate::{trace_debug, trace_trace, trace_warn};
use apidto_validate::{
    FieldValue, RuleError, ValidationArguments, ValidationError, ValidationErrors,
};
use serde_json::{Map, Value};

/// Options of input and output conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Drop input keys that no field declares.
    pub whitelist: bool,
    /// With `whitelist`, report undeclared keys instead of dropping them.
    pub forbid_non_whitelisted: bool,
    /// Ignore undeclared keys without reporting them.
    pub exclude_extraneous_values: bool,
    /// Emit `null` for fields without a value on output.
    pub expose_unset_fields: bool,
}

impl Default for BindOptions {
    /// Strict body binding: undeclared keys are errors.
    fn default() -> Self {
        Self {
            whitelist: true,
            forbid_non_whitelisted: true,
            exclude_extraneous_values: false,
            expose_unset_fields: false,
        }
    }
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header binding: only declared headers are read, others are ignored.
    pub fn headers() -> Self {
        Self {
            whitelist: false,
            forbid_non_whitelisted: false,
            exclude_extraneous_values: true,
            expose_unset_fields: false,
        }
    }

    /// Query binding: undeclared parameters are dropped.
    pub fn query() -> Self {
        Self {
            whitelist: true,
            forbid_non_whitelisted: false,
            exclude_extraneous_values: false,
            expose_unset_fields: false,
        }
    }

    pub fn whitelist(mut self, whitelist: bool) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn forbid_non_whitelisted(mut self, forbid: bool) -> Self {
        self.forbid_non_whitelisted = forbid;
        self
    }

    pub fn exclude_extraneous_values(mut self, exclude: bool) -> Self {
        self.exclude_extraneous_values = exclude;
        self
    }

    pub fn expose_unset_fields(mut self, expose: bool) -> Self {
        self.expose_unset_fields = expose;
        self
    }
}

/// Bind and validate wire data with the default (strict) options.
pub fn input<T: Dto>(value: Value) -> Result<T, DtoError> {
    input_with(value, &BindOptions::default())
}

/// Bind and validate wire data into `T`.
pub fn input_with<T: Dto>(value: Value, options: &BindOptions) -> Result<T, DtoError> {
    let schema = T::schema();
    let map = match value {
        Value::Object(map) => map,
        _ => {
            trace_debug!(dto = schema.name(), "input is not an object");
            return Err(ValidationErrors::from(vec![ValidationError::unknown_value()]).into());
        }
    };

    let bound = bind_object(schema, &map, options).map_err(|errors| {
        trace_debug!(
            dto = schema.name(),
            errors = errors.len(),
            first = errors.first_message().unwrap_or_default(),
            "input rejected"
        );
        DtoError::Validation(errors)
    })?;

    let dto: T = serde_json::from_value(Value::Object(bound)).map_err(|source| {
        DtoError::Deserialize {
            dto: schema.name(),
            source,
        }
    })?;
    dto.check()?;
    Ok(dto)
}

/// Convert a DTO to wire data.
pub fn output<T: Dto>(dto: &T) -> Result<Value, DtoError> {
    output_with(dto, &BindOptions::default())
}

pub fn output_with<T: Dto>(dto: &T, options: &BindOptions) -> Result<Value, DtoError> {
    let schema = T::schema();
    let value = serde_json::to_value(dto).map_err(|source| DtoError::Serialize {
        dto: schema.name(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(Value::Object(output_object(schema, map, options))),
        other => Ok(other),
    }
}

/// Run the rules of one field against a value, without nested DTOs.
pub fn validate_field(
    property: &str,
    spec: &FieldSpec,
    value: &FieldValue,
) -> Option<ValidationError> {
    let mut error = ValidationError::new(property);
    if !spec.skips(value) {
        check_rules(property, spec, value, &mut error);
    }
    (!error.is_empty()).then_some(error)
}

fn check_rules(property: &str, spec: &FieldSpec, value: &FieldValue, error: &mut ValidationError) {
    let args = ValidationArguments::new(property, value);
    for rule in spec.rules() {
        if let Err(rule_error) = rule.validate(&args) {
            error.add(rule_error);
        }
    }
}

/// Bind one object against a schema, returning the property-keyed map.
pub fn bind_object(
    schema: &DtoSchema,
    input: &Map<String, Value>,
    options: &BindOptions,
) -> Result<Map<String, Value>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut out = Map::new();

    for (key, value) in input {
        if schema.declares_wire_name(key) {
            continue;
        }
        if options.whitelist && options.forbid_non_whitelisted {
            errors.push(ValidationError::not_whitelisted(key.as_str()));
        } else if !options.whitelist && !options.exclude_extraneous_values {
            out.insert(key.clone(), value.clone());
        }
    }

    for (property, spec) in schema.fields() {
        let raw = FieldValue::from_option(input.get(spec.wire_name(property)));
        let mut value = spec.apply_inbound(property, raw);
        trace_trace!(dto = schema.name(), property = *property, value = ?value, "field transformed");

        let mut error = ValidationError::new(*property);
        if !spec.skips(&value) {
            check_rules(property, spec, &value, &mut error);
            if let Some(nested) = spec.nested() {
                value = bind_nested(property, nested, value, options, &mut error);
            }
        }

        match value {
            FieldValue::Present(value) => {
                out.insert((*property).to_string(), value);
            }
            FieldValue::Failed(err) if error.is_empty() => {
                error.add(RuleError::new("transform", err.message));
            }
            _ => {}
        }
        errors.push(error);
    }

    errors.into_result().map(|()| out)
}

fn bind_nested(
    property: &str,
    nested: &NestedType,
    value: FieldValue,
    options: &BindOptions,
    error: &mut ValidationError,
) -> FieldValue {
    let schema = (nested.schema)();
    match value {
        FieldValue::Present(Value::Object(map)) if !nested.each => {
            match bind_object(schema, &map, options) {
                Ok(bound) => FieldValue::Present(Value::Object(bound)),
                Err(children) => {
                    error.children.extend(children.errors);
                    FieldValue::Present(Value::Object(map))
                }
            }
        }
        FieldValue::Present(Value::Array(items)) if nested.each => {
            let mut bound_items = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(map) => match bind_object(schema, &map, options) {
                        Ok(bound) => bound_items.push(Value::Object(bound)),
                        Err(children) => {
                            let mut element = ValidationError::new(index.to_string());
                            element.children = children.errors;
                            error.children.push(element);
                            bound_items.push(Value::Object(map));
                        }
                    },
                    other => {
                        if error.constraints.iter().all(|c| c.code != "nestedValidation") {
                            error.add(RuleError::new("nestedValidation", nested.message(property)));
                        }
                        bound_items.push(other);
                    }
                }
            }
            FieldValue::Present(Value::Array(bound_items))
        }
        FieldValue::Present(other) if nested.each && !other.is_object() => {
            error.add(RuleError::new("nestedValidation", nested.message(property)));
            FieldValue::Present(other)
        }
        other => other,
    }
}

fn output_object(
    schema: &DtoSchema,
    mut map: Map<String, Value>,
    options: &BindOptions,
) -> Map<String, Value> {
    let mut out = Map::new();

    for (property, spec) in schema.fields() {
        let raw = FieldValue::from_option(map.get(*property));
        map.remove(*property);
        let mut value = spec.apply_outbound(property, raw);
        if let Some(nested) = spec.nested() {
            value = value.map_present(|v| output_nested(nested, v, options));
        }

        let wire = spec.wire_name(property).to_string();
        match value {
            FieldValue::Present(Value::Null) if spec.optional() && !spec.nullable() => {
                if options.expose_unset_fields {
                    out.insert(wire, Value::Null);
                }
            }
            FieldValue::Present(value) => {
                out.insert(wire, value);
            }
            FieldValue::Absent => {
                if options.expose_unset_fields {
                    out.insert(wire, Value::Null);
                }
            }
            FieldValue::Failed(err) => {
                trace_warn!(
                    dto = schema.name(),
                    property = *property,
                    error = %err,
                    "outbound transform failed, field dropped"
                );
            }
        }
    }

    out.extend(map);
    out
}

fn output_nested(nested: &NestedType, value: Value, options: &BindOptions) -> Value {
    let schema = (nested.schema)();
    match value {
        Value::Object(map) => Value::Object(output_object(schema, map, options)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(output_object(schema, map, options)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}
