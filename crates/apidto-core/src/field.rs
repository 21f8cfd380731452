//! Combined field annotation produced by [`compose`](crate::compose).

use crate::dto::DtoSchema;
use apidto_openapi::JsonSchema;
use apidto_validate::{FieldValue, ValidationRule};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Which conversion a transform takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Wire data to DTO.
    Inbound,
    /// DTO to wire data.
    Outbound,
    /// Runs on input and on output, e.g. a symmetric normalisation.
    Both,
}

/// Arguments of a transform call.
#[derive(Debug, Clone, Copy)]
pub struct TransformParams<'a> {
    /// Property name of the field.
    pub key: &'a str,
    pub value: &'a FieldValue,
}

type TransformFn = Arc<dyn Fn(&TransformParams<'_>) -> FieldValue + Send + Sync>;

/// A value conversion attached to a field.
#[derive(Clone)]
pub struct Transform {
    direction: Direction,
    f: TransformFn,
}

impl Transform {
    pub fn new<F>(direction: Direction, f: F) -> Self
    where
        F: Fn(&TransformParams<'_>) -> FieldValue + Send + Sync + 'static,
    {
        Self {
            direction,
            f: Arc::new(f),
        }
    }

    pub fn inbound<F>(f: F) -> Self
    where
        F: Fn(&TransformParams<'_>) -> FieldValue + Send + Sync + 'static,
    {
        Self::new(Direction::Inbound, f)
    }

    pub fn outbound<F>(f: F) -> Self
    where
        F: Fn(&TransformParams<'_>) -> FieldValue + Send + Sync + 'static,
    {
        Self::new(Direction::Outbound, f)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn applies_to(&self, direction: Direction) -> bool {
        self.direction == Direction::Both || self.direction == direction
    }

    pub fn apply(&self, key: &str, value: &FieldValue) -> FieldValue {
        (self.f)(&TransformParams { key, value })
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Link from a field to the DTO it nests.
#[derive(Clone, Copy)]
pub struct NestedType {
    /// Component name of the nested DTO.
    pub name: &'static str,
    pub schema: fn() -> &'static DtoSchema,
    /// The field holds an array of nested DTOs.
    pub each: bool,
}

impl NestedType {
    /// Message reported when the value is not an object (or, for arrays,
    /// holds something other than objects).
    pub fn message(&self, property: &str) -> String {
        if self.each {
            format!("nested property {property} must only contain objects")
        } else {
            format!("nested property {property} must be an object")
        }
    }
}

impl fmt::Debug for NestedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedType")
            .field("name", &self.name)
            .field("each", &self.each)
            .finish()
    }
}

/// One primitive behaviour of a field.
#[derive(Clone)]
pub enum Behavior {
    Noop,
    /// Wire name of the field.
    Expose { name: Option<String> },
    /// Substituted on input when the key is missing.
    Default(Value),
    /// Wrap a single present value into an array on input.
    Force,
    /// Skip validation when the key is missing.
    SkipIfAbsent,
    /// Skip validation when the value is `null`.
    SkipIfNull,
    Rule(Arc<dyn ValidationRule>),
    Transform(Transform),
    Nested(NestedType),
    Schema(JsonSchema),
}

impl Behavior {
    pub fn rule(rule: impl ValidationRule + 'static) -> Self {
        Self::Rule(Arc::new(rule))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Expose { name } => f.debug_struct("Expose").field("name", name).finish(),
            Self::Default(value) => f.debug_tuple("Default").field(value).finish(),
            Self::Force => f.write_str("Force"),
            Self::SkipIfAbsent => f.write_str("SkipIfAbsent"),
            Self::SkipIfNull => f.write_str("SkipIfNull"),
            Self::Rule(rule) => f.debug_tuple("Rule").field(&rule.rule_name()).finish(),
            Self::Transform(transform) => f.debug_tuple("Transform").field(transform).finish(),
            Self::Nested(nested) => f.debug_tuple("Nested").field(nested).finish(),
            Self::Schema(schema) => f.debug_tuple("Schema").field(schema).finish(),
        }
    }
}

/// Everything declared about one DTO field.
///
/// Immutable once built; shared by binding, validation and documents.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    behaviors: Vec<Behavior>,
}

impl FieldSpec {
    pub fn new(behaviors: Vec<Behavior>) -> Self {
        Self { behaviors }
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// Key used on the wire for `property`.
    pub fn wire_name<'a>(&'a self, property: &'a str) -> &'a str {
        self.behaviors
            .iter()
            .find_map(|b| match b {
                Behavior::Expose { name: Some(name) } => Some(name.as_str()),
                _ => None,
            })
            .unwrap_or(property)
    }

    pub fn optional(&self) -> bool {
        self.behaviors
            .iter()
            .any(|b| matches!(b, Behavior::SkipIfAbsent))
    }

    pub fn nullable(&self) -> bool {
        self.behaviors.iter().any(|b| matches!(b, Behavior::SkipIfNull))
    }

    /// Listed in the object schema's `required`.
    pub fn required(&self) -> bool {
        !self.optional()
    }

    /// Whether rules are skipped for this value.
    pub fn skips(&self, value: &FieldValue) -> bool {
        (self.optional() && value.is_absent()) || (self.nullable() && value.is_null())
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn ValidationRule> {
        self.behaviors.iter().filter_map(|b| match b {
            Behavior::Rule(rule) => Some(rule.as_ref()),
            _ => None,
        })
    }

    pub fn nested(&self) -> Option<&NestedType> {
        self.behaviors.iter().find_map(|b| match b {
            Behavior::Nested(nested) => Some(nested),
            _ => None,
        })
    }

    pub fn schema(&self) -> Option<&JsonSchema> {
        self.behaviors.iter().find_map(|b| match b {
            Behavior::Schema(schema) => Some(schema),
            _ => None,
        })
    }

    /// Run the input side of the field in declaration order: default,
    /// force, then inbound transforms.
    pub fn apply_inbound(&self, property: &str, mut value: FieldValue) -> FieldValue {
        for behavior in &self.behaviors {
            value = match behavior {
                Behavior::Default(default) if value.is_absent() => {
                    FieldValue::Present(default.clone())
                }
                Behavior::Force => value.map_present(|v| match v {
                    Value::Array(_) | Value::Null => v,
                    scalar => Value::Array(vec![scalar]),
                }),
                Behavior::Transform(t) if t.applies_to(Direction::Inbound) => {
                    t.apply(property, &value)
                }
                _ => value,
            };
        }
        value
    }

    /// Run the outbound transforms in declaration order.
    pub fn apply_outbound(&self, property: &str, mut value: FieldValue) -> FieldValue {
        for behavior in &self.behaviors {
            if let Behavior::Transform(t) = behavior {
                if t.applies_to(Direction::Outbound) {
                    value = t.apply(property, &value);
                }
            }
        }
        value
    }
}
