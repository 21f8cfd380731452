//! Field declaration options.
//!
//! [`PropertyOptions`] holds the settings every field decorator shares.
//! Each decorator has its own options struct embedding it; the shared
//! builder methods come from [`PropertyOptionsExt`].

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Array variant of a field.
///
/// `ArrayShape::default()` is a bare array without size bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayShape {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Exact length; overrides both bounds.
    pub length: Option<usize>,
    /// Wrap a single present value into a one-element array on input.
    pub force: bool,
}

impl ArrayShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Normalized `(min, max)` bounds.
    pub fn bounds(&self) -> (Option<usize>, Option<usize>) {
        (
            self.length.or(self.min_length),
            self.length.or(self.max_length),
        )
    }
}

/// Options shared by every field decorator.
///
/// `example` and `default` are stored in wire form: a single `T` for scalar
/// fields, a sequence of `T` for arrays.
pub struct PropertyOptions<T> {
    /// Key on the wire when it differs from the property name.
    pub name: Option<String>,
    pub optional: bool,
    pub nullable: bool,
    pub description: Option<String>,
    pub deprecated: bool,
    pub is_array: Option<ArrayShape>,
    pub example: Option<Value>,
    pub default: Option<Value>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for PropertyOptions<T> {
    fn default() -> Self {
        Self {
            name: None,
            optional: false,
            nullable: false,
            description: None,
            deprecated: false,
            is_array: None,
            example: None,
            default: None,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PropertyOptions<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            optional: self.optional,
            nullable: self.nullable,
            description: self.description.clone(),
            deprecated: self.deprecated,
            is_array: self.is_array.clone(),
            example: self.example.clone(),
            default: self.default.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PropertyOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyOptions")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("nullable", &self.nullable)
            .field("description", &self.description)
            .field("deprecated", &self.deprecated)
            .field("is_array", &self.is_array)
            .field("example", &self.example)
            .field("default", &self.default)
            .finish()
    }
}

impl<T> PropertyOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_array(&self) -> bool {
        self.is_array.is_some()
    }

    /// Same options for another value type.
    pub fn cast<U>(self) -> PropertyOptions<U> {
        PropertyOptions {
            name: self.name,
            optional: self.optional,
            nullable: self.nullable,
            description: self.description,
            deprecated: self.deprecated,
            is_array: self.is_array,
            example: self.example,
            default: self.default,
            _marker: PhantomData,
        }
    }
}

/// Shared builder methods of all decorator options.
pub trait PropertyOptionsExt<T: Serialize>: Sized {
    fn base(&self) -> &PropertyOptions<T>;

    fn base_mut(&mut self) -> &mut PropertyOptions<T>;

    /// Wire form of a value.
    fn encode(value: T) -> Option<Value> {
        serde_json::to_value(value).ok()
    }

    /// Rename the field on the wire.
    fn name(mut self, name: impl Into<String>) -> Self {
        self.base_mut().name = Some(name.into());
        self
    }

    /// The key may be missing.
    fn optional(mut self) -> Self {
        self.base_mut().optional = true;
        self
    }

    /// The value may be `null`.
    fn nullable(mut self) -> Self {
        self.base_mut().nullable = true;
        self
    }

    fn description(mut self, description: impl Into<String>) -> Self {
        self.base_mut().description = Some(description.into());
        self
    }

    fn deprecated(mut self) -> Self {
        self.base_mut().deprecated = true;
        self
    }

    /// Bare array of values.
    fn array(self) -> Self {
        self.array_shape(ArrayShape::default())
    }

    fn array_shape(mut self, shape: ArrayShape) -> Self {
        self.base_mut().is_array = Some(shape);
        self
    }

    fn example(mut self, value: impl Into<T>) -> Self {
        self.base_mut().example = Self::encode(value.into());
        self
    }

    fn example_items<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let items: Option<Vec<Value>> = values
            .into_iter()
            .map(|v| Self::encode(v.into()))
            .collect();
        self.base_mut().example = items.map(Value::Array);
        self
    }

    /// Substituted when the key is missing on input.
    fn default_value(mut self, value: impl Into<T>) -> Self {
        self.base_mut().default = Self::encode(value.into());
        self
    }

    fn default_items<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let items: Option<Vec<Value>> = values
            .into_iter()
            .map(|v| Self::encode(v.into()))
            .collect();
        self.base_mut().default = items.map(Value::Array);
        self
    }
}

impl<T: Serialize> PropertyOptionsExt<T> for PropertyOptions<T> {
    fn base(&self) -> &PropertyOptions<T> {
        self
    }

    fn base_mut(&mut self) -> &mut PropertyOptions<T> {
        self
    }
}

/// Implement [`PropertyOptionsExt`] for an options struct with a `base` field.
macro_rules! impl_property_options {
    ($options:ty, $value:ty) => {
        impl $crate::options::PropertyOptionsExt<$value> for $options {
            fn base(&self) -> &$crate::options::PropertyOptions<$value> {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::options::PropertyOptions<$value> {
                &mut self.base
            }
        }
    };
    ($options:ty, $value:ty, encode = $encode:path) => {
        impl $crate::options::PropertyOptionsExt<$value> for $options {
            fn base(&self) -> &$crate::options::PropertyOptions<$value> {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::options::PropertyOptions<$value> {
                &mut self.base
            }

            fn encode(value: $value) -> Option<serde_json::Value> {
                $encode(value)
            }
        }
    };
}

pub(crate) use impl_property_options;
