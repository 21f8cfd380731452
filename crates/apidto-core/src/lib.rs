//! # apidto Core
//!
//! The composition engine, the field decorators built on it, wire binding
//! and the request extractors.
//!
//! This crate is not meant to be used directly. Use `apidto` instead.

mod binding;
mod compose;
pub mod decorators;
mod document;
mod dto;
mod error;
mod extract;
mod field;
pub mod nullable;
mod options;
mod tracing_macros;
mod transform;

// Public API
pub use binding::{bind_object, input, input_with, output, output_with, validate_field, BindOptions};
pub use compose::compose;
pub use document::{generate_schemas, object_schema, register_schema, OpenApiSpecExt};
pub use dto::{Dto, DtoEnum, DtoSchema, DtoSchemaBuilder};
pub use error::{ApiError, ConfigError, DtoError, Result};
pub use extract::{FromRequestParts, TypedHeaders, TypedQuery, ValidatedJson};
pub use field::{Behavior, Direction, FieldSpec, NestedType, Transform, TransformParams};
pub use options::{ArrayShape, PropertyOptions, PropertyOptionsExt};
pub use transform::transform_handling_optional;

#[doc(hidden)]
pub mod __private {
    pub use apidto_validate::ValidationErrors;
}
