//! # apidto
//!
//! One declaration per DTO field for validation rules, wire/value
//! transforms and the OpenAPI schema of the field.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apidto::prelude::*;
//!
//! #[derive(Serialize, Deserialize)]
//! struct CreatePet {
//!     name: String,
//!     age: Option<i64>,
//!     tags: Vec<String>,
//! }
//!
//! dto!(CreatePet {
//!     name => is_string(StringOptions::new().min_length(1).max_length(40)),
//!     age => is_number(NumberOptions::new().integer().min(0.0).optional()),
//!     tags => is_string(StringOptions::new().array_shape(ArrayShape::new().max_length(5))),
//! });
//!
//! let pet: CreatePet = apidto::input(json!({"name": "Rex", "tags": []}))?;
//! let wire = apidto::output(&pet)?;
//! let components = apidto::generate_schemas(&[CreatePet::schema()]);
//! ```
//!
//! ## Features
//!
//! - `tracing` (default) - debug logs for rejected input, trace logs per
//!   field transform, warnings for rejected requests

// Re-export core functionality
pub use apidto_core::*;

pub use apidto_openapi as openapi;
pub use apidto_validate as validate;

pub use apidto_openapi::{JsonSchema, OpenApiConfig, OpenApiSpec, Parameter, ParameterIn};
pub use apidto_validate::{
    rules, CustomValidate, FieldValue, Message, RuleError, TransformError, ValidateBy,
    ValidationArguments, ValidationError, ValidationErrors, ValidationOptions, ValidationRule,
};

// Re-exports for user convenience
pub use http;
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;

/// Prelude module - import everything you need with `use apidto::prelude::*`
pub mod prelude {
    pub use apidto_core::decorators::*;
    pub use apidto_core::{
        dto, input, input_with, output, output_with, ApiError, ArrayShape, BindOptions,
        ConfigError, Dto, DtoEnum, DtoError, FieldSpec, FromRequestParts, OpenApiSpecExt,
        PropertyOptionsExt, TypedHeaders, TypedQuery, ValidatedJson,
    };
    pub use apidto_openapi::{OpenApiSpec, ParameterIn};
    pub use apidto_validate::{
        rules, CustomValidate, FieldValue, Message, ValidationArguments, ValidationErrors,
        ValidationOptions,
    };

    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value};
}
