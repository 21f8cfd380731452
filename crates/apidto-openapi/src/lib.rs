//! # apidto OpenAPI
//!
//! Schema objects attached to DTO fields, the registry that turns named
//! enums and nested DTOs into `components.schemas` entries, and a small
//! document builder.
//!
//! ```rust,ignore
//! use apidto_openapi::{JsonSchema, OpenApiSpec};
//!
//! let spec = OpenApiSpec::new("Pets", "1.0.0")
//!     .schema("Pet", JsonSchema::object().with_property("name", JsonSchema::string()));
//! println!("{}", spec.to_json());
//! ```

mod config;
mod registry;
mod schema;
mod spec;

pub use config::OpenApiConfig;
pub use registry::{ComponentRegistry, COMPONENTS_PREFIX};
pub use schema::JsonSchema;
pub use spec::{
    to_utoipa, ApiInfo, MediaType, OpenApiSpec, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, ResponseSpec,
};

// Re-export utoipa for users who mix in `#[derive(ToSchema)]` types
pub use utoipa;
