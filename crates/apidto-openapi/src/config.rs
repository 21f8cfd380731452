//! OpenAPI configuration

use crate::registry::COMPONENTS_PREFIX;

/// Configuration for OpenAPI documentation
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    pub description: Option<String>,
    /// `openapi` field of the document
    pub openapi_version: String,
    /// Prefix of component `$ref` paths
    pub components_prefix: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "apidto Application".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            openapi_version: "3.0.3".to_string(),
            components_prefix: COMPONENTS_PREFIX.to_string(),
        }
    }
}

impl OpenApiConfig {
    /// Create a new OpenAPI configuration
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set API description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi_version = version.into();
        self
    }

    pub fn components_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.components_prefix = prefix.into();
        self
    }
}
