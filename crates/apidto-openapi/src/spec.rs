//! OpenAPI document types

use crate::config::OpenApiConfig;
use crate::registry::ComponentRegistry;
use crate::schema::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::openapi::schema::Schema;
use utoipa::openapi::RefOr;

/// API information for OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI document builder
#[derive(Debug, Clone)]
pub struct OpenApiSpec {
    pub openapi: String,
    pub info: ApiInfo,
    pub paths: BTreeMap<String, PathItem>,
    pub components: ComponentRegistry,
}

/// Path item in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

/// Operation (endpoint) in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, ResponseSpec>,
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    Query,
    Header,
    Path,
}

/// Parameter in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterIn,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    pub schema: JsonSchema,
}

/// Request body in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

/// Media type in OpenAPI spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: JsonSchema,
}

/// Response specification
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseSpec {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

impl OpenApiSpec {
    /// Create a new OpenAPI specification
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self::from_config(&OpenApiConfig::new(title, version))
    }

    pub fn from_config(config: &OpenApiConfig) -> Self {
        Self {
            openapi: config.openapi_version.clone(),
            info: ApiInfo {
                title: config.title.clone(),
                version: config.version.clone(),
                description: config.description.clone(),
            },
            paths: BTreeMap::new(),
            components: ComponentRegistry::with_prefix(config.components_prefix.clone()),
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.info.description = Some(desc.into());
        self
    }

    /// Add a path operation. Component links and named enums in its
    /// schemas are resolved against the registry.
    pub fn path(mut self, path: &str, method: &str, mut operation: Operation) -> Self {
        self.resolve_operation(&mut operation);
        let item = self.paths.entry(path.to_string()).or_default();
        match method.to_uppercase().as_str() {
            "GET" => item.get = Some(operation),
            "POST" => item.post = Some(operation),
            "PUT" => item.put = Some(operation),
            "PATCH" => item.patch = Some(operation),
            "DELETE" => item.delete = Some(operation),
            _ => {}
        }
        self
    }

    fn resolve_operation(&mut self, operation: &mut Operation) {
        for parameter in &mut operation.parameters {
            parameter.schema = self.components.resolve(std::mem::take(&mut parameter.schema));
        }
        let bodies = operation
            .request_body
            .iter_mut()
            .flat_map(|body| body.content.values_mut());
        let responses = operation
            .responses
            .values_mut()
            .filter_map(|response| response.content.as_mut())
            .flat_map(|content| content.values_mut());
        for media in bodies.chain(responses) {
            media.schema = self.components.resolve(std::mem::take(&mut media.schema));
        }
    }

    /// Add a schema definition
    pub fn schema(mut self, name: &str, schema: JsonSchema) -> Self {
        let schema = self.components.resolve(schema);
        self.components.insert(name, schema);
        self
    }

    /// Register a type that implements `utoipa::ToSchema`
    pub fn register<T: for<'a> utoipa::ToSchema<'a>>(mut self) -> Self {
        let (name, schema) = T::schema();
        let converted =
            serde_json::to_value(schema).and_then(serde_json::from_value::<JsonSchema>);
        if let Ok(schema) = converted {
            self.components.insert(name, schema);
        }
        self
    }

    /// `$ref` to a registered component
    pub fn reference(&self, name: &str) -> JsonSchema {
        JsonSchema::reference(self.components.ref_path(name))
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        let mut spec = serde_json::json!({
            "openapi": self.openapi,
            "info": self.info,
            "paths": self.paths,
        });

        if !self.components.schemas().is_empty() {
            spec["components"] = serde_json::json!({
                "schemas": self.components.to_values()
            });
        }

        spec
    }
}

/// Convert a schema into its `utoipa` counterpart.
pub fn to_utoipa(schema: &JsonSchema) -> Result<RefOr<Schema>, serde_json::Error> {
    serde_json::from_value(schema.to_value())
}

impl Operation {
    /// Create a new operation
    pub fn new() -> Self {
        Self {
            summary: None,
            parameters: Vec::new(),
            request_body: None,
            responses: BTreeMap::from([(
                "200".to_string(),
                ResponseSpec {
                    description: "Successful response".to_string(),
                    content: None,
                },
            )]),
        }
    }

    /// Set summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// JSON request body with the given schema
    pub fn json_body(mut self, schema: JsonSchema) -> Self {
        self.request_body = Some(RequestBody {
            required: true,
            content: BTreeMap::from([("application/json".to_string(), MediaType { schema })]),
        });
        self
    }

    /// Add a JSON response
    pub fn response(
        mut self,
        status: u16,
        description: impl Into<String>,
        schema: JsonSchema,
    ) -> Self {
        self.responses.insert(
            status.to_string(),
            ResponseSpec {
                description: description.into(),
                content: Some(BTreeMap::from([(
                    "application/json".to_string(),
                    MediaType { schema },
                )])),
            },
        );
        self
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_shape() {
        let spec = OpenApiSpec::new("Pets", "1.0.0")
            .schema("Color", JsonSchema::named_enum("Color", vec![json!("red")]))
            .path(
                "/pets",
                "post",
                Operation::new().summary("Create").json_body(JsonSchema::component("Pet")),
            );

        let doc = spec.to_json();
        assert_eq!(doc["openapi"], "3.0.3");
        assert_eq!(doc["info"]["title"], "Pets");
        assert_eq!(
            doc["components"]["schemas"]["Color"],
            json!({"type": "string", "enum": ["red"]})
        );
        assert_eq!(
            doc["paths"]["/pets"]["post"]["requestBody"]["content"]["application/json"]["schema"],
            json!({"$ref": "#/components/schemas/Pet"})
        );
    }

    #[test]
    fn parameter_location_is_lowercase() {
        let parameter = Parameter {
            name: "x-tenant".to_string(),
            location: ParameterIn::Header,
            required: true,
            description: None,
            deprecated: None,
            schema: JsonSchema::string(),
        };
        assert_eq!(
            serde_json::to_value(&parameter).unwrap(),
            json!({"name": "x-tenant", "in": "header", "required": true, "schema": {"type": "string"}})
        );
    }

    #[test]
    fn registers_utoipa_schema() {
        #[derive(utoipa::ToSchema)]
        #[allow(dead_code)]
        struct Pet {
            name: String,
        }

        let spec = OpenApiSpec::new("Pets", "1.0.0").register::<Pet>();
        let pet = spec.components.get("Pet").unwrap();
        assert_eq!(pet.schema_type.as_deref(), Some("object"));
        assert!(pet.properties.as_ref().unwrap().contains_key("name"));
    }

    #[test]
    fn converts_to_utoipa() {
        let mut schema = JsonSchema::string();
        schema.min_length = Some(2);
        assert!(to_utoipa(&schema).is_ok());
    }
}
