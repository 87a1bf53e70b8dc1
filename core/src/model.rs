#![deny(missing_docs)]

//! # Input Model
//!
//! The declarative tables the compiler consumes: the named schema registry,
//! the endpoint records, and the static document configuration.

use crate::value::DocValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named pool of JSON-Schema-like nodes, referenced as `#/components/schemas/<name>`.
///
/// Nodes are opaque to the compiler; `$ref` targets are not checked here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRegistry(IndexMap<String, DocValue>);

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a schema.
    pub fn insert(&mut self, name: impl Into<String>, schema: impl Into<DocValue>) {
        self.0.insert(name.into(), schema.into());
    }

    /// Adds a schema, builder style.
    pub fn with_schema(mut self, name: impl Into<String>, schema: impl Into<DocValue>) -> Self {
        self.insert(name, schema);
        self
    }

    /// Looks up a schema by name.
    pub fn get(&self, name: &str) -> Option<&DocValue> {
        self.0.get(name)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registry as a document mapping, in registration order.
    pub fn to_document(&self) -> DocValue {
        DocValue::Mapping(self.0.clone())
    }
}

/// Request body declaration of an endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBodySpec {
    /// Body schema, inline or `$ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<DocValue>,
}

/// One declared (path, method) operation.
///
/// Records are not required to be unique by (path, method).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    /// URL template, e.g. `/users/{id}`. Placeholders are not parsed.
    pub path: String,
    /// HTTP verb, any case.
    pub method: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description; alias notes are appended to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered tag labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Public endpoints carry no security requirement.
    #[serde(default)]
    pub public: bool,
    /// Alternate paths served by the same handler. Documentation only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Request body, always mandatory when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodySpec>,
    /// Status code to response object, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, DocValue>>,
}

impl EndpointRecord {
    /// Creates a protected record with no body and no responses.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the record public (no security requirement).
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// Adds an alias path.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the request body schema.
    pub fn with_request_schema(mut self, schema: impl Into<DocValue>) -> Self {
        self.request_body = Some(RequestBodySpec {
            schema: Some(schema.into()),
        });
        self
    }

    /// Adds a response for `status`.
    pub fn with_response(
        mut self,
        status: impl Into<String>,
        response: impl Into<DocValue>,
    ) -> Self {
        self.responses
            .get_or_insert_with(IndexMap::new)
            .insert(status.into(), response.into());
        self
    }
}

/// Top-level `info` block of the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentInfo {
    /// Creates info with the required fields.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self::new("tok-friends API", "1.0.0")
            .with_description("Auto-generated contract based on NestJS controllers.")
    }
}

/// One entry of the OpenAPI `servers` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server URL.
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServerInfo {
    /// Creates a server with the required URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the server description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Servers listed when the input table does not name any.
pub fn default_servers() -> Vec<ServerInfo> {
    vec![
        ServerInfo::new("https://api.tokfriends.app").with_description("Production (example)"),
        ServerInfo::new("http://localhost:4000").with_description("Local"),
    ]
}

/// A complete input table: document configuration, schemas and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSource {
    /// OpenAPI `info` block.
    #[serde(default)]
    pub info: DocumentInfo,
    /// OpenAPI `servers` list.
    #[serde(default = "default_servers")]
    pub servers: Vec<ServerInfo>,
    /// Schema registry.
    #[serde(default)]
    pub schemas: SchemaRegistry,
    /// Endpoint records in declaration order.
    #[serde(default)]
    pub endpoints: Vec<EndpointRecord>,
}

impl Default for ContractSource {
    fn default() -> Self {
        Self {
            info: DocumentInfo::default(),
            servers: default_servers(),
            schemas: SchemaRegistry::new(),
            endpoints: Vec::new(),
        }
    }
}
