#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! The path-keyed document: `paths[path][method]` holds exactly one operation,
//! so duplicate input records collapse to the last one declared.
//!
//! Only the keywords this generator emits are modelled: `paths`, operations,
//! `requestBody`, `responses`, `security`, `components.schemas`,
//! `components.securitySchemes`.

use crate::model::{DocumentInfo, SchemaRegistry, ServerInfo};
use crate::value::{DocValue, Mapping};
use indexmap::IndexMap;

/// Version string written to the `openapi` field.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Key of the single security scheme under `components.securitySchemes`.
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Media type of every request body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A `components.securitySchemes` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityScheme {
    /// `type`, e.g. `http`.
    pub kind: String,
    /// HTTP auth scheme, e.g. `bearer`.
    pub scheme: String,
    /// Token format hint.
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    /// HTTP bearer authentication with JWT tokens.
    pub fn bearer_jwt() -> Self {
        Self {
            kind: "http".to_string(),
            scheme: "bearer".to_string(),
            bearer_format: Some("JWT".to_string()),
        }
    }

    fn to_document(&self) -> DocValue {
        let mut obj = Mapping::new();
        obj.insert("type".to_string(), self.kind.as_str().into());
        obj.insert("scheme".to_string(), self.scheme.as_str().into());
        if let Some(format) = &self.bearer_format {
            obj.insert("bearerFormat".to_string(), format.as_str().into());
        }
        DocValue::Mapping(obj)
    }
}

/// One security requirement object: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// A request body. Always `required: true` with a single JSON media type.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// Body schema, inline or `$ref`.
    pub schema: DocValue,
}

impl RequestBody {
    fn to_document(&self) -> DocValue {
        let mut media = Mapping::new();
        media.insert("schema".to_string(), self.schema.clone());
        let mut content = Mapping::new();
        content.insert(JSON_MEDIA_TYPE.to_string(), DocValue::Mapping(media));

        let mut obj = Mapping::new();
        obj.insert("required".to_string(), true.into());
        obj.insert("content".to_string(), DocValue::Mapping(content));
        DocValue::Mapping(obj)
    }
}

/// An OpenAPI operation object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    /// Summary, omitted when absent.
    pub summary: Option<String>,
    /// Tags, omitted when absent.
    pub tags: Option<Vec<String>>,
    /// Responses by status code; never absent.
    pub responses: IndexMap<String, DocValue>,
    /// `None` means the field is left out entirely.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Request body, if any.
    pub request_body: Option<RequestBody>,
    /// Description, including any alias note.
    pub description: Option<String>,
}

impl Operation {
    /// Renders the operation object.
    pub fn to_document(&self) -> DocValue {
        let mut op = Mapping::new();
        if let Some(summary) = &self.summary {
            op.insert("summary".to_string(), summary.as_str().into());
        }
        if let Some(tags) = &self.tags {
            op.insert(
                "tags".to_string(),
                DocValue::Sequence(tags.iter().map(|t| DocValue::from(t.as_str())).collect()),
            );
        }
        op.insert(
            "responses".to_string(),
            DocValue::Mapping(self.responses.clone()),
        );
        if let Some(requirements) = &self.security {
            op.insert("security".to_string(), security_value(requirements));
        }
        if let Some(body) = &self.request_body {
            op.insert("requestBody".to_string(), body.to_document());
        }
        if let Some(desc) = &self.description {
            op.insert("description".to_string(), desc.as_str().into());
        }
        DocValue::Mapping(op)
    }
}

fn security_value(requirements: &[SecurityRequirement]) -> DocValue {
    let entries = requirements
        .iter()
        .map(|req| {
            let obj: Mapping = req
                .iter()
                .map(|(name, scopes)| {
                    let scopes = scopes.iter().map(|s| DocValue::from(s.as_str())).collect();
                    (name.clone(), DocValue::Sequence(scopes))
                })
                .collect();
            DocValue::Mapping(obj)
        })
        .collect();
    DocValue::Sequence(entries)
}

/// Operations of one path, keyed by lower-case method.
pub type PathItem = IndexMap<String, Operation>;

/// The generated OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    /// `openapi` version field.
    pub openapi: String,
    /// `info` block.
    pub info: DocumentInfo,
    /// `servers` list.
    pub servers: Vec<ServerInfo>,
    /// `components.schemas`.
    pub schemas: SchemaRegistry,
    /// `components.securitySchemes`.
    pub security_schemes: IndexMap<String, SecurityScheme>,
    /// `paths`, in first-declaration order.
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApiDocument {
    /// Creates a document with no paths and the bearer scheme registered.
    pub fn new(info: DocumentInfo, servers: Vec<ServerInfo>, schemas: SchemaRegistry) -> Self {
        let mut security_schemes = IndexMap::new();
        security_schemes.insert(BEARER_SCHEME.to_string(), SecurityScheme::bearer_jwt());
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            servers,
            schemas,
            security_schemes,
            paths: IndexMap::new(),
        }
    }

    /// Stores `op` under `paths[path][method]`, returning the operation it replaced.
    pub fn insert_operation(
        &mut self,
        path: &str,
        method: &str,
        op: Operation,
    ) -> Option<Operation> {
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(method.to_ascii_lowercase(), op)
    }

    /// Looks up an operation; `method` is matched case-insensitively.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths
            .get(path)
            .and_then(|item| item.get(&method.to_ascii_lowercase()))
    }

    /// Total number of (path, method) operations.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }

    /// Renders the whole document.
    pub fn to_document(&self) -> DocValue {
        let mut doc = Mapping::new();
        doc.insert("openapi".to_string(), self.openapi.as_str().into());
        doc.insert("info".to_string(), info_value(&self.info));
        doc.insert(
            "servers".to_string(),
            DocValue::Sequence(self.servers.iter().map(server_value).collect()),
        );

        let schemes: Mapping = self
            .security_schemes
            .iter()
            .map(|(name, scheme)| (name.clone(), scheme.to_document()))
            .collect();
        let mut components = Mapping::new();
        components.insert("schemas".to_string(), self.schemas.to_document());
        components.insert("securitySchemes".to_string(), DocValue::Mapping(schemes));
        doc.insert("components".to_string(), DocValue::Mapping(components));

        let paths: Mapping = self
            .paths
            .iter()
            .map(|(path, item)| {
                let ops: Mapping = item
                    .iter()
                    .map(|(method, op)| (method.clone(), op.to_document()))
                    .collect();
                (path.clone(), DocValue::Mapping(ops))
            })
            .collect();
        doc.insert("paths".to_string(), DocValue::Mapping(paths));
        DocValue::Mapping(doc)
    }
}

fn info_value(info: &DocumentInfo) -> DocValue {
    let mut obj = Mapping::new();
    obj.insert("title".to_string(), info.title.as_str().into());
    obj.insert("version".to_string(), info.version.as_str().into());
    if let Some(desc) = &info.description {
        obj.insert("description".to_string(), desc.as_str().into());
    }
    DocValue::Mapping(obj)
}

fn server_value(server: &ServerInfo) -> DocValue {
    let mut obj = Mapping::new();
    obj.insert("url".to_string(), server.url.as_str().into());
    if let Some(desc) = &server.description {
        obj.insert("description".to_string(), desc.as_str().into());
    }
    DocValue::Mapping(obj)
}
