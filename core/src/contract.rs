#![deny(missing_docs)]

//! # Flat Contract
//!
//! The denormalized endpoint list: one entry per input record, in input order,
//! duplicates included. Contract tests diff this list against the routes a
//! live server reports.

use crate::clock::format_timestamp;
use crate::model::{EndpointRecord, SchemaRegistry};
use crate::value::{DocValue, Mapping};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Name of the default authentication scheme reported in metadata.
pub const DEFAULT_AUTH: &str = "bearer";

/// Summary of a single endpoint record.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEndpoint {
    /// URL template.
    pub path: String,
    /// Upper-case HTTP verb.
    pub method: String,
    /// Summary, if declared.
    pub summary: Option<String>,
    /// Tags, if declared.
    pub tags: Option<Vec<String>>,
    /// Whether the endpoint is unauthenticated.
    pub public: bool,
    /// Alias paths, verbatim.
    pub aliases: Vec<String>,
    /// Request body schema, if a body with a schema is declared.
    pub request_schema: Option<DocValue>,
    /// Responses, verbatim.
    pub responses: IndexMap<String, DocValue>,
}

impl FlatEndpoint {
    /// Summarizes a record.
    pub fn from_record(record: &EndpointRecord) -> Self {
        Self {
            path: record.path.clone(),
            method: record.method.to_ascii_uppercase(),
            summary: record.summary.clone(),
            tags: record.tags.clone(),
            public: record.public,
            aliases: record.aliases.clone(),
            request_schema: record
                .request_body
                .as_ref()
                .and_then(|body| body.schema.clone()),
            responses: record.responses.clone().unwrap_or_default(),
        }
    }

    /// Renders the entry. Absent optional fields render as `null` so every
    /// entry has the same keys.
    pub fn to_document(&self) -> DocValue {
        let mut obj = Mapping::new();
        obj.insert("path".to_string(), self.path.as_str().into());
        obj.insert("method".to_string(), self.method.as_str().into());
        obj.insert("summary".to_string(), self.summary.clone().into());
        obj.insert("tags".to_string(), string_list(self.tags.as_deref()));
        obj.insert("public".to_string(), self.public.into());
        obj.insert("aliases".to_string(), string_list(Some(&self.aliases)));
        obj.insert("requestSchema".to_string(), self.request_schema.clone().into());
        obj.insert(
            "responses".to_string(),
            DocValue::Mapping(self.responses.clone()),
        );
        DocValue::Mapping(obj)
    }
}

/// The `metadata` block of the flat contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractMetadata {
    /// Generation instant.
    pub generated_at: DateTime<Utc>,
    /// Number of endpoint entries, duplicates included.
    pub endpoint_count: usize,
    /// Default authentication scheme.
    pub default_auth: String,
    /// Paths of public records, in input order, duplicates included.
    pub public_endpoints: Vec<String>,
}

impl ContractMetadata {
    /// Renders the metadata block.
    pub fn to_document(&self) -> DocValue {
        let mut auth = Mapping::new();
        auth.insert("default".to_string(), self.default_auth.as_str().into());
        auth.insert(
            "publicEndpoints".to_string(),
            string_list(Some(&self.public_endpoints)),
        );

        let mut obj = Mapping::new();
        obj.insert(
            "generatedAt".to_string(),
            format_timestamp(self.generated_at).into(),
        );
        obj.insert("endpointCount".to_string(), self.endpoint_count.into());
        obj.insert("authentication".to_string(), DocValue::Mapping(auth));
        DocValue::Mapping(obj)
    }
}

/// The full flat contract document.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatContract {
    /// Generation metadata.
    pub metadata: ContractMetadata,
    /// Copy of the input schema registry.
    pub schemas: SchemaRegistry,
    /// One entry per input record.
    pub endpoints: Vec<FlatEndpoint>,
}

impl FlatContract {
    /// Renders `{metadata, components: {schemas}, endpoints}`.
    pub fn to_document(&self) -> DocValue {
        let mut components = Mapping::new();
        components.insert("schemas".to_string(), self.schemas.to_document());

        let mut obj = Mapping::new();
        obj.insert("metadata".to_string(), self.metadata.to_document());
        obj.insert("components".to_string(), DocValue::Mapping(components));
        obj.insert(
            "endpoints".to_string(),
            DocValue::Sequence(
                self.endpoints
                    .iter()
                    .map(FlatEndpoint::to_document)
                    .collect(),
            ),
        );
        DocValue::Mapping(obj)
    }
}

fn string_list(items: Option<&[String]>) -> DocValue {
    match items {
        Some(items) => {
            DocValue::Sequence(items.iter().map(|s| DocValue::from(s.as_str())).collect())
        }
        None => DocValue::Null,
    }
}
