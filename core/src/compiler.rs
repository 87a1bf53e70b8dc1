#![deny(missing_docs)]

//! # Contract Compiler
//!
//! Turns a schema registry plus an ordered endpoint table into the flat
//! contract and the OpenAPI document in a single pass.
//!
//! The two outputs deliberately disagree on duplicates: the flat contract keeps
//! one entry per record, the OpenAPI `paths` map keeps the last record for each
//! (path, method). Downstream consumers rely on both views.

use crate::clock::Clock;
use crate::contract::{ContractMetadata, FlatContract, FlatEndpoint, DEFAULT_AUTH};
use crate::model::{
    default_servers, ContractSource, DocumentInfo, EndpointRecord, SchemaRegistry, ServerInfo,
};
use crate::openapi::{OpenApiDocument, Operation, RequestBody, SecurityRequirement, BEARER_SCHEME};
use crate::value::DocValue;
use serde_json::json;

/// Both generated documents.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledContract {
    /// One entry per input record.
    pub flat: FlatContract,
    /// Path-keyed document, last record wins per (path, method).
    pub openapi: OpenApiDocument,
}

/// Compiles with the default document `info` and `servers`.
pub fn compile(
    registry: &SchemaRegistry,
    records: &[EndpointRecord],
    clock: &dyn Clock,
) -> CompiledContract {
    compile_with_info(
        &DocumentInfo::default(),
        &default_servers(),
        registry,
        records,
        clock,
    )
}

/// Compiles a loaded input table.
pub fn compile_source(source: &ContractSource, clock: &dyn Clock) -> CompiledContract {
    compile_with_info(
        &source.info,
        &source.servers,
        &source.schemas,
        &source.endpoints,
        clock,
    )
}

/// Compiles with explicit static document configuration.
///
/// Never fails: records are not validated and inputs are not mutated.
pub fn compile_with_info(
    info: &DocumentInfo,
    servers: &[ServerInfo],
    registry: &SchemaRegistry,
    records: &[EndpointRecord],
    clock: &dyn Clock,
) -> CompiledContract {
    let mut openapi = OpenApiDocument::new(info.clone(), servers.to_vec(), registry.clone());
    let mut endpoints = Vec::with_capacity(records.len());

    for record in records {
        let op = build_operation(record);
        if openapi
            .insert_operation(&record.path, &record.method, op)
            .is_some()
        {
            tracing::warn!(
                path = %record.path,
                method = %record.method.to_ascii_uppercase(),
                "duplicate endpoint record replaces earlier operation"
            );
        }
        endpoints.push(FlatEndpoint::from_record(record));
    }

    let public_endpoints = endpoints
        .iter()
        .filter(|ep| ep.public)
        .map(|ep| ep.path.clone())
        .collect();

    let metadata = ContractMetadata {
        generated_at: clock.now(),
        endpoint_count: endpoints.len(),
        default_auth: DEFAULT_AUTH.to_string(),
        public_endpoints,
    };

    tracing::debug!(
        endpoints = metadata.endpoint_count,
        operations = openapi.operation_count(),
        schemas = registry.len(),
        "compiled contract"
    );

    CompiledContract {
        flat: FlatContract {
            metadata,
            schemas: registry.clone(),
            endpoints,
        },
        openapi,
    }
}

/// Builds the OpenAPI operation for one record.
pub fn build_operation(record: &EndpointRecord) -> Operation {
    let security = if record.public {
        None
    } else {
        Some(vec![bearer_requirement()])
    };

    // A body declared without a schema still accepts a JSON object.
    let request_body = record.request_body.as_ref().map(|body| RequestBody {
        schema: body
            .schema
            .clone()
            .unwrap_or_else(|| DocValue::from(json!({"type": "object"}))),
    });

    let description = if record.aliases.is_empty() {
        record.description.clone()
    } else {
        let note = alias_note(&record.aliases);
        Some(match record.description.as_deref() {
            Some(desc) if !desc.is_empty() => format!("{} {}", desc, note),
            _ => note,
        })
    };

    Operation {
        summary: record.summary.clone(),
        tags: record.tags.clone(),
        responses: record.responses.clone().unwrap_or_default(),
        security,
        request_body,
        description,
    }
}

fn bearer_requirement() -> SecurityRequirement {
    let mut req = SecurityRequirement::new();
    req.insert(BEARER_SCHEME.to_string(), Vec::new());
    req
}

/// Human-readable sentence listing alternate paths.
pub fn alias_note(aliases: &[String]) -> String {
    format!("Aliases: {}.", aliases.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use pretty_assertions::assert_eq;

    fn clock() -> FixedClock {
        FixedClock::parse("2024-05-01T12:00:00Z").unwrap()
    }

    fn foo_registry() -> SchemaRegistry {
        SchemaRegistry::new().with_schema("Foo", json!({"type": "object"}))
    }

    #[test]
    fn test_public_get_without_body() {
        let records = vec![EndpointRecord::new("GET", "/a")
            .public()
            .with_response("200", json!({"description": "ok"}))];
        let out = compile(&foo_registry(), &records, &clock());

        assert_eq!(
            out.flat.endpoints[0].to_document(),
            DocValue::from(json!({
                "path": "/a",
                "method": "GET",
                "summary": null,
                "tags": null,
                "public": true,
                "aliases": [],
                "requestSchema": null,
                "responses": {"200": {"description": "ok"}}
            }))
        );

        let op = out.openapi.operation("/a", "get").unwrap().to_document();
        assert!(op.get("security").is_none());
        assert_eq!(
            op.get("responses"),
            Some(&DocValue::from(json!({"200": {"description": "ok"}})))
        );
    }

    #[test]
    fn test_protected_post_with_ref_body() {
        let records = vec![EndpointRecord::new("post", "/foo")
            .with_request_schema(json!({"$ref": "#/components/schemas/Foo"}))];
        let out = compile(&foo_registry(), &records, &clock());

        let op = out.openapi.operation("/foo", "POST").unwrap().to_document();
        assert_eq!(
            op.get("requestBody"),
            Some(&DocValue::from(json!({
                "required": true,
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Foo"}}}
            })))
        );
        assert_eq!(
            op.get("security"),
            Some(&DocValue::from(json!([{"bearerAuth": []}])))
        );
        assert_eq!(
            out.flat.endpoints[0].request_schema,
            Some(DocValue::from(json!({"$ref": "#/components/schemas/Foo"})))
        );
    }

    #[test]
    fn test_body_without_schema_defaults_to_object() {
        let mut record = EndpointRecord::new("post", "/upload");
        record.request_body = Some(Default::default());
        let op = build_operation(&record);
        assert_eq!(
            op.request_body.map(|b| b.schema),
            Some(DocValue::from(json!({"type": "object"})))
        );
    }

    #[test]
    fn test_aliases_are_documented_not_routed() {
        let records = vec![EndpointRecord::new("post", "/auth/signup/email")
            .public()
            .with_alias("/auth/signup")
            .with_alias("/auth/register")];
        let out = compile(&SchemaRegistry::new(), &records, &clock());

        assert_eq!(out.openapi.paths.len(), 1);
        let op = out.openapi.operation("/auth/signup/email", "post").unwrap();
        assert_eq!(
            op.description.as_deref(),
            Some("Aliases: /auth/signup, /auth/register.")
        );
        assert_eq!(
            out.flat.endpoints[0].aliases,
            vec!["/auth/signup".to_string(), "/auth/register".to_string()]
        );
    }

    #[test]
    fn test_alias_note_follows_existing_description() {
        let record = EndpointRecord::new("get", "/me")
            .with_description("Current user.")
            .with_alias("/users/me");
        let op = build_operation(&record);
        assert_eq!(
            op.description.as_deref(),
            Some("Current user. Aliases: /users/me.")
        );
    }

    #[test]
    fn test_description_passes_through_without_aliases() {
        let record = EndpointRecord::new("get", "/me").with_description("Current user.");
        assert_eq!(
            build_operation(&record).description.as_deref(),
            Some("Current user.")
        );
        assert!(build_operation(&EndpointRecord::new("get", "/me"))
            .description
            .is_none());
    }

    #[test]
    fn test_duplicates_last_write_wins_but_flat_keeps_both() {
        let records = vec![
            EndpointRecord::new("get", "/dup").with_summary("first"),
            EndpointRecord::new("get", "/other"),
            EndpointRecord::new("GET", "/dup").with_summary("second").public(),
        ];
        let out = compile(&SchemaRegistry::new(), &records, &clock());

        assert_eq!(out.openapi.operation_count(), 2);
        let op = out.openapi.operation("/dup", "get").unwrap();
        assert_eq!(*op, build_operation(&records[2]));
        assert!(op.security.is_none());

        let paths: Vec<&str> = out.openapi.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/dup", "/other"]);

        let summaries: Vec<Option<&str>> = out
            .flat
            .endpoints
            .iter()
            .map(|ep| ep.summary.as_deref())
            .collect();
        assert_eq!(summaries, vec![Some("first"), None, Some("second")]);
        assert_eq!(out.flat.metadata.endpoint_count, 3);
        assert_eq!(out.flat.metadata.public_endpoints, vec!["/dup".to_string()]);
    }

    #[test]
    fn test_methods_share_a_path_item() {
        let records = vec![
            EndpointRecord::new("get", "/items"),
            EndpointRecord::new("post", "/items"),
        ];
        let out = compile(&SchemaRegistry::new(), &records, &clock());
        let methods: Vec<&str> = out.openapi.paths["/items"]
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(methods, vec!["get", "post"]);
    }

    #[test]
    fn test_empty_table_is_valid() {
        let out = compile(&SchemaRegistry::new(), &[], &clock());
        assert!(out.flat.endpoints.is_empty());
        assert_eq!(out.flat.metadata.endpoint_count, 0);
        assert!(out.flat.metadata.public_endpoints.is_empty());
        assert!(out.openapi.paths.is_empty());
    }

    #[test]
    fn test_metadata_and_registry_copy() {
        let records = vec![
            EndpointRecord::new("get", "/health").public(),
            EndpointRecord::new("get", "/me"),
            EndpointRecord::new("post", "/health").public(),
        ];
        let registry = foo_registry();
        let out = compile(&registry, &records, &clock());

        assert_eq!(
            out.flat.metadata.to_document(),
            DocValue::from(json!({
                "generatedAt": "2024-05-01T12:00:00.000000Z",
                "endpointCount": 3,
                "authentication": {"default": "bearer", "publicEndpoints": ["/health", "/health"]}
            }))
        );
        assert_eq!(out.flat.schemas, registry);
        assert_eq!(out.openapi.schemas, registry);
    }

    #[test]
    fn test_compile_source_uses_document_config() {
        let source = ContractSource {
            info: DocumentInfo::new("Pets", "2.0.0"),
            servers: vec![ServerInfo::new("http://pets.local")],
            ..ContractSource::default()
        };
        let out = compile_source(&source, &clock());
        assert_eq!(out.openapi.info.title, "Pets");
        assert_eq!(out.openapi.servers.len(), 1);
    }
}
