use contract_core::encoding::{DocumentEncoder, FallbackYamlEncoder, JsonEncoder};
use contract_core::{
    compile, find_dangling_refs, DocValue, EndpointRecord, FixedClock, SchemaRegistry,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn clock() -> FixedClock {
    FixedClock::parse("2024-05-01T12:00:00Z").unwrap()
}

fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with_schema(
            "User",
            json!({"type": "object", "properties": {"id": {"type": "string"}}}),
        )
        .with_schema(
            "UserList",
            json!({"type": "array", "items": {"$ref": "#/components/schemas/User"}}),
        )
        .with_schema(
            "Patch",
            json!({"oneOf": [{"type": "boolean"}, {"type": "string"}]}),
        )
}

fn records() -> Vec<EndpointRecord> {
    vec![
        EndpointRecord::new("get", "/health")
            .with_summary("Health")
            .with_tags(["system"])
            .public()
            .with_response("200", json!({"description": "ok"})),
        EndpointRecord::new("post", "/auth/signup/email")
            .with_summary("Email signup")
            .with_tags(["auth"])
            .public()
            .with_alias("/auth/signup")
            .with_alias("/auth/register")
            .with_request_schema(json!({"$ref": "#/components/schemas/User"}))
            .with_response("201", json!({"description": "User created"}))
            .with_response("400", json!({"description": "Invalid input"})),
        EndpointRecord::new("get", "/users")
            .with_tags(["users"])
            .with_response(
                "200",
                json!({"description": "Users", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/UserList"}}}}),
            ),
        EndpointRecord::new("patch", "/users/{id}")
            .with_request_schema(json!({"$ref": "#/components/schemas/Patch"})),
        EndpointRecord::new("GET", "/users").with_summary("List users again"),
    ]
}

#[test]
fn flat_contract_keeps_every_record_in_order() {
    let records = records();
    let out = compile(&registry(), &records, &clock());

    assert_eq!(out.flat.endpoints.len(), records.len());
    let keys: Vec<(String, String)> = out
        .flat
        .endpoints
        .iter()
        .map(|ep| (ep.method.clone(), ep.path.clone()))
        .collect();
    let expected: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.method.to_uppercase(), r.path.clone()))
        .collect();
    assert_eq!(keys, expected);
    assert_eq!(out.flat.metadata.endpoint_count, out.flat.endpoints.len());
}

#[test]
fn security_follows_public_flag() {
    let records = records();
    let out = compile(&registry(), &records, &clock());
    let doc = out.openapi.to_document();

    for record in records.iter().take(4) {
        let op = doc
            .get("paths")
            .and_then(|p| p.get(&record.path))
            .and_then(|item| item.get(&record.method.to_lowercase()))
            .unwrap();
        if record.public {
            assert!(op.get("security").is_none(), "{} has security", record.path);
        } else {
            assert_eq!(
                op.get("security"),
                Some(&DocValue::from(json!([{"bearerAuth": []}])))
            );
        }
    }
}

#[test]
fn aliases_appear_in_description_and_flat_entry() {
    let out = compile(&registry(), &records(), &clock());
    let op = out.openapi.operation("/auth/signup/email", "post").unwrap();
    let description = op.description.as_deref().unwrap();
    for alias in ["/auth/signup", "/auth/register"] {
        assert!(description.contains(alias));
        assert!(!out.openapi.paths.contains_key(alias));
    }
    assert_eq!(
        out.flat.endpoints[1].aliases,
        vec!["/auth/signup".to_string(), "/auth/register".to_string()]
    );
}

#[test]
fn duplicate_pair_last_write_wins_in_openapi_only() {
    let out = compile(&registry(), &records(), &clock());
    let op = out.openapi.operation("/users", "get").unwrap();
    assert_eq!(op.summary.as_deref(), Some("List users again"));
    assert!(op.responses.is_empty());
    assert_eq!(out.openapi.operation_count(), 4);

    let users: Vec<_> = out
        .flat
        .endpoints
        .iter()
        .filter(|ep| ep.path == "/users" && ep.method == "GET")
        .collect();
    assert_eq!(users.len(), 2);
}

#[test]
fn public_endpoints_metadata() {
    let out = compile(&registry(), &records(), &clock());
    assert_eq!(
        out.flat.metadata.public_endpoints,
        vec!["/health".to_string(), "/auth/signup/email".to_string()]
    );
}

#[test]
fn flat_contract_json_shape() {
    let out = compile(&registry(), &records()[..1], &clock());
    let text = JsonEncoder.encode(&out.flat.to_document()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        json!({
            "metadata": {
                "generatedAt": "2024-05-01T12:00:00.000000Z",
                "endpointCount": 1,
                "authentication": {"default": "bearer", "publicEndpoints": ["/health"]}
            },
            "components": {"schemas": registry().to_document()},
            "endpoints": [{
                "path": "/health",
                "method": "GET",
                "summary": "Health",
                "tags": ["system"],
                "public": true,
                "aliases": [],
                "requestSchema": null,
                "responses": {"200": {"description": "ok"}}
            }]
        })
    );
}

#[test]
fn fallback_yaml_round_trips_openapi_document() {
    let out = compile(&registry(), &records(), &clock());
    let doc = out.openapi.to_document();
    let text = FallbackYamlEncoder.encode(&doc).unwrap();
    let parsed: DocValue = serde_yaml::from_str(&text).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn fallback_yaml_round_trips_awkward_scalars() {
    let doc = DocValue::from(json!({
        "strings": ["", "null", "true", "- dash", "key: value", "#hash", "multi\nline", "tab\there", "quote\"s", "ünïcødé"],
        "numbers": [0, -12, 3.25, 4294967296u64],
        "flags": [true, false, null],
        "nested": {"empty_map": {}, "empty_list": [], "deep": [[{"a": [1]}]]},
        "404": {"description": "Not found"},
        "on": "reserved key"
    }));
    let text = FallbackYamlEncoder.encode(&doc).unwrap();
    let parsed: DocValue = serde_yaml::from_str(&text).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn generated_documents_have_no_dangling_refs() {
    let out = compile(&registry(), &records(), &clock());
    assert!(find_dangling_refs(&out.openapi.to_document()).is_empty());
    assert!(find_dangling_refs(&out.flat.to_document()).is_empty());

    let broken = vec![EndpointRecord::new("post", "/x")
        .with_request_schema(json!({"$ref": "#/components/schemas/Nope"}))];
    let out = compile(&registry(), &broken, &clock());
    let dangling = find_dangling_refs(&out.openapi.to_document());
    assert_eq!(dangling.len(), 1);
    assert_eq!(
        dangling[0].pointer,
        "/paths/~1x/post/requestBody/content/application~1json/schema"
    );
}
