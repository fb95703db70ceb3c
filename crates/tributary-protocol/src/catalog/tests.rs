//! Unit tests for catalog types.

use serde_json::json;

use super::*;
use crate::schema::{PropType, PropertySpec};

fn users_stream() -> Stream {
    Stream::new(
        "users",
        "crm",
        Properties::new().with_property("id", PropertySpec::new(PropType::Integer)),
    )
    .with_sync_modes([SyncMode::FullRefresh, SyncMode::Incremental])
}

#[test]
fn stream_omits_unset_optional_fields() {
    let stream = Stream::new("payments", "billing", Properties::new());
    let value = serde_json::to_value(&stream).expect("serialise");
    assert_eq!(
        value,
        json!({
            "name": "payments",
            "json_schema": {"properties": {}},
            "namespace": "billing"
        })
    );
}

#[test]
fn catalog_preserves_stream_order() {
    let catalog = Catalog::new(vec![
        users_stream(),
        Stream::new("payments", "crm", Properties::new()),
    ]);
    let json = serde_json::to_string(&catalog).expect("serialise");
    let back: Catalog = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back.stream_names().collect::<Vec<_>>(), ["users", "payments"]);
    assert_eq!(back, catalog);
}

#[test]
fn source_cursor_sets_flag_and_default_field() {
    let stream = users_stream().with_source_cursor([String::from("updated_at")]);
    assert!(stream.source_defined_cursor);
    assert_eq!(stream.default_cursor_field, ["updated_at"]);
    assert!(stream.supports(SyncMode::Incremental));
}

#[test]
fn configured_catalog_decodes_orchestrator_payload() {
    let payload = json!({
        "streams": [{
            "stream": {
                "name": "users",
                "json_schema": {"properties": {"id": {"type": "integer"}}},
                "supported_sync_modes": ["full_refresh", "incremental"],
                "namespace": "crm"
            },
            "sync_mode": "incremental",
            "cursor_field": ["id"],
            "destination_sync_mode": "overwrite",
            "primary_key": [["id"]]
        }]
    });
    let catalog: ConfiguredCatalog = serde_json::from_value(payload).expect("deserialise");
    let users = catalog.find("users").expect("users stream");
    assert_eq!(users.sync_mode, SyncMode::Incremental);
    assert_eq!(users.destination_sync_mode, DestinationSyncMode::Overwrite);
    assert_eq!(users.cursor_field, ["id"]);
    assert_eq!(users.primary_key, vec![vec![String::from("id")]]);
    assert!(catalog.find("payments").is_none());
}

#[test]
fn configured_stream_defaults_missing_sync_parameters() {
    let payload = json!({
        "stream": {"name": "users", "json_schema": {}},
        "sync_mode": "full_refresh"
    });
    let configured: ConfiguredStream = serde_json::from_value(payload).expect("deserialise");
    assert_eq!(configured.name(), "users");
    assert_eq!(configured.destination_sync_mode, DestinationSyncMode::Append);
    assert!(configured.cursor_field.is_empty());
}
