//! Unit tests for the directory-of-JSON source.

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;
use tributary_protocol::{
    ConfiguredCatalog, ConfiguredStream, ExtendedType, FormatType, Message, MessageType, PropType,
    Properties, Stream,
};
use tributary_runtime::test_support::CapturedOutput;
use tributary_runtime::{Emitter, LogEmitter, Source};

use crate::infer::{infer_properties, infer_value};
use crate::*;

/// A stream directory plus config and state files beside it.
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    fn add_stream(&self, name: &str, contents: &Value) {
        fs::write(
            self.data_dir().join(format!("{name}.json")),
            contents.to_string(),
        )
        .expect("write stream file");
    }

    fn config(&self) -> PathBuf {
        let path = self.root.path().join("config.json");
        let config = json!({
            "directory": self.data_dir().display().to_string(),
            "namespace": "files",
        });
        fs::write(&path, config.to_string()).expect("write config");
        path
    }

    fn state(&self, contents: &Value) -> PathBuf {
        let path = self.root.path().join("state.json");
        fs::write(&path, contents.to_string()).expect("write state");
        path
    }
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().expect("create temp dir");
    fs::create_dir(root.path().join("data")).expect("create data dir");
    Workspace { root }
}

fn configured(names: &[&str], mode: SyncMode) -> ConfiguredCatalog {
    ConfiguredCatalog::new(
        names
            .iter()
            .map(|name| ConfiguredStream::new(Stream::new(*name, "", Properties::new()), mode))
            .collect(),
    )
}

fn records_of(messages: &[Message]) -> Vec<(String, String, Value)> {
    messages
        .iter()
        .filter_map(|message| match message {
            Message::Record(record) => Some((
                record.stream().to_owned(),
                record.namespace().to_owned(),
                record.data().clone(),
            )),
            _ => None,
        })
        .collect()
}

fn last_state(messages: &[Message]) -> Value {
    messages
        .iter()
        .rev()
        .find_map(|message| match message {
            Message::State(state) => Some(state.data().clone()),
            _ => None,
        })
        .expect("a state message")
}

#[test]
fn specification_requires_directory() {
    let spec = specification();
    let connection = &spec.connection_specification;
    assert_eq!(connection.required, ["directory"]);
    assert!(connection.properties.get("namespace").is_some());
    assert!(spec.supports_incremental);
}

#[rstest]
fn check_accepts_existing_directory(workspace: Workspace) {
    let output = CapturedOutput::new();
    FileSource::new()
        .check(&workspace.config(), &LogEmitter::new(output.writer()))
        .expect("directory exists");
}

#[rstest]
fn check_rejects_missing_directory(workspace: Workspace) {
    fs::remove_dir(workspace.data_dir()).expect("remove data dir");
    let output = CapturedOutput::new();
    let error = FileSource::new()
        .check(&workspace.config(), &LogEmitter::new(output.writer()))
        .expect_err("directory is gone");
    assert!(error.to_string().contains("not a readable directory"), "{error}");
}

#[rstest]
fn check_rejects_unparsable_config(workspace: Workspace) {
    let path = workspace.root.path().join("config.json");
    fs::write(&path, "{\"dir\": 1}").expect("write config");
    let output = CapturedOutput::new();
    let result = FileSource::new().check(&path, &LogEmitter::new(output.writer()));
    assert!(result.is_err());
}

#[rstest]
fn discover_lists_json_files_sorted(workspace: Workspace) {
    workspace.add_stream("users", &json!([{"id": 1, "name": "ada"}]));
    workspace.add_stream("payments", &json!([{"amount": 2.5, "paid": true}]));
    fs::write(workspace.data_dir().join("notes.txt"), "ignored").expect("write note");
    let output = CapturedOutput::new();

    let catalog = FileSource::new()
        .discover(&workspace.config(), &LogEmitter::new(output.writer()))
        .expect("discover");

    assert_eq!(
        catalog.stream_names().collect::<Vec<_>>(),
        ["payments", "users"]
    );
    let payments = catalog.streams.first().expect("payments stream");
    assert_eq!(payments.namespace, "files");
    assert!(payments.supports(SyncMode::Incremental));
    let amount = payments.json_schema.get("amount").expect("amount property");
    assert_eq!(amount.kind(), Some(PropType::Number));
    assert!(output.text().is_empty());
}

#[rstest]
fn discover_warns_about_empty_streams(workspace: Workspace) {
    workspace.add_stream("empty", &json!([]));
    let output = CapturedOutput::new();

    let catalog = FileSource::new()
        .discover(&workspace.config(), &LogEmitter::new(output.writer()))
        .expect("discover");

    let stream = catalog.streams.first().expect("empty stream");
    assert!(stream.json_schema.is_empty());
    let kinds: Vec<MessageType> = output
        .messages()
        .expect("decode")
        .iter()
        .map(Message::kind)
        .collect();
    assert_eq!(kinds, [MessageType::Log]);
}

#[rstest]
fn discover_rejects_non_array_files(workspace: Workspace) {
    workspace.add_stream("broken", &json!({"id": 1}));
    let output = CapturedOutput::new();

    let error = FileSource::new()
        .discover(&workspace.config(), &LogEmitter::new(output.writer()))
        .expect_err("object is not an array");

    assert!(error.to_string().contains("broken"), "{error}");
}

#[rstest]
fn full_refresh_emits_every_object_then_state(workspace: Workspace) {
    workspace.add_stream("users", &json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    let output = CapturedOutput::new();

    FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&json!({})),
            &configured(&["users"], SyncMode::FullRefresh),
            &Emitter::new(output.writer()),
        )
        .expect("read");

    let messages = output.messages().expect("decode");
    let kinds: Vec<MessageType> = messages.iter().map(Message::kind).collect();
    assert_eq!(
        kinds,
        [
            MessageType::Record,
            MessageType::Record,
            MessageType::Record,
            MessageType::State,
        ]
    );
    let records = records_of(&messages);
    let first = records.first().expect("first record");
    assert_eq!(first, &("users".to_owned(), "files".to_owned(), json!({"id": 1})));
    assert_eq!(last_state(&messages), json!({"streams": {"users": 3}}));
}

#[rstest]
#[case::fresh(json!({}), 3)]
#[case::partly_synced(json!({"streams": {"users": 2}}), 1)]
#[case::fully_synced(json!({"streams": {"users": 3}}), 0)]
#[case::file_shrank(json!({"streams": {"users": 9}}), 0)]
fn incremental_skips_synced_objects(
    workspace: Workspace,
    #[case] state: Value,
    #[case] expected: usize,
) {
    workspace.add_stream("users", &json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    let output = CapturedOutput::new();

    FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&state),
            &configured(&["users"], SyncMode::Incremental),
            &Emitter::new(output.writer()),
        )
        .expect("read");

    let messages = output.messages().expect("decode");
    assert_eq!(records_of(&messages).len(), expected);
    assert_eq!(last_state(&messages), json!({"streams": {"users": 3}}));
}

#[rstest]
fn missing_state_file_starts_from_scratch(workspace: Workspace) {
    workspace.add_stream("users", &json!([{"id": 1}]));
    let output = CapturedOutput::new();

    FileSource::new()
        .read(
            &workspace.config(),
            &workspace.root.path().join("absent.json"),
            &configured(&["users"], SyncMode::Incremental),
            &Emitter::new(output.writer()),
        )
        .expect("read");

    assert_eq!(records_of(&output.messages().expect("decode")).len(), 1);
}

#[rstest]
fn state_accumulates_across_streams(workspace: Workspace) {
    workspace.add_stream("users", &json!([{"id": 1}]));
    workspace.add_stream("payments", &json!([{"amount": 1}, {"amount": 2}]));
    let output = CapturedOutput::new();

    FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&json!({"streams": {"legacy": 7}})),
            &configured(&["users", "payments"], SyncMode::FullRefresh),
            &Emitter::new(output.writer()),
        )
        .expect("read");

    let messages = output.messages().expect("decode");
    assert_eq!(
        last_state(&messages),
        json!({"streams": {"legacy": 7, "payments": 2, "users": 1}})
    );
}

#[rstest]
fn configured_namespace_wins_over_config(workspace: Workspace) {
    workspace.add_stream("users", &json!([{"id": 1}]));
    let output = CapturedOutput::new();
    let catalog = ConfiguredCatalog::new(vec![ConfiguredStream::new(
        Stream::new("users", "crm", Properties::new()),
        SyncMode::FullRefresh,
    )]);

    FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&json!({})),
            &catalog,
            &Emitter::new(output.writer()),
        )
        .expect("read");

    let records = records_of(&output.messages().expect("decode"));
    assert_eq!(records.first().map(|record| record.1.as_str()), Some("crm"));
}

#[rstest]
fn read_fails_for_unknown_stream(workspace: Workspace) {
    let output = CapturedOutput::new();
    let error = FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&json!({})),
            &configured(&["ghost"], SyncMode::FullRefresh),
            &Emitter::new(output.writer()),
        )
        .expect_err("no ghost.json");
    assert!(error.to_string().contains("ghost"), "{error}");
    assert!(output.text().is_empty());
}

#[rstest]
#[case::parent("../secret")]
#[case::nested("data/../../secret")]
#[case::absolute("/etc/passwd")]
fn read_refuses_streams_outside_the_directory(workspace: Workspace, #[case] stream: &str) {
    workspace.add_stream("users", &json!([{"id": 1}]));
    fs::write(
        workspace.root.path().join("secret.json"),
        json!([{"password": "hunter2"}]).to_string(),
    )
    .expect("write secret");
    let output = CapturedOutput::new();

    let error = FileSource::new()
        .read(
            &workspace.config(),
            &workspace.state(&json!({})),
            &configured(&["users", stream], SyncMode::FullRefresh),
            &Emitter::new(output.writer()),
        )
        .expect_err("stream is outside the directory");

    let error = error
        .downcast::<FileSourceError>()
        .expect("file source error");
    assert!(
        matches!(&*error, FileSourceError::UnknownStream { stream: name, .. } if name == stream),
        "{error}"
    );
    assert!(output.text().is_empty());
}

#[rstest]
#[case::null(json!(null), PropType::Null)]
#[case::boolean(json!(false), PropType::Boolean)]
#[case::integer(json!(-4), PropType::Integer)]
#[case::unsigned(json!(u64::MAX), PropType::Integer)]
#[case::float(json!(0.5), PropType::Number)]
#[case::string(json!("x"), PropType::String)]
#[case::array(json!([1]), PropType::Array)]
#[case::object(json!({"a": 1}), PropType::Object)]
fn infers_value_kinds(#[case] value: Value, #[case] expected: PropType) {
    assert_eq!(infer_value(&value).kind(), Some(expected));
}

#[rstest]
#[case::timestamp("2024-01-31T12:00:00Z", Some(FormatType::DateTime))]
#[case::offset_timestamp("2024-01-31T12:00:00.5+02:00", Some(FormatType::DateTime))]
#[case::date("2024-01-31", Some(FormatType::Date))]
#[case::impossible_date("2024-02-31", None)]
#[case::plain("ada", None)]
fn infers_temporal_string_formats(#[case] text: &str, #[case] expected: Option<FormatType>) {
    let spec = infer_value(&json!(text));
    assert_eq!(spec.kind(), Some(PropType::String));
    assert_eq!(spec.property_type.format, expected);
}

#[test]
fn timestamps_are_marked_with_a_zone() {
    let spec = infer_value(&json!("2024-01-31T12:00:00Z"));
    assert_eq!(
        spec.property_type.extended,
        Some(ExtendedType::TimestampWithTimezone)
    );
}

#[test]
fn infers_nested_structure() {
    let sample = json!({"tags": ["a"], "address": {"city": "Oslo"}, "empty": []});
    let Value::Object(fields) = sample else {
        panic!("sample is an object");
    };
    let properties = infer_properties(&fields);

    let tags = properties.get("tags").expect("tags");
    let items = tags.items.as_deref().expect("item schema");
    assert_eq!(items.kind(), Some(PropType::String));

    let address = properties.get("address").expect("address");
    let city = address.properties.get("city").expect("city");
    assert_eq!(city.kind(), Some(PropType::String));

    let empty = properties.get("empty").expect("empty");
    assert!(empty.items.is_none());
}

#[test]
fn state_positions_default_to_zero() {
    let mut state = FileState::default();
    assert_eq!(state.position("users"), 0);
    state.advance("users", 5);
    assert_eq!(state.position("users"), 5);
}
