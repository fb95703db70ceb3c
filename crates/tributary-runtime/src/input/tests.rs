//! Unit tests for input file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use serde::Deserialize;
use tempfile::TempDir;
use tributary_protocol::{ConfiguredCatalog, SyncMode};

use super::*;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
struct Checkpoint {
    #[serde(default)]
    streams: BTreeMap<String, u64>,
}

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

#[rstest]
fn parses_configured_catalog(dir: TempDir) {
    let path = write(
        &dir,
        "catalog.json",
        r#"{"streams":[{"stream":{"name":"users","json_schema":{}},"sync_mode":"incremental"}]}"#,
    );
    let catalog: ConfiguredCatalog = load_json(&path).expect("load catalog");
    let stream = catalog.find("users").expect("users configured");
    assert_eq!(stream.sync_mode, SyncMode::Incremental);
}

#[rstest]
fn missing_file_is_a_read_error(dir: TempDir) {
    let path = dir.path().join("absent.json");
    let error = load_json::<Checkpoint>(&path).expect_err("missing file");
    match error {
        InputError::Read { path: reported, source } => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        InputError::Parse { .. } => panic!("expected a read error"),
    }
}

#[rstest]
#[case::not_json("catalog")]
#[case::wrong_shape(r#"{"streams": 3}"#)]
#[case::truncated(r#"{"streams": ["#)]
fn malformed_contents_are_parse_errors(dir: TempDir, #[case] contents: &str) {
    let path = write(&dir, "catalog.json", contents);
    let error = load_json::<ConfiguredCatalog>(&path).expect_err("malformed input");
    assert!(matches!(error, InputError::Parse { .. }), "got {error:?}");
    assert!(error.to_string().contains("catalog.json"));
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(""))]
#[case::blank(Some("  \n"))]
#[case::empty_object(Some("{}"))]
fn absent_state_defaults(dir: TempDir, #[case] contents: Option<&str>) {
    let path = match contents {
        Some(text) => write(&dir, "state.json", text),
        None => dir.path().join("state.json"),
    };
    let state: Checkpoint = load_json_or_default(&path).expect("load state");
    assert_eq!(state, Checkpoint::default());
}

#[rstest]
fn existing_state_is_parsed(dir: TempDir) {
    let path = write(&dir, "state.json", r#"{"streams":{"users":4}}"#);
    let state: Checkpoint = load_json_or_default(&path).expect("load state");
    assert_eq!(state.streams.get("users"), Some(&4));
}

#[rstest]
fn malformed_state_is_still_an_error(dir: TempDir) {
    let path = write(&dir, "state.json", "{");
    let error = load_json_or_default::<Checkpoint>(&path).expect_err("malformed state");
    assert!(matches!(error, InputError::Parse { .. }));
}
