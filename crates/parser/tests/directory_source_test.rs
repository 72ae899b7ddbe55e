//! Integration test for the per-class file source

use mimgen_common::{ClassSource, MimError};
use mimgen_parser::DirectorySource;
use std::fs;

#[test]
fn test_fetch_class_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("fvCtx.json"),
        r#"{
            "label": "Private Network",
            "isConfigurable": true,
            "rnFormat": "ctx-%(name)s",
            "identifiedBy": ["name"],
            "containers": ["fvTenant"]
        }"#,
    )
    .unwrap();

    let source = DirectorySource::new(dir.path());
    let record = source.fetch("fvCtx").unwrap();

    assert_eq!(record.label, "Private Network");
    assert_eq!(record.rn_format, "ctx-{name}");
    assert!(record.containers.contains("fvTenant"));
}

#[test]
fn test_missing_document_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path());

    let err = source.fetch("fvAp").unwrap_err();
    assert!(matches!(err, MimError::SourceUnavailable { ref class, .. } if class == "fvAp"));
}

#[test]
fn test_malformed_document_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("fvAp.json"), "{ not json").unwrap();

    let source = DirectorySource::new(dir.path());
    let err = source.fetch("fvAp").unwrap_err();
    assert!(matches!(err, MimError::ParseFailure { .. }));
}

#[test]
fn test_rejects_path_like_names() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path());

    assert!(matches!(
        source.fetch("../secrets"),
        Err(MimError::SourceUnavailable { .. })
    ));
}
