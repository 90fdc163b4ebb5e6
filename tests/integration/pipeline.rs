//! `ensure_index` and friends: when the cache is used, rebuilt, or refused.

use crate::common::{physics_entries, physics_with_failure, Workspace};
use sentex::testing::MemorySource;
use sentex::{
    ensure_index, rebuild_index, run_search, CorruptCachePolicy, EngineError, IndexSource,
    Pipeline, RebuildReason, SearchReply,
};
use std::fs;
use std::time::Duration;

#[test]
fn test_missing_cache_is_built_then_reused() {
    let ws = Workspace::physics();
    assert!(!ws.cache_path().exists());

    let built = ensure_index(&ws.config).unwrap();
    assert_eq!(built.source, IndexSource::Built);
    assert_eq!(built.index.entries(), physics_entries().as_slice());
    let bytes = ws.cache_bytes();

    let cached = ensure_index(&ws.config).unwrap();
    assert_eq!(cached.source, IndexSource::Cache);
    assert_eq!(cached.index, built.index);
    assert_eq!(ws.cache_bytes(), bytes);
}

#[test]
fn test_changed_document_triggers_rebuild() {
    let ws = Workspace::physics();
    ensure_index(&ws.config).unwrap();

    ws.write_document("Energy is conserved.\x0cMomentum too.");
    let ensured = ensure_index(&ws.config).unwrap();
    assert_eq!(ensured.source, IndexSource::Rebuilt(RebuildReason::Stale));
    assert_eq!(ensured.index.len(), 2);

    let response = run_search(&ws.config, &["law"]).unwrap();
    assert_eq!(response.result_count, 0);
}

#[test]
fn test_cache_without_fingerprint_is_trusted() {
    let ws = Workspace::physics();
    fs::write(
        ws.cache_path(),
        r#"[{"Page Number": 7, "Sentence": "From an older run."}]"#,
    )
    .unwrap();

    let ensured = ensure_index(&ws.config).unwrap();
    assert_eq!(ensured.source, IndexSource::Cache);
    assert_eq!(ensured.index.entries()[0].page_number, 7);
}

#[test]
fn test_corrupt_cache_fails_by_default() {
    let ws = Workspace::physics();
    fs::write(ws.cache_path(), "{ not json").unwrap();

    let err = ensure_index(&ws.config).unwrap_err();
    assert_eq!(err.kind(), "cacheCorrupt");
    assert_eq!(ws.cache_bytes(), b"{ not json");
}

#[test]
fn test_corrupt_cache_rebuilt_when_allowed() {
    let mut ws = Workspace::physics();
    ws.config = ws
        .config
        .clone()
        .with_corrupt_cache_policy(CorruptCachePolicy::Rebuild);
    fs::write(ws.cache_path(), "{ not json").unwrap();

    let ensured = ensure_index(&ws.config).unwrap();
    assert_eq!(ensured.source, IndexSource::Rebuilt(RebuildReason::Corrupt));
    assert_eq!(ensure_index(&ws.config).unwrap().source, IndexSource::Cache);
}

#[test]
fn test_forced_rebuild() {
    let ws = Workspace::physics();
    ensure_index(&ws.config).unwrap();
    let rebuilt = rebuild_index(&ws.config).unwrap();
    assert_eq!(rebuilt.source, IndexSource::Rebuilt(RebuildReason::Forced));
    assert_eq!(rebuilt.index.entries(), physics_entries().as_slice());
}

#[test]
fn test_failed_build_writes_no_cache() {
    let ws = Workspace::physics();
    let source = MemorySource::new(physics_with_failure(1));

    let err = Pipeline::new(&ws.config).source(&source).ensure().unwrap_err();
    assert_eq!(err.kind(), "extractionFailure");
    assert!(!ws.cache_path().exists());
}

#[test]
fn test_failed_rebuild_keeps_previous_cache() {
    let ws = Workspace::physics();
    ensure_index(&ws.config).unwrap();
    let before = ws.cache_bytes();

    // Different content, so the cache looks stale; page 2 cannot be read.
    let source = MemorySource::new(physics_with_failure(2));
    let pipeline = Pipeline::new(&ws.config).source(&source);

    let err = pipeline.ensure().unwrap_err();
    match err {
        EngineError::Build(ref build) => assert_eq!(build.failed_pages(), vec![2]),
        ref other => panic!("expected build error, got {other}"),
    }
    assert_eq!(ws.cache_bytes(), before);

    assert!(pipeline.rebuild().is_err());
    assert_eq!(ws.cache_bytes(), before);
}

#[test]
fn test_missing_document_even_with_cache() {
    let ws = Workspace::physics();
    ensure_index(&ws.config).unwrap();
    fs::remove_file(ws.document_path()).unwrap();

    let err = run_search(&ws.config, &["law"]).unwrap_err();
    assert_eq!(err.kind(), "fileNotFound");

    let reply = SearchReply::from_result(Err(err));
    assert!(!reply.is_ok());
}

#[test]
fn test_missing_document_distinct_from_no_results() {
    let ws = Workspace::physics();
    let ok = SearchReply::from_result(run_search(&ws.config, &["quark"]));
    match ok {
        SearchReply::Ok(response) => assert_eq!(response.result_count, 0),
        other => panic!("expected ok reply, got {:?}", other),
    }

    fs::remove_file(ws.document_path()).unwrap();
    let err = SearchReply::from_result(run_search(&ws.config, &["quark"]));
    match err {
        SearchReply::Error {
            kind,
            message,
            results,
            result_count,
        } => {
            assert_eq!(kind, "fileNotFound");
            assert!(message.contains("physics.txt"));
            assert!(results.is_empty());
            assert_eq!(result_count, 0);
        }
        other => panic!("expected error reply, got {:?}", other),
    }
}

#[test]
fn test_timeout_from_config() {
    let ws = Workspace::physics();
    let config = ws.config.clone().with_timeout(Duration::ZERO);
    let err = ensure_index(&config).unwrap_err();
    assert_eq!(err.kind(), "timedOut");
    assert!(!ws.cache_path().exists());
}

#[test]
fn test_sub_second_timeout_still_builds() {
    let ws = Workspace::physics();
    let config = ws.config.clone().with_timeout(Duration::from_millis(900));
    assert_eq!(config.timeout(), Some(Duration::from_millis(900)));

    let ensured = ensure_index(&config).unwrap();
    assert_eq!(ensured.source, IndexSource::Built);
    assert_eq!(ensured.index.entries(), physics_entries().as_slice());
}

#[test]
fn test_search_duration_includes_build() {
    let ws = Workspace::physics();
    let response = run_search(&ws.config, &["law"]).unwrap();
    assert!(response.duration_seconds > 0.0);
}
