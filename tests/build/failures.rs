//! A build either covers every page or fails as a whole.

use crate::common::physics_with_failure;
use sentex::testing::{synthetic_document, FailingPage, MemoryDocument};
use sentex::{BuildError, CancelToken, IndexBuilder};
use std::time::Duration;

#[test]
fn test_failing_page_fails_build() {
    let doc = physics_with_failure(2);
    let err = IndexBuilder::new().workers(2).build(&doc).unwrap_err();
    assert_eq!(err.failed_pages(), vec![2]);
    assert!(matches!(err, BuildError::Extraction { .. }));
}

#[test]
fn test_every_failure_reported_in_page_order() {
    let pages = (1..=20)
        .map(|n| {
            if n % 5 == 0 {
                Err(FailingPage::new("scan error"))
            } else {
                Ok(format!("Page {} text.", n))
            }
        })
        .collect();
    let doc = MemoryDocument::new(pages);

    let err = IndexBuilder::new().workers(6).build(&doc).unwrap_err();
    assert_eq!(err.failed_pages(), vec![5, 10, 15, 20]);
    match err {
        BuildError::Extraction { failures } => {
            assert!(failures.iter().all(|f| f.reason.contains("scan error")));
        }
        other => panic!("expected extraction failure, got {other}"),
    }
}

#[test]
fn test_cancelled_before_start() {
    let token = CancelToken::new();
    token.cancel();
    let doc = synthetic_document(10, 2);
    let err = IndexBuilder::new()
        .cancel_token(token)
        .build(&doc)
        .unwrap_err();
    assert!(matches!(err, BuildError::Cancelled));
}

#[test]
fn test_zero_timeout_times_out() {
    let doc = synthetic_document(10, 2);
    let err = IndexBuilder::new()
        .timeout(Duration::ZERO)
        .build(&doc)
        .unwrap_err();
    assert!(matches!(err, BuildError::TimedOut(_)));
}

#[test]
fn test_generous_timeout_succeeds() {
    let doc = synthetic_document(10, 2);
    let index = IndexBuilder::new()
        .timeout(Duration::from_secs(600))
        .build(&doc)
        .unwrap();
    assert_eq!(index.len(), 20);
}
