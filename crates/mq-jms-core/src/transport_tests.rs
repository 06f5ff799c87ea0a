//! Tests for the destination handle guard.

use super::*;
use crate::error::Verb;
use crate::reason::ReasonCode;

#[test]
fn test_guard_closes_handle_on_drop() {
    let mut handle = MockDestinationHandle::new();
    handle.expect_close().times(1).returning(|| Ok(()));

    let guard = HandleGuard::new("Q1", Box::new(handle));
    assert_eq!(guard.queue_name(), "Q1");
    drop(guard);
}

#[test]
fn test_guard_ignores_close_failure() {
    let mut handle = MockDestinationHandle::new();
    handle
        .expect_close()
        .times(1)
        .returning(|| Err(TransportError::failed(Verb::Close, ReasonCode::CONNECTION_BROKEN)));

    // Dropping must not panic even though close fails
    drop(HandleGuard::new("Q1", Box::new(handle)));
}

#[tokio::test]
async fn test_guard_closes_after_failed_put() {
    let mut handle = MockDestinationHandle::new();
    handle
        .expect_put()
        .times(1)
        .returning(|_, _, _| Err(TransportError::failed(Verb::Put, ReasonCode::Q_FULL)));
    handle.expect_close().times(1).returning(|| Ok(()));

    let mut guard = HandleGuard::new("Q1", Box::new(handle));
    let mut descriptor = MessageDescriptor::new();
    let result = guard
        .put(&mut descriptor, &PutMessageOptions::new(false), b"payload")
        .await;

    assert_eq!(
        result.unwrap_err().reason_code,
        ReasonCode::Q_FULL
    );
}

#[tokio::test]
async fn test_guard_forwards_put_arguments() {
    let mut handle = MockDestinationHandle::new();
    handle
        .expect_put()
        .times(1)
        .returning(|descriptor, options, payload| {
            assert!(options.syncpoint);
            assert_eq!(payload, b"abc");
            descriptor.correlation_id = Some("set-by-transport".to_string());
            Ok(())
        });
    handle.expect_close().times(1).returning(|| Ok(()));

    let mut guard = HandleGuard::new("Q1", Box::new(handle));
    let mut descriptor = MessageDescriptor::new();
    guard
        .put(&mut descriptor, &PutMessageOptions::new(true), b"abc")
        .await
        .expect("put should succeed");

    assert_eq!(
        descriptor.correlation_id.as_deref(),
        Some("set-by-transport")
    );
}
