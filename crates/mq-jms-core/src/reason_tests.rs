//! Tests for completion and reason codes.

use super::*;

#[test]
fn test_known_reason_code_names() {
    assert_eq!(ReasonCode::UNKNOWN_OBJECT_NAME.name(), "MQRC_UNKNOWN_OBJECT_NAME");
    assert_eq!(ReasonCode::Q_FULL.name(), "MQRC_Q_FULL");
    assert_eq!(ReasonCode::new(2035).lookup(), Some("MQRC_NOT_AUTHORIZED"));
}

#[test]
fn test_unknown_reason_code_falls_back_to_number() {
    let code = ReasonCode::new(9999);
    assert_eq!(code.lookup(), None);
    assert_eq!(code.name(), "MQRC_UNKNOWN_9999");
    assert_eq!(code.value(), 9999);
}

#[test]
fn test_reason_code_display_includes_value() {
    assert_eq!(
        ReasonCode::MSG_TOO_BIG_FOR_Q.to_string(),
        "MQRC_MSG_TOO_BIG_FOR_Q [2030]"
    );
    assert_eq!(CompletionCode::Failed.to_string(), "MQCC_FAILED [2]");
}

#[test]
fn test_reason_code_transience() {
    assert!(ReasonCode::Q_FULL.is_transient());
    assert!(ReasonCode::CONNECTION_BROKEN.is_transient());
    assert!(!ReasonCode::UNKNOWN_OBJECT_NAME.is_transient());
    assert!(!ReasonCode::NOT_AUTHORIZED.is_transient());
    assert!(!ReasonCode::MSG_TOO_BIG_FOR_Q.is_transient());
}

#[test]
fn test_reason_code_from_raw_value() {
    let code: ReasonCode = 2053.into();
    assert_eq!(code, ReasonCode::Q_FULL);
}
