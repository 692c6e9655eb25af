//! Tests for error construction, suggestions and serde contracts.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::validation("bad"), ErrorCode::Validation)]
#[case(Error::authorization("not yours"), ErrorCode::Authorization)]
#[case(Error::placement("wrong zone"), ErrorCode::Placement)]
#[case(Error::forbidden("banned"), ErrorCode::Forbidden)]
#[case(Error::limit("too many"), ErrorCode::Limit)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::Validation, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn resolution_caps_suggestions() {
    let suggestions = (1..=8).map(|n| format!("LD{n:02}")).collect();
    let error = Error::resolution("unknown set prefix", suggestions);

    assert_eq!(error.code(), ErrorCode::Resolution);
    assert_eq!(
        error.suggestions(),
        vec!["LD01", "LD02", "LD03", "LD04", "LD05"]
    );
}

#[rstest]
fn resolution_without_suggestions_has_no_details() {
    let error = Error::resolution("card not found", Vec::new());
    assert!(error.details().is_none());
    assert!(error.suggestions().is_empty());
}

#[rstest]
fn serialises_with_snake_case_code() {
    let error = Error::size("Main Deck cannot exceed 60 cards");
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "size", "message": "Main Deck cannot exceed 60 cards" })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result = serde_json::from_value::<Error>(json!({ "code": "limit", "message": " " }));
    assert!(result.is_err());
}
