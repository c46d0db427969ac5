use chrono::Utc;
use serde_json::json;
use talentmap_backend::db::enums::{SharableKind, ShareMode};
use talentmap_backend::db::models::{Position, ShareRequest};
use talentmap_backend::error::AppError;
use talentmap_backend::validation::share::{format_position_email, validate_share_request};

fn request(value: serde_json::Value) -> ShareRequest {
    serde_json::from_value(value).unwrap()
}

#[test]
fn internal_share_with_string_id_is_accepted() {
    let cmd = validate_share_request(request(json!({
        "mode": "internal",
        "type": "position",
        "id": "42",
        "email": " jane@state.gov ",
    })))
    .unwrap();
    assert_eq!(cmd.mode, ShareMode::Internal);
    assert_eq!(cmd.kind, SharableKind::Position);
    assert_eq!(cmd.id, 42);
    assert_eq!(cmd.email, "jane@state.gov");
}

#[test]
fn internal_share_still_needs_an_email() {
    let result = validate_share_request(request(json!({
        "mode": "internal",
        "type": "position",
        "id": 1,
    })));
    match result {
        Err(AppError::Validation { field, message }) => {
            assert_eq!(field.as_deref(), Some("email"));
            assert_eq!(message, "E-mail shares require an 'email' parameter to be specified");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn non_integer_id_is_rejected() {
    let result = validate_share_request(request(json!({
        "mode": "email",
        "type": "position",
        "id": "abc",
        "email": "jane@state.gov",
    })));
    assert!(matches!(
        result,
        Err(AppError::Validation { ref message, .. }) if message == "id of sharable object must be an integer"
    ));
}

#[test]
fn email_body_lists_position_details() {
    let position = Position {
        id: 7,
        position_number: "56001".to_string(),
        title: "Economic Officer".to_string(),
        grade: None,
        skill: None,
        post_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let email = format_position_email("jane@state.gov", &position, Some("Paris, France"));
    assert_eq!(email.to, "jane@state.gov");
    assert_eq!(email.subject, "[TalentMAP] Shared position");
    assert!(email.body.starts_with("This position has been shared with you via TalentMAP"));
    assert!(email.body.contains("\tPosition Number: 56001"));
    assert!(email.body.contains("\tPosition Title: Economic Officer"));
    assert!(email.body.ends_with("\tPost: Paris, France"));

    let without_post = format_position_email("jane@state.gov", &position, None);
    assert!(without_post.body.ends_with("\tPost: N/A"));
}
