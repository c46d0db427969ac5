use serde_json::Value;

use crate::db::enums::{ShareMode, SharableKind};
use crate::db::models::{EmailPayload, Position, ShareRequest};
use crate::error::{AppError, AppResult};

/// A share request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareCommand {
    pub mode: ShareMode,
    pub kind: SharableKind,
    pub id: i32,
    pub email: String,
}

fn join_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> String {
    tags.into_iter().collect::<Vec<_>>().join(",")
}

/// Checks `mode`, `type`, `id` and `email` in that order and stops at the
/// first problem.
pub fn validate_share_request(req: ShareRequest) -> AppResult<ShareCommand> {
    let mode = req.mode.ok_or_else(|| {
        AppError::invalid_field("mode", "POSTs to this endpoint require the 'mode' parameter")
    })?;
    let mode = ShareMode::parse(&mode).ok_or_else(|| {
        AppError::invalid_field(
            "mode",
            format!(
                "Mode must be one of the following: {}",
                join_tags(ShareMode::ALL.iter().map(ShareMode::as_str))
            ),
        )
    })?;

    let kind = req.kind.ok_or_else(|| {
        AppError::invalid_field("type", "POSTs to this endpoint require the 'type' parameter")
    })?;
    let kind = SharableKind::parse(&kind).ok_or_else(|| {
        AppError::invalid_field(
            "type",
            format!(
                "Type must be one of the following: {}",
                join_tags(SharableKind::ALL.iter().map(SharableKind::as_str))
            ),
        )
    })?;

    let id = match req.id {
        None | Some(Value::Null) => {
            return Err(AppError::invalid_field(
                "id",
                "id of sharable object must be specified",
            ));
        }
        Some(value) => parse_object_id(&value).ok_or_else(|| {
            AppError::invalid_field("id", "id of sharable object must be an integer")
        })?,
    };

    let email = req
        .email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .ok_or_else(|| {
            AppError::invalid_field(
                "email",
                "E-mail shares require an 'email' parameter to be specified",
            )
        })?;

    Ok(ShareCommand {
        mode,
        kind,
        id,
        email,
    })
}

/// Accepts a JSON integer or a numeric string.
fn parse_object_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// E-mail for a shared position. The post line reads `N/A` when the
/// position has no post.
pub fn format_position_email(to: &str, position: &Position, post: Option<&str>) -> EmailPayload {
    EmailPayload {
        to: to.to_string(),
        subject: format!("[TalentMAP] Shared {}", SharableKind::Position.as_str()),
        body: format!(
            "This position has been shared with you via TalentMAP\n\n\tPosition Number: {}\n\tPosition Title: {}\n\tPost: {}",
            position.position_number,
            position.title,
            post.unwrap_or("N/A")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn request(value: Value) -> ShareRequest {
        serde_json::from_value(value).unwrap()
    }

    fn message_for(value: Value) -> String {
        match validate_share_request(request(value)) {
            Err(AppError::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn fields_are_checked_in_order() {
        assert_eq!(
            message_for(json!({})),
            "POSTs to this endpoint require the 'mode' parameter"
        );
        assert_eq!(
            message_for(json!({"mode": "fax"})),
            "Mode must be one of the following: email,internal"
        );
        assert_eq!(
            message_for(json!({"mode": "email"})),
            "POSTs to this endpoint require the 'type' parameter"
        );
        assert_eq!(
            message_for(json!({"mode": "email", "type": "post"})),
            "Type must be one of the following: position"
        );
        assert_eq!(
            message_for(json!({"mode": "email", "type": "position"})),
            "id of sharable object must be specified"
        );
        assert_eq!(
            message_for(json!({"mode": "email", "type": "position", "id": 1})),
            "E-mail shares require an 'email' parameter to be specified"
        );
    }

    #[test]
    fn id_accepts_numeric_strings_only() {
        let ok = validate_share_request(request(
            json!({"mode": "internal", "type": "position", "id": "12", "email": "a@b.gov"}),
        ))
        .unwrap();
        assert_eq!(ok.id, 12);
        assert_eq!(ok.mode, ShareMode::Internal);

        assert_eq!(
            message_for(json!({"mode": "email", "type": "position", "id": "twelve", "email": "a@b.gov"})),
            "id of sharable object must be an integer"
        );
        assert_eq!(
            message_for(json!({"mode": "email", "type": "position", "id": 1.5, "email": "a@b.gov"})),
            "id of sharable object must be an integer"
        );
    }

    #[test]
    fn email_body_lists_position_details() {
        let position = Position {
            id: 1,
            position_number: "56001".to_string(),
            title: "Political Officer".to_string(),
            grade: None,
            skill: None,
            post_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let payload = format_position_email("shareuser@state.gov", &position, None);
        assert_eq!(payload.to, "shareuser@state.gov");
        assert_eq!(payload.subject, "[TalentMAP] Shared position");
        assert_eq!(
            payload.body,
            "This position has been shared with you via TalentMAP\n\n\tPosition Number: 56001\n\tPosition Title: Political Officer\n\tPost: N/A"
        );

        let with_post = format_position_email("x@y.gov", &position, Some("Paris, France"));
        assert!(with_post.body.ends_with("\tPost: Paris, France"));
    }
}
