use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::SharableKind;

// Sharable models
#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::sharables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Sharable {
    pub id: i32,
    pub sharing_user_id: i32,
    pub receiving_user_id: i32,
    pub sharable_model: SharableKind,
    pub sharable_id: i32,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::sharables)]
pub struct NewSharable {
    pub sharing_user_id: i32,
    pub receiving_user_id: i32,
    pub sharable_model: SharableKind,
    pub sharable_id: i32,
}

/// Live view of the shared object, resolved when the share is rendered.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SharedContent {
    pub representation: String,
    pub url: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct SharableView {
    pub id: i32,
    pub sharing_user: String,
    pub receiving_user: String,
    pub content: Option<SharedContent>,
    pub read: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateSharableRequest {
    pub read: bool,
}

/// Raw share request. Every field is optional here so that a missing one can
/// be reported by name instead of as a generic body error.
#[derive(Deserialize, Debug, Default)]
pub struct ShareRequest {
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<serde_json::Value>,
    pub email: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EmailPayload {
    pub to: String,
    pub subject: String,
    pub body: String,
}
