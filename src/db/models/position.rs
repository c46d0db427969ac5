use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::filters::{FieldValue, Filterable};

// Position models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Position {
    pub id: i32,
    pub position_number: String,
    pub title: String,
    pub grade: Option<String>,
    pub skill: Option<String>,
    pub post_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::positions)]
pub struct NewPosition {
    pub position_number: String,
    pub title: String,
    pub grade: Option<String>,
    pub skill: Option<String>,
    pub post_id: Option<i32>,
}

impl Position {
    /// `[position_number] title (post)`, post omitted when unassigned.
    pub fn representation(&self, post_location: Option<&str>) -> String {
        match post_location {
            Some(location) => format!("[{}] {} ({})", self.position_number, self.title, location),
            None => format!("[{}] {}", self.position_number, self.title),
        }
    }
}

/// A position as seen by the catalogue: its post location and whether it is
/// open in the current bid cycle (`None` when it is not part of that cycle).
#[derive(Serialize, Clone, Debug)]
pub struct PositionListing {
    #[serde(flatten)]
    pub position: Position,
    pub post: Option<String>,
    pub is_available_in_current_bidcycle: Option<bool>,
    pub representation: String,
}

impl PositionListing {
    pub fn new(position: Position, post: Option<String>, available: Option<bool>) -> Self {
        let representation = position.representation(post.as_deref());
        Self {
            position,
            post,
            is_available_in_current_bidcycle: available,
            representation,
        }
    }
}

impl Filterable for PositionListing {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        let p = &self.position;
        match field {
            "id" => FieldValue::Integer(Some(p.id as i64)),
            "position_number" => FieldValue::Text(Some(&p.position_number)),
            "title" => FieldValue::Text(Some(&p.title)),
            "grade" => FieldValue::Text(p.grade.as_deref()),
            "skill" => FieldValue::Text(p.skill.as_deref()),
            "post" => FieldValue::Integer(p.post_id.map(i64::from)),
            "is_available_in_current_bidcycle" => {
                FieldValue::Boolean(self.is_available_in_current_bidcycle)
            }
            _ => FieldValue::Missing,
        }
    }
}

/// Minimal nested form used inside profile responses.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Representation {
    pub id: i32,
    pub representation: String,
}
