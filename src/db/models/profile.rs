use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Representation, SharableView, UserSummary};

#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct NewProfile {
    pub user_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profile_language_qualifications)]
pub struct NewProfileLanguageQualification {
    pub profile_id: i32,
    pub language_qualification_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profile_favorite_positions)]
pub struct NewProfileFavoritePosition {
    pub profile_id: i32,
    pub position_id: i32,
}

/// The caller's profile with its nested collections.
#[derive(Serialize, Debug)]
pub struct ProfileResponse {
    pub id: i32,
    pub user: UserSummary,
    pub language_qualifications: Vec<Representation>,
    pub favorite_positions: Vec<Representation>,
    pub received_shares: Vec<SharableView>,
}

/// Only these two collections are writable; each replaces the stored set.
#[derive(Deserialize, Validate, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100, message = "Too many language qualifications"))]
    pub language_qualifications: Option<Vec<i32>>,
    #[validate(length(max = 500, message = "Too many favorite positions"))]
    pub favorite_positions: Option<Vec<i32>>,
}
