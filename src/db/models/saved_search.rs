use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::filters::FilterMap;

// Saved search models
#[derive(Queryable, Selectable, Identifiable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::saved_searches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedSearch {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub endpoint: String,
    pub filters: serde_json::Value,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedSearch {
    pub fn filter_map(&self) -> AppResult<FilterMap> {
        serde_json::from_value(self.filters.clone()).map_err(|e| {
            AppError::internal(format!("Saved search {} has malformed filters: {}", self.id, e))
        })
    }
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::saved_searches)]
pub struct NewSavedSearch {
    pub owner_id: i32,
    pub name: String,
    pub endpoint: String,
    pub filters: serde_json::Value,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = crate::schema::saved_searches)]
pub struct SavedSearchChanges {
    pub name: String,
    pub endpoint: String,
    pub filters: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateSavedSearchRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub endpoint: String,
    #[serde(default)]
    pub filters: FilterMap,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateSavedSearchRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub filters: Option<FilterMap>,
}
