use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::filters::{FieldValue, Filterable};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::org_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrgPost {
    pub id: i32,
    pub location: String,
    pub differential_rate: i32,
    pub danger_pay: i32,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::org_posts)]
pub struct NewOrgPost {
    pub location: String,
    pub differential_rate: i32,
    pub danger_pay: i32,
}

impl OrgPost {
    pub fn representation(&self) -> String {
        self.location.clone()
    }
}

impl Filterable for OrgPost {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "id" => FieldValue::Integer(Some(self.id as i64)),
            "location" => FieldValue::Text(Some(&self.location)),
            "differential_rate" => FieldValue::Integer(Some(self.differential_rate as i64)),
            "danger_pay" => FieldValue::Integer(Some(self.danger_pay as i64)),
            _ => FieldValue::Missing,
        }
    }
}
