use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::filters::{FieldValue, Filterable};

// Bid cycle models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::bid_cycles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BidCycle {
    pub id: i32,
    pub name: String,
    pub cycle_start_date: NaiveDate,
    pub cycle_end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cycle_deadline_date: Option<NaiveDate>,
}

/// Full intended state of a bid cycle. Built from a create request, or from a
/// stored cycle with a patch applied, and validated before it is written.
#[derive(Insertable, AsChangeset, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::bid_cycles)]
#[diesel(treat_none_as_null = true)]
pub struct NewBidCycle {
    pub name: String,
    pub cycle_start_date: NaiveDate,
    pub cycle_deadline_date: Option<NaiveDate>,
    pub cycle_end_date: NaiveDate,
    pub active: bool,
}

#[derive(Deserialize, Debug)]
pub struct CreateBidCycleRequest {
    pub name: String,
    pub cycle_start_date: NaiveDate,
    #[serde(default)]
    pub cycle_deadline_date: Option<NaiveDate>,
    pub cycle_end_date: NaiveDate,
    #[serde(default)]
    pub active: bool,
}

impl From<CreateBidCycleRequest> for NewBidCycle {
    fn from(req: CreateBidCycleRequest) -> Self {
        Self {
            name: req.name,
            cycle_start_date: req.cycle_start_date,
            cycle_deadline_date: req.cycle_deadline_date,
            cycle_end_date: req.cycle_end_date,
            active: req.active,
        }
    }
}

/// Partial update. `cycle_deadline_date` distinguishes "absent" (`None`) from
/// an explicit `null` (`Some(None)`), which clears the deadline.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateBidCycleRequest {
    pub name: Option<String>,
    pub cycle_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub cycle_deadline_date: Option<Option<NaiveDate>>,
    pub cycle_end_date: Option<NaiveDate>,
    pub active: Option<bool>,
}

fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateBidCycleRequest {
    /// Stored values overridden by whatever the patch supplies.
    pub fn merge_into(&self, existing: &BidCycle) -> NewBidCycle {
        NewBidCycle {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            cycle_start_date: self.cycle_start_date.unwrap_or(existing.cycle_start_date),
            cycle_deadline_date: self
                .cycle_deadline_date
                .unwrap_or(existing.cycle_deadline_date),
            cycle_end_date: self.cycle_end_date.unwrap_or(existing.cycle_end_date),
            active: self.active.unwrap_or(existing.active),
        }
    }
}

impl Filterable for BidCycle {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "id" => FieldValue::Integer(Some(self.id as i64)),
            "name" => FieldValue::Text(Some(&self.name)),
            "active" => FieldValue::Boolean(Some(self.active)),
            "cycle_start_date" => FieldValue::Date(Some(self.cycle_start_date)),
            "cycle_deadline_date" => FieldValue::Date(self.cycle_deadline_date),
            "cycle_end_date" => FieldValue::Date(Some(self.cycle_end_date)),
            _ => FieldValue::Missing,
        }
    }
}

// Cycle position linkage
#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::cycle_positions)]
pub struct NewCyclePosition {
    pub bidcycle_id: i32,
    pub position_id: i32,
    pub cp_id: Option<String>,
    pub ted: Option<DateTime<Utc>>,
}

impl NewCyclePosition {
    pub fn link(bidcycle_id: i32, position_id: i32) -> Self {
        Self {
            bidcycle_id,
            position_id,
            cp_id: None,
            ted: None,
        }
    }
}
