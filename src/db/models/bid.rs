use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::BidStatus;

// Bid models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::bids)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bid {
    pub id: i32,
    pub bidcycle_id: i32,
    pub position_id: i32,
    pub user_id: i32,
    pub status: BidStatus,
    pub submission_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::bids)]
pub struct NewBid {
    pub bidcycle_id: i32,
    pub position_id: i32,
    pub user_id: i32,
    pub status: BidStatus,
}

#[derive(Deserialize, Debug)]
pub struct CreateBidRequest {
    pub bidcycle: i32,
    pub position: i32,
}
