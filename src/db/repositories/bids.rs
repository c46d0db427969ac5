use diesel::prelude::*;

use crate::db::enums::BidStatus;
use crate::db::models::{Bid, NewBid};

pub struct BidsRepo;

impl BidsRepo {
    pub fn list_by_user(
        conn: &mut PgConnection,
        profile_id: i32,
    ) -> Result<Vec<Bid>, diesel::result::Error> {
        use crate::schema::bids::dsl::*;
        bids.filter(user_id.eq(profile_id))
            .select(Bid::as_select())
            .order(created_at.desc())
            .load(conn)
    }

    pub fn insert(conn: &mut PgConnection, new_bid: &NewBid) -> Result<Bid, diesel::result::Error> {
        diesel::insert_into(crate::schema::bids::table)
            .values(new_bid)
            .returning(Bid::as_returning())
            .get_result(conn)
    }

    /// Positions in `cycle_id` holding at least one bid in a blocking status.
    pub fn blocked_position_ids(
        conn: &mut PgConnection,
        cycle_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::bids::dsl::*;
        // status values are normalized to snake_case by migration
        let blocking: Vec<&str> = BidStatus::blocking().iter().map(BidStatus::as_str).collect();
        bids.filter(bidcycle_id.eq(cycle_id))
            .filter(status.eq_any(blocking))
            .select(position_id)
            .distinct()
            .load(conn)
    }
}
