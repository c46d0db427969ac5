use chrono::Utc;
use diesel::prelude::*;

use crate::db::models::{BidCycle, NewBidCycle, NewCyclePosition, Position};

pub struct BidCyclesRepo;

impl BidCyclesRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<BidCycle>, diesel::result::Error> {
        use crate::schema::bid_cycles::dsl::*;
        bid_cycles
            .select(BidCycle::as_select())
            .order((cycle_start_date.asc(), id.asc()))
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        cycle_id: i32,
    ) -> Result<Option<BidCycle>, diesel::result::Error> {
        use crate::schema::bid_cycles::dsl::*;
        bid_cycles
            .filter(id.eq(cycle_id))
            .select(BidCycle::as_select())
            .first::<BidCycle>(conn)
            .optional()
    }

    /// The active cycle with the latest start date; ties go to the newest row.
    pub fn find_current(conn: &mut PgConnection) -> Result<Option<BidCycle>, diesel::result::Error> {
        use crate::schema::bid_cycles::dsl::*;
        bid_cycles
            .filter(active.eq(true))
            .select(BidCycle::as_select())
            .order((cycle_start_date.desc(), id.desc()))
            .first::<BidCycle>(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_cycle: &NewBidCycle,
    ) -> Result<BidCycle, diesel::result::Error> {
        diesel::insert_into(crate::schema::bid_cycles::table)
            .values(new_cycle)
            .returning(BidCycle::as_returning())
            .get_result(conn)
    }

    /// Writes the complete state, so a cleared deadline is stored as NULL.
    pub fn update(
        conn: &mut PgConnection,
        cycle_id: i32,
        changes: &NewBidCycle,
    ) -> Result<BidCycle, diesel::result::Error> {
        use crate::schema::bid_cycles::dsl::*;
        diesel::update(bid_cycles.filter(id.eq(cycle_id)))
            .set((changes, updated_at.eq(Utc::now())))
            .returning(BidCycle::as_returning())
            .get_result(conn)
    }

    pub fn has_position(
        conn: &mut PgConnection,
        cycle_id: i32,
        target_position_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::cycle_positions::dsl::*;
        diesel::select(diesel::dsl::exists(
            cycle_positions
                .filter(bidcycle_id.eq(cycle_id))
                .filter(position_id.eq(target_position_id)),
        ))
        .get_result(conn)
    }

    /// Inserts the links that do not exist yet and returns how many were new.
    pub fn attach_positions(
        conn: &mut PgConnection,
        cycle_id: i32,
        position_ids: &[i32],
    ) -> Result<usize, diesel::result::Error> {
        if position_ids.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewCyclePosition> = position_ids
            .iter()
            .map(|&pid| NewCyclePosition::link(cycle_id, pid))
            .collect();
        diesel::insert_into(crate::schema::cycle_positions::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)
    }

    pub fn detach_position(
        conn: &mut PgConnection,
        cycle_id: i32,
        target_position_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::cycle_positions::dsl::*;
        diesel::delete(
            cycle_positions
                .filter(bidcycle_id.eq(cycle_id))
                .filter(position_id.eq(target_position_id)),
        )
        .execute(conn)
    }

    pub fn position_ids(
        conn: &mut PgConnection,
        cycle_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::cycle_positions::dsl::*;
        cycle_positions
            .filter(bidcycle_id.eq(cycle_id))
            .select(position_id)
            .order(position_id.asc())
            .load(conn)
    }

    pub fn count_positions(
        conn: &mut PgConnection,
        cycle_id: i32,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::cycle_positions::dsl::*;
        cycle_positions
            .filter(bidcycle_id.eq(cycle_id))
            .count()
            .get_result(conn)
    }

    pub fn positions(
        conn: &mut PgConnection,
        cycle_id: i32,
    ) -> Result<Vec<(Position, Option<String>)>, diesel::result::Error> {
        use crate::schema::{cycle_positions, org_posts, positions};
        cycle_positions::table
            .inner_join(positions::table.left_join(org_posts::table))
            .filter(cycle_positions::bidcycle_id.eq(cycle_id))
            .select((Position::as_select(), org_posts::location.nullable()))
            .order(positions::id.asc())
            .load(conn)
    }
}
