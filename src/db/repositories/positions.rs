use diesel::prelude::*;

use crate::db::models::Position;

pub struct PositionsRepo;

impl PositionsRepo {
    /// Every position with the location of its post, if any.
    pub fn list_with_post(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Position, Option<String>)>, diesel::result::Error> {
        use crate::schema::{org_posts, positions};
        positions::table
            .left_join(org_posts::table)
            .select((Position::as_select(), org_posts::location.nullable()))
            .order(positions::id.asc())
            .load(conn)
    }

    pub fn find_with_post(
        conn: &mut PgConnection,
        position_id: i32,
    ) -> Result<Option<(Position, Option<String>)>, diesel::result::Error> {
        use crate::schema::{org_posts, positions};
        positions::table
            .left_join(org_posts::table)
            .filter(positions::id.eq(position_id))
            .select((Position::as_select(), org_posts::location.nullable()))
            .first(conn)
            .optional()
    }

    pub fn find_many_with_post(
        conn: &mut PgConnection,
        ids: &[i32],
    ) -> Result<Vec<(Position, Option<String>)>, diesel::result::Error> {
        use crate::schema::{org_posts, positions};
        positions::table
            .left_join(org_posts::table)
            .filter(positions::id.eq_any(ids))
            .select((Position::as_select(), org_posts::location.nullable()))
            .order(positions::id.asc())
            .load(conn)
    }

    pub fn exists(conn: &mut PgConnection, position_id: i32) -> Result<bool, diesel::result::Error> {
        use crate::schema::positions::dsl::*;
        diesel::select(diesel::dsl::exists(positions.filter(id.eq(position_id)))).get_result(conn)
    }

    /// The subset of `ids` that name existing positions.
    pub fn existing_ids(
        conn: &mut PgConnection,
        ids: &[i32],
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::positions::dsl::*;
        positions.filter(id.eq_any(ids)).select(id).load(conn)
    }
}
