use diesel::prelude::*;

use crate::db::models::{NewSharable, Sharable};

pub struct SharablesRepo;

impl SharablesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_sharable: &NewSharable,
    ) -> Result<Sharable, diesel::result::Error> {
        diesel::insert_into(crate::schema::sharables::table)
            .values(new_sharable)
            .returning(Sharable::as_returning())
            .get_result(conn)
    }

    pub fn list_received(
        conn: &mut PgConnection,
        profile_id: i32,
    ) -> Result<Vec<Sharable>, diesel::result::Error> {
        use crate::schema::sharables::dsl::*;
        sharables
            .filter(receiving_user_id.eq(profile_id))
            .select(Sharable::as_select())
            .order((created_at.desc(), id.desc()))
            .load(conn)
    }

    pub fn find_received(
        conn: &mut PgConnection,
        sharable_id_val: i32,
        profile_id: i32,
    ) -> Result<Option<Sharable>, diesel::result::Error> {
        use crate::schema::sharables::dsl::*;
        sharables
            .filter(id.eq(sharable_id_val))
            .filter(receiving_user_id.eq(profile_id))
            .select(Sharable::as_select())
            .first::<Sharable>(conn)
            .optional()
    }

    pub fn set_read(
        conn: &mut PgConnection,
        sharable_id_val: i32,
        read_val: bool,
    ) -> Result<Sharable, diesel::result::Error> {
        use crate::schema::sharables::dsl::*;
        diesel::update(sharables.filter(id.eq(sharable_id_val)))
            .set(read.eq(read_val))
            .returning(Sharable::as_returning())
            .get_result(conn)
    }
}
