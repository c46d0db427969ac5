use chrono::Utc;
use diesel::prelude::*;

use crate::db::models::{NewSavedSearch, SavedSearch, SavedSearchChanges};

pub struct SavedSearchesRepo;

impl SavedSearchesRepo {
    pub fn list_by_owner(
        conn: &mut PgConnection,
        profile_id: i32,
    ) -> Result<Vec<SavedSearch>, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        saved_searches
            .filter(owner_id.eq(profile_id))
            .select(SavedSearch::as_select())
            .order(id.asc())
            .load(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<SavedSearch>, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        saved_searches
            .select(SavedSearch::as_select())
            .order(id.asc())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        search_id: i32,
    ) -> Result<Option<SavedSearch>, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        saved_searches
            .filter(id.eq(search_id))
            .select(SavedSearch::as_select())
            .first::<SavedSearch>(conn)
            .optional()
    }

    pub fn find_owned(
        conn: &mut PgConnection,
        search_id: i32,
        profile_id: i32,
    ) -> Result<Option<SavedSearch>, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        saved_searches
            .filter(id.eq(search_id))
            .filter(owner_id.eq(profile_id))
            .select(SavedSearch::as_select())
            .first::<SavedSearch>(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_search: &NewSavedSearch,
    ) -> Result<SavedSearch, diesel::result::Error> {
        diesel::insert_into(crate::schema::saved_searches::table)
            .values(new_search)
            .returning(SavedSearch::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        search_id: i32,
        changes: &SavedSearchChanges,
    ) -> Result<SavedSearch, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        diesel::update(saved_searches.filter(id.eq(search_id)))
            .set(changes)
            .returning(SavedSearch::as_returning())
            .get_result(conn)
    }

    pub fn set_count(
        conn: &mut PgConnection,
        search_id: i32,
        new_count: i32,
    ) -> Result<SavedSearch, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        diesel::update(saved_searches.filter(id.eq(search_id)))
            .set((count.eq(new_count), updated_at.eq(Utc::now())))
            .returning(SavedSearch::as_returning())
            .get_result(conn)
    }

    pub fn delete_owned(
        conn: &mut PgConnection,
        search_id: i32,
        profile_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::saved_searches::dsl::*;
        diesel::delete(
            saved_searches
                .filter(id.eq(search_id))
                .filter(owner_id.eq(profile_id)),
        )
        .execute(conn)
    }
}
