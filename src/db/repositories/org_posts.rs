use diesel::prelude::*;

use crate::db::models::OrgPost;

pub struct OrgPostsRepo;

impl OrgPostsRepo {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<OrgPost>, diesel::result::Error> {
        use crate::schema::org_posts::dsl::*;
        org_posts
            .select(OrgPost::as_select())
            .order(id.asc())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        post_id: i32,
    ) -> Result<Option<OrgPost>, diesel::result::Error> {
        use crate::schema::org_posts::dsl::*;
        org_posts
            .filter(id.eq(post_id))
            .select(OrgPost::as_select())
            .first::<OrgPost>(conn)
            .optional()
    }
}
