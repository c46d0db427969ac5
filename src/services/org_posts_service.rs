use diesel::prelude::*;

use crate::{
    db::models::{OrgPost, Page},
    db::repositories::org_posts::OrgPostsRepo,
    error::{AppError, AppResult},
    filters::FilterSet,
};

pub struct OrgPostsService;

impl OrgPostsService {
    pub fn matching(conn: &mut PgConnection, filters: &FilterSet) -> AppResult<Vec<OrgPost>> {
        Ok(filters.apply(OrgPostsRepo::list(conn)?))
    }

    pub fn list(
        conn: &mut PgConnection,
        filters: &FilterSet,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<OrgPost>> {
        Ok(Page::from_vec(Self::matching(conn, filters)?, page, limit))
    }

    pub fn get(conn: &mut PgConnection, post_id: i32) -> AppResult<OrgPost> {
        OrgPostsRepo::find_by_id(conn, post_id)?.ok_or_else(|| AppError::not_found("org post"))
    }
}
