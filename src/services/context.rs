use diesel::PgConnection;
use uuid::Uuid;

use crate::db::models::AuthUser;
use crate::db::repositories::profiles::ProfilesRepo;
use crate::error::{AppError, AppResult};

/// Who is making the request: the authenticated user and their profile.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub profile_id: i32,
}

impl RequestContext {
    pub fn for_user(conn: &mut PgConnection, user: &AuthUser) -> AppResult<Self> {
        let profile = ProfilesRepo::find_by_user_id(conn, user.id)?
            .ok_or_else(|| AppError::auth("User profile not found"))?;
        Ok(Self {
            user_id: user.id,
            profile_id: profile.id,
        })
    }
}
