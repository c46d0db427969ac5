use diesel::prelude::*;

use crate::db::models::{
    NewProfile, NewProfileFavoritePosition, NewProfileLanguageQualification, Profile,
};

pub struct ProfilesRepo;

impl ProfilesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_profile: &NewProfile,
    ) -> Result<Profile, diesel::result::Error> {
        diesel::insert_into(crate::schema::user_profiles::table)
            .values(new_profile)
            .returning(Profile::as_returning())
            .get_result(conn)
    }

    pub fn find_by_user_id(
        conn: &mut PgConnection,
        target_user_id: uuid::Uuid,
    ) -> Result<Option<Profile>, diesel::result::Error> {
        use crate::schema::user_profiles::dsl::*;
        user_profiles
            .filter(user_id.eq(target_user_id))
            .select(Profile::as_select())
            .first::<Profile>(conn)
            .optional()
    }

    /// Profile of the active user registered under `target_email`.
    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<Profile>, diesel::result::Error> {
        use crate::schema::{user_profiles, users};
        user_profiles::table
            .inner_join(users::table)
            .filter(users::email.eq(target_email))
            .filter(users::is_active.eq(true))
            .select(Profile::as_select())
            .first::<Profile>(conn)
            .optional()
    }

    /// `(profile id, username)` pairs for the given profiles.
    pub fn usernames(
        conn: &mut PgConnection,
        profile_ids: &[i32],
    ) -> Result<Vec<(i32, String)>, diesel::result::Error> {
        use crate::schema::{user_profiles, users};
        user_profiles::table
            .inner_join(users::table)
            .filter(user_profiles::id.eq_any(profile_ids))
            .select((user_profiles::id, users::username))
            .load(conn)
    }

    pub fn language_ids(
        conn: &mut PgConnection,
        target_profile_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::profile_language_qualifications::dsl::*;
        profile_language_qualifications
            .filter(profile_id.eq(target_profile_id))
            .select(language_qualification_id)
            .order(language_qualification_id.asc())
            .load(conn)
    }

    pub fn favorite_position_ids(
        conn: &mut PgConnection,
        target_profile_id: i32,
    ) -> Result<Vec<i32>, diesel::result::Error> {
        use crate::schema::profile_favorite_positions::dsl::*;
        profile_favorite_positions
            .filter(profile_id.eq(target_profile_id))
            .select(position_id)
            .order(position_id.asc())
            .load(conn)
    }

    pub fn replace_languages(
        conn: &mut PgConnection,
        target_profile_id: i32,
        ids: &[i32],
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::profile_language_qualifications::dsl::*;
        diesel::delete(profile_language_qualifications.filter(profile_id.eq(target_profile_id)))
            .execute(conn)?;
        if ids.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewProfileLanguageQualification> = ids
            .iter()
            .map(|&id| NewProfileLanguageQualification {
                profile_id: target_profile_id,
                language_qualification_id: id,
            })
            .collect();
        diesel::insert_into(profile_language_qualifications)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)
    }

    pub fn replace_favorites(
        conn: &mut PgConnection,
        target_profile_id: i32,
        ids: &[i32],
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::profile_favorite_positions::dsl::*;
        diesel::delete(profile_favorite_positions.filter(profile_id.eq(target_profile_id)))
            .execute(conn)?;
        if ids.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewProfileFavoritePosition> = ids
            .iter()
            .map(|&id| NewProfileFavoritePosition {
                profile_id: target_profile_id,
                position_id: id,
            })
            .collect();
        diesel::insert_into(profile_favorite_positions)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)
    }
}
