use diesel::prelude::*;

use crate::{
    db::models::{ProfileResponse, Representation, UpdateProfileRequest, UserSummary},
    db::repositories::{
        languages::LanguagesRepo, positions::PositionsRepo, profiles::ProfilesRepo,
        users::UsersRepo,
    },
    error::{AppError, AppResult},
    services::{context::RequestContext, sharing_service::SharingService},
};

pub struct ProfilesService;

/// Sorted, deduplicated copy of `ids`.
fn unique_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// First id of `requested` that is not in `found`.
fn first_unknown(requested: &[i32], found: &[i32]) -> Option<i32> {
    requested.iter().copied().find(|id| !found.contains(id))
}

impl ProfilesService {
    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        base_url: &str,
    ) -> AppResult<ProfileResponse> {
        let user = UsersRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("user"))?;

        let language_ids = ProfilesRepo::language_ids(conn, ctx.profile_id)?;
        let language_qualifications = LanguagesRepo::find_by_ids(conn, &language_ids)?
            .into_iter()
            .map(|language| Representation {
                id: language.id,
                representation: language.representation(),
            })
            .collect();

        let favorite_ids = ProfilesRepo::favorite_position_ids(conn, ctx.profile_id)?;
        let favorite_positions = PositionsRepo::find_many_with_post(conn, &favorite_ids)?
            .into_iter()
            .map(|(position, post)| Representation {
                id: position.id,
                representation: position.representation(post.as_deref()),
            })
            .collect();

        Ok(ProfileResponse {
            id: ctx.profile_id,
            user: UserSummary::from(&user),
            language_qualifications,
            favorite_positions,
            received_shares: SharingService::list_received(conn, ctx, base_url)?,
        })
    }

    /// Each supplied list replaces the stored set. Unknown ids reject the
    /// whole update.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &UpdateProfileRequest,
        base_url: &str,
    ) -> AppResult<ProfileResponse> {
        conn.transaction::<_, AppError, _>(|conn| {
            if let Some(requested) = &req.language_qualifications {
                let ids = unique_ids(requested);
                let found: Vec<i32> = LanguagesRepo::find_by_ids(conn, &ids)?
                    .into_iter()
                    .map(|language| language.id)
                    .collect();
                if let Some(unknown) = first_unknown(&ids, &found) {
                    return Err(AppError::invalid_field(
                        "language_qualifications",
                        format!("Invalid language qualification id {}", unknown),
                    ));
                }
                ProfilesRepo::replace_languages(conn, ctx.profile_id, &ids)?;
            }

            if let Some(requested) = &req.favorite_positions {
                let ids = unique_ids(requested);
                let found = PositionsRepo::existing_ids(conn, &ids)?;
                if let Some(unknown) = first_unknown(&ids, &found) {
                    return Err(AppError::invalid_field(
                        "favorite_positions",
                        format!("Invalid position id {}", unknown),
                    ));
                }
                ProfilesRepo::replace_favorites(conn, ctx.profile_id, &ids)?;
            }

            Ok(())
        })?;

        tracing::info!(profile_id = ctx.profile_id, "Profile updated");
        Self::get(conn, ctx, base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_deduplicated() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn first_unknown_reports_missing_id() {
        assert_eq!(first_unknown(&[1, 2, 3], &[1, 3]), Some(2));
        assert_eq!(first_unknown(&[1, 3], &[3, 1]), None);
    }
}
