use std::collections::HashMap;

use diesel::prelude::*;

use crate::{
    db::enums::{SharableKind, ShareMode},
    db::models::{EmailPayload, NewSharable, Position, Sharable, SharableView, SharedContent},
    db::repositories::{
        positions::PositionsRepo, profiles::ProfilesRepo, sharables::SharablesRepo,
    },
    error::{AppError, AppResult},
    filters::Endpoint,
    services::context::RequestContext,
    validation::{
        auth::normalize_email,
        share::{ShareCommand, format_position_email},
    },
};

/// What a share request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    /// Email mode: the message that would be sent. Nothing is stored.
    Email(EmailPayload),
    /// Internal mode: id of the stored share.
    Internal(i32),
}

/// A shared object, loaded so it can be rendered.
enum ShareTarget {
    Position(Position, Option<String>),
}

pub struct SharingService;

impl SharingService {
    fn load_target(conn: &mut PgConnection, kind: SharableKind, id: i32) -> AppResult<ShareTarget> {
        let target = match kind {
            SharableKind::Position => PositionsRepo::find_with_post(conn, id)?
                .map(|(position, post)| ShareTarget::Position(position, post)),
        };
        target.ok_or_else(|| AppError::missing(format!("Object with id {} does not exist", id)))
    }

    pub fn share(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        cmd: &ShareCommand,
    ) -> AppResult<ShareOutcome> {
        let target = Self::load_target(conn, cmd.kind, cmd.id)?;

        match cmd.mode {
            ShareMode::Email => {
                let payload = match &target {
                    ShareTarget::Position(position, post) => {
                        format_position_email(&cmd.email, position, post.as_deref())
                    }
                };
                tracing::info!(kind = cmd.kind.as_str(), id = cmd.id, "Share e-mail prepared");
                Ok(ShareOutcome::Email(payload))
            }
            ShareMode::Internal => conn.transaction::<_, AppError, _>(|conn| {
                let receiver = ProfilesRepo::find_by_email(conn, &normalize_email(&cmd.email))?
                    .ok_or_else(|| {
                        AppError::missing(format!("User with email {} does not exist", cmd.email))
                    })?;

                let sharable = SharablesRepo::insert(
                    conn,
                    &NewSharable {
                        sharing_user_id: ctx.profile_id,
                        receiving_user_id: receiver.id,
                        sharable_model: cmd.kind,
                        sharable_id: cmd.id,
                    },
                )?;
                tracing::info!(
                    sharable_id = sharable.id,
                    sharing_profile = ctx.profile_id,
                    receiving_profile = receiver.id,
                    "Internal share created"
                );
                Ok(ShareOutcome::Internal(sharable.id))
            }),
        }
    }

    pub fn list_received(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        base_url: &str,
    ) -> AppResult<Vec<SharableView>> {
        let sharables = SharablesRepo::list_received(conn, ctx.profile_id)?;
        Self::render(conn, base_url, sharables)
    }

    /// Only the receiver may change the read flag; anyone else gets 404.
    pub fn mark_read(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        sharable_id: i32,
        read: bool,
        base_url: &str,
    ) -> AppResult<SharableView> {
        let updated = conn.transaction::<_, AppError, _>(|conn| {
            SharablesRepo::find_received(conn, sharable_id, ctx.profile_id)?
                .ok_or_else(|| AppError::not_found("sharable"))?;
            Ok(SharablesRepo::set_read(conn, sharable_id, read)?)
        })?;

        Self::render(conn, base_url, vec![updated])?
            .pop()
            .ok_or_else(|| AppError::internal("Rendered share went missing"))
    }

    /// Resolves user names and the current state of every shared object.
    /// Objects that no longer exist render as `content: null`.
    pub fn render(
        conn: &mut PgConnection,
        base_url: &str,
        sharables: Vec<Sharable>,
    ) -> AppResult<Vec<SharableView>> {
        let mut profile_ids: Vec<i32> = sharables
            .iter()
            .flat_map(|s| [s.sharing_user_id, s.receiving_user_id])
            .collect();
        profile_ids.sort_unstable();
        profile_ids.dedup();
        let usernames: HashMap<i32, String> =
            ProfilesRepo::usernames(conn, &profile_ids)?.into_iter().collect();

        let mut contents: HashMap<(SharableKind, i32), SharedContent> = HashMap::new();
        for kind in SharableKind::ALL {
            let ids: Vec<i32> = sharables
                .iter()
                .filter(|s| s.sharable_model == kind)
                .map(|s| s.sharable_id)
                .collect();
            if ids.is_empty() {
                continue;
            }
            for (id, content) in Self::resolve_contents(conn, base_url, kind, &ids)? {
                contents.insert((kind, id), content);
            }
        }

        let name_of = |profile_id: i32| usernames.get(&profile_id).cloned().unwrap_or_default();
        Ok(sharables
            .into_iter()
            .map(|s| SharableView {
                id: s.id,
                sharing_user: name_of(s.sharing_user_id),
                receiving_user: name_of(s.receiving_user_id),
                content: contents.get(&(s.sharable_model, s.sharable_id)).cloned(),
                read: s.read,
            })
            .collect())
    }

    fn resolve_contents(
        conn: &mut PgConnection,
        base_url: &str,
        kind: SharableKind,
        ids: &[i32],
    ) -> AppResult<Vec<(i32, SharedContent)>> {
        match kind {
            SharableKind::Position => Ok(PositionsRepo::find_many_with_post(conn, ids)?
                .into_iter()
                .map(|(position, post)| {
                    let content = SharedContent {
                        representation: position.representation(post.as_deref()),
                        url: Endpoint::Position.detail_url(base_url, position.id),
                    };
                    (position.id, content)
                })
                .collect()),
        }
    }
}
