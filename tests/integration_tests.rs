//! Service-level tests against a real Postgres database.
//!
//! Set `TEST_DATABASE_URL` and run with `cargo test -- --ignored`. Every test
//! runs inside a rolled back transaction.

use chrono::NaiveDate;
use diesel::prelude::*;
use talentmap_backend::{
    db::{
        enums::{BidStatus, SharableKind, ShareMode},
        models::{
            AuthUser, BidCycle, CreateBidCycleRequest, CreateSavedSearchRequest, NewBid,
            NewOrgPost, NewPosition, OrgPost, Position, RegisterRequest, SavedSearch,
            UpdateBidCycleRequest, UpdateSavedSearchRequest,
        },
        repositories::{bidcycles::BidCyclesRepo, bids::BidsRepo},
        run_migrations,
    },
    error::{AppError, AppResult},
    filters::{Endpoint, FilterMap, FilterSet},
    services::{
        AuthService, BidCyclesService, PositionsService, SavedSearchesService, SharingService,
        context::RequestContext, sharing_service::ShareOutcome,
    },
    validation::share::ShareCommand,
};

mod unit;

const BASE_URL: &str = "http://localhost:8000";

fn connection() -> PgConnection {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let mut conn = PgConnection::establish(&url).expect("failed to connect to test database");
    run_migrations(&mut conn).expect("failed to run migrations");
    conn
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn filters(pairs: &[(&str, &str)]) -> FilterMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
        .collect()
}

fn user(conn: &mut PgConnection, username: &str) -> AppResult<RequestContext> {
    let user = AuthService::register(
        conn,
        &RegisterRequest {
            email: format!("{}@state.gov", username),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password: "Passw0rd!".to_string(),
        },
        4,
    )?;
    RequestContext::for_user(
        conn,
        &AuthUser {
            id: user.id,
            email: user.email,
            username: user.username,
        },
    )
}

fn post(conn: &mut PgConnection, location: &str) -> AppResult<OrgPost> {
    Ok(diesel::insert_into(talentmap_backend::schema::org_posts::table)
        .values(&NewOrgPost {
            location: location.to_string(),
            differential_rate: 0,
            danger_pay: 0,
        })
        .returning(OrgPost::as_returning())
        .get_result(conn)?)
}

fn position(conn: &mut PgConnection, number: &str, post_id: Option<i32>) -> AppResult<Position> {
    Ok(diesel::insert_into(talentmap_backend::schema::positions::table)
        .values(&NewPosition {
            position_number: number.to_string(),
            title: format!("Officer {}", number),
            grade: Some("04".to_string()),
            skill: None,
            post_id,
        })
        .returning(Position::as_returning())
        .get_result(conn)?)
}

/// Active cycle far enough in the future to be the current one.
fn current_cycle(conn: &mut PgConnection) -> AppResult<BidCycle> {
    BidCyclesService::create(
        conn,
        CreateBidCycleRequest {
            name: "Test cycle".to_string(),
            cycle_start_date: date("2999-01-01"),
            cycle_deadline_date: None,
            cycle_end_date: date("3000-01-01"),
            active: true,
        },
    )
}

fn saved_search(
    conn: &mut PgConnection,
    ctx: &RequestContext,
    endpoint: &str,
    pairs: &[(&str, &str)],
) -> AppResult<SavedSearch> {
    SavedSearchesService::create(
        conn,
        ctx,
        &CreateSavedSearchRequest {
            name: "search".to_string(),
            endpoint: endpoint.to_string(),
            filters: filters(pairs),
        },
    )
}

#[test]
#[ignore = "requires database"]
fn invalid_cycle_patch_leaves_record_unchanged() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let cycle = current_cycle(conn)?;

        let patch = UpdateBidCycleRequest {
            cycle_end_date: Some(date("1988-01-01")),
            ..Default::default()
        };
        let err = BidCyclesService::update(conn, cycle.id, &patch).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let stored = BidCyclesService::get(conn, cycle.id)?;
        assert_eq!(stored.cycle_end_date, date("3000-01-01"));

        let patch = UpdateBidCycleRequest {
            cycle_deadline_date: Some(Some(date("2999-06-01"))),
            ..Default::default()
        };
        let updated = BidCyclesService::update(conn, cycle.id, &patch)?;
        assert_eq!(updated.cycle_deadline_date, Some(date("2999-06-01")));
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn saved_search_update_validates_merged_state() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let ctx = user(conn, "searcher")?;
        let search = saved_search(conn, &ctx, "/api/v1/position/", &[("position_number__startswith", "56")])?;

        // stored filters are checked against the new endpoint
        let patch = UpdateSavedSearchRequest {
            name: None,
            endpoint: Some("/api/v1/orgpost/".to_string()),
            filters: None,
        };
        let err = SavedSearchesService::update(conn, &ctx, search.id, &patch).unwrap_err();
        match err {
            AppError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("position_number__startswith"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // new filters are checked against the stored endpoint
        let patch = UpdateSavedSearchRequest {
            name: None,
            endpoint: None,
            filters: Some(filters(&[("danger_pay__gt", "0")])),
        };
        let err = SavedSearchesService::update(conn, &ctx, search.id, &patch).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("danger_pay__gt")),
            other => panic!("expected validation error, got {other:?}"),
        }

        let stored = SavedSearchesService::get(conn, &ctx, search.id)?;
        assert_eq!(stored.endpoint, "/api/v1/position/");
        assert_eq!(stored.filter_map()?, filters(&[("position_number__startswith", "56")]));

        let patch = UpdateSavedSearchRequest {
            name: Some("posts".to_string()),
            endpoint: Some("/api/v1/orgpost/".to_string()),
            filters: Some(filters(&[("danger_pay__gt", "0")])),
        };
        let updated = SavedSearchesService::update(conn, &ctx, search.id, &patch)?;
        assert_eq!(updated.endpoint, "/api/v1/orgpost/");
        assert_eq!(updated.name, "posts");
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn cycle_membership_lifecycle() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let cycle = current_cycle(conn)?;
        let p = position(conn, "ZZT-M1", None)?;

        let missing = BidCyclesService::check_position(conn, cycle.id, p.id).unwrap_err();
        assert!(matches!(missing, AppError::NotFound { .. }));

        BidCyclesService::add_position(conn, cycle.id, p.id)?;
        // adding twice is a no-op
        BidCyclesService::add_position(conn, cycle.id, p.id)?;
        BidCyclesService::check_position(conn, cycle.id, p.id)?;
        assert_eq!(BidCyclesRepo::count_positions(conn, cycle.id)?, 1);

        BidCyclesService::remove_position(conn, cycle.id, p.id)?;
        assert!(BidCyclesService::check_position(conn, cycle.id, p.id).is_err());

        let unknown = BidCyclesService::add_position(conn, cycle.id, -1).unwrap_err();
        assert!(matches!(unknown, AppError::NotFound { .. }));
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn batch_add_only_accepts_position_searches() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let ctx = user(conn, "batchowner")?;
        let cycle = current_cycle(conn)?;
        position(conn, "ZZT56-1", None)?;
        position(conn, "ZZT56-2", None)?;
        position(conn, "ZZT1-1", None)?;

        let posts = saved_search(conn, &ctx, "/api/v1/orgpost/", &[("danger_pay__gte", "0")])?;
        let err = BidCyclesService::add_positions_from_saved_search(conn, &ctx, cycle.id, posts.id)
            .unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("endpoint")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(BidCyclesRepo::count_positions(conn, cycle.id)?, 0);

        let search = saved_search(
            conn,
            &ctx,
            "/api/v1/position/",
            &[("position_number__startswith", "ZZT56")],
        )?;
        let matched =
            BidCyclesService::add_positions_from_saved_search(conn, &ctx, cycle.id, search.id)?;
        assert_eq!(matched, 2);
        assert_eq!(BidCyclesRepo::count_positions(conn, cycle.id)?, 2);

        let refreshed = SavedSearchesService::update_count(conn, &ctx, search.id)?;
        assert_eq!(refreshed.count, 2);

        let stranger = user(conn, "batchstranger")?;
        let foreign =
            BidCyclesService::add_positions_from_saved_search(conn, &stranger, cycle.id, search.id)
                .unwrap_err();
        assert!(matches!(foreign, AppError::NotFound { .. }));
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn handshake_bids_remove_positions_from_availability() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let ctx = user(conn, "bidder")?;
        let cycle = current_cycle(conn)?;
        let mut ids = Vec::new();
        for n in 1..=3 {
            let p = position(conn, &format!("ZZTA-{}", n), None)?;
            BidCyclesService::add_position(conn, cycle.id, p.id)?;
            ids.push(p.id);
        }
        BidsRepo::insert(
            conn,
            &NewBid {
                bidcycle_id: cycle.id,
                position_id: ids[1],
                user_id: ctx.profile_id,
                status: BidStatus::HandshakeOffered,
            },
        )?;

        let count_with = |conn: &mut PgConnection, available: &str| -> AppResult<usize> {
            let set = FilterSet::parse(
                Endpoint::Position,
                &filters(&[
                    ("position_number__startswith", "ZZTA-"),
                    ("is_available_in_current_bidcycle", available),
                ]),
            )?;
            Ok(PositionsService::matching(conn, &set)?.len())
        };
        assert_eq!(count_with(conn, "true")?, 2);
        assert_eq!(count_with(conn, "false")?, 1);
        assert_eq!(PositionsService::get(conn, ids[1])?.is_available_in_current_bidcycle, Some(false));
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn internal_share_is_visible_to_the_recipient_only() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let sharer = user(conn, "sharer")?;
        let recipient = user(conn, "recipient")?;
        let paris = post(conn, "Paris, France")?;
        let p = position(conn, "ZZTS-1", Some(paris.id))?;

        let outcome = SharingService::share(
            conn,
            &sharer,
            &ShareCommand {
                mode: ShareMode::Internal,
                kind: SharableKind::Position,
                id: p.id,
                email: "recipient@state.gov".to_string(),
            },
        )?;
        let ShareOutcome::Internal(sharable_id) = outcome else {
            panic!("expected an internal share");
        };

        let received = SharingService::list_received(conn, &recipient, BASE_URL)?;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].sharing_user, "sharer");
        assert!(!received[0].read);
        let content = received[0].content.as_ref().unwrap();
        assert_eq!(content.representation, "[ZZTS-1] Officer ZZTS-1 (Paris, France)");
        assert_eq!(content.url, format!("{}/api/v1/position/{}/", BASE_URL, p.id));

        assert!(SharingService::list_received(conn, &sharer, BASE_URL)?.is_empty());

        let denied = SharingService::mark_read(conn, &sharer, sharable_id, true, BASE_URL).unwrap_err();
        assert!(matches!(denied, AppError::NotFound { .. }));
        let read = SharingService::mark_read(conn, &recipient, sharable_id, true, BASE_URL)?;
        assert!(read.read);
        Ok(())
    });
}

#[test]
#[ignore = "requires database"]
fn email_share_stores_nothing_and_missing_objects_are_not_found() {
    let mut conn = connection();
    conn.test_transaction::<_, AppError, _>(|conn| {
        let sharer = user(conn, "mailer")?;
        let p = position(conn, "ZZTE-1", None)?;
        let count = |conn: &mut PgConnection| -> AppResult<i64> {
            use talentmap_backend::schema::sharables::dsl::*;
            Ok(sharables.count().get_result(conn)?)
        };
        let before = count(conn)?;

        let cmd = ShareCommand {
            mode: ShareMode::Email,
            kind: SharableKind::Position,
            id: p.id,
            email: "nobody@example.com".to_string(),
        };
        match SharingService::share(conn, &sharer, &cmd)? {
            ShareOutcome::Email(email) => {
                assert_eq!(email.to, "nobody@example.com");
                assert!(email.body.ends_with("\tPost: N/A"));
            }
            other => panic!("expected an e-mail, got {other:?}"),
        }
        assert_eq!(count(conn)?, before);

        let missing_target = SharingService::share(conn, &sharer, &ShareCommand { id: -1, ..cmd.clone() });
        match missing_target {
            Err(AppError::NotFound { message }) => {
                assert_eq!(message, "Object with id -1 does not exist")
            }
            other => panic!("expected not found, got {other:?}"),
        }

        let missing_user = SharingService::share(
            conn,
            &sharer,
            &ShareCommand {
                mode: ShareMode::Internal,
                ..cmd
            },
        );
        match missing_user {
            Err(AppError::NotFound { message }) => {
                assert_eq!(message, "User with email nobody@example.com does not exist")
            }
            other => panic!("expected not found, got {other:?}"),
        }
        assert_eq!(count(conn)?, before);
        Ok(())
    });
}
