use diesel::prelude::*;

use crate::{
    db::models::{
        BidCycle, CreateBidCycleRequest, NewBidCycle, Page, PositionListing, UpdateBidCycleRequest,
    },
    db::repositories::{
        bidcycles::BidCyclesRepo, positions::PositionsRepo, saved_searches::SavedSearchesRepo,
    },
    error::{AppError, AppResult},
    filters::{Endpoint, FilterSet},
    services::{context::RequestContext, positions_service::PositionsService},
    validation::{bidcycle::validate_bidcycle, saved_search::validate_saved_search},
};

pub struct BidCyclesService;

impl BidCyclesService {
    pub fn matching(conn: &mut PgConnection, filters: &FilterSet) -> AppResult<Vec<BidCycle>> {
        Ok(filters.apply(BidCyclesRepo::list(conn)?))
    }

    pub fn list(
        conn: &mut PgConnection,
        filters: &FilterSet,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<BidCycle>> {
        Ok(Page::from_vec(Self::matching(conn, filters)?, page, limit))
    }

    pub fn create(conn: &mut PgConnection, req: CreateBidCycleRequest) -> AppResult<BidCycle> {
        let new_cycle = NewBidCycle::from(req);
        validate_bidcycle(&new_cycle)?;

        let created = conn.transaction::<_, AppError, _>(|conn| {
            Ok(BidCyclesRepo::insert(conn, &new_cycle)?)
        })?;
        tracing::info!(bidcycle_id = created.id, name = %created.name, "Bid cycle created");
        Ok(created)
    }

    pub fn get(conn: &mut PgConnection, cycle_id: i32) -> AppResult<BidCycle> {
        BidCyclesRepo::find_by_id(conn, cycle_id)?.ok_or_else(|| AppError::not_found("bid cycle"))
    }

    /// Applies the patch on top of the stored cycle and validates the result
    /// as a whole, so a single-field change cannot break the date ordering.
    pub fn update(
        conn: &mut PgConnection,
        cycle_id: i32,
        req: &UpdateBidCycleRequest,
    ) -> AppResult<BidCycle> {
        conn.transaction::<_, AppError, _>(|conn| {
            let existing = Self::get(conn, cycle_id)?;
            let merged = req.merge_into(&existing);
            validate_bidcycle(&merged)?;

            let updated = BidCyclesRepo::update(conn, cycle_id, &merged)?;
            tracing::info!(bidcycle_id = cycle_id, "Bid cycle updated");
            Ok(updated)
        })
    }

    pub fn positions(
        conn: &mut PgConnection,
        cycle_id: i32,
        page: i64,
        limit: i64,
    ) -> AppResult<Page<PositionListing>> {
        Self::get(conn, cycle_id)?;
        PositionsService::in_cycle(conn, cycle_id, page, limit)
    }

    /// `Ok` when the position is a member, not-found otherwise.
    pub fn check_position(conn: &mut PgConnection, cycle_id: i32, position_id: i32) -> AppResult<()> {
        Self::get(conn, cycle_id)?;
        if BidCyclesRepo::has_position(conn, cycle_id, position_id)? {
            Ok(())
        } else {
            Err(AppError::missing(format!(
                "Position {} is not in bid cycle {}",
                position_id, cycle_id
            )))
        }
    }

    pub fn add_position(conn: &mut PgConnection, cycle_id: i32, position_id: i32) -> AppResult<()> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::get(conn, cycle_id)?;
            if !PositionsRepo::exists(conn, position_id)? {
                return Err(AppError::not_found("position"));
            }
            let inserted = BidCyclesRepo::attach_positions(conn, cycle_id, &[position_id])?;
            tracing::debug!(bidcycle_id = cycle_id, position_id, inserted, "Position attached");
            Ok(())
        })
    }

    pub fn remove_position(conn: &mut PgConnection, cycle_id: i32, position_id: i32) -> AppResult<()> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::get(conn, cycle_id)?;
            let removed = BidCyclesRepo::detach_position(conn, cycle_id, position_id)?;
            tracing::debug!(bidcycle_id = cycle_id, position_id, removed, "Position detached");
            Ok(())
        })
    }

    /// Attaches every position matched by one of the caller's saved searches.
    /// The search must target the position collection. Returns the number of
    /// matched positions.
    pub fn add_positions_from_saved_search(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        cycle_id: i32,
        saved_search_id: i32,
    ) -> AppResult<usize> {
        conn.transaction::<_, AppError, _>(|conn| {
            Self::get(conn, cycle_id)?;
            let search = SavedSearchesRepo::find_owned(conn, saved_search_id, ctx.profile_id)?
                .ok_or_else(|| AppError::not_found("saved search"))?;

            let filters = validate_saved_search(&search.endpoint, &search.filter_map()?)?;
            if filters.endpoint != Endpoint::Position {
                return Err(AppError::invalid_field(
                    "endpoint",
                    format!(
                        "Saved search {} targets {} and cannot add positions",
                        search.id, search.endpoint
                    ),
                ));
            }

            let ids: Vec<i32> = PositionsService::matching(conn, &filters)?
                .iter()
                .map(|listing| listing.position.id)
                .collect();
            let inserted = BidCyclesRepo::attach_positions(conn, cycle_id, &ids)?;

            tracing::info!(
                bidcycle_id = cycle_id,
                saved_search_id,
                matched = ids.len(),
                inserted,
                "Positions added from saved search"
            );
            Ok(ids.len())
        })
    }
}
