use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::models::{
        CreateSavedSearchRequest, NewSavedSearch, SavedSearch, SavedSearchChanges,
        UpdateSavedSearchRequest,
    },
    db::repositories::saved_searches::SavedSearchesRepo,
    error::{AppError, AppResult},
    filters::{Endpoint, FilterMap, FilterSet},
    services::{
        bidcycles_service::BidCyclesService, context::RequestContext,
        org_posts_service::OrgPostsService, positions_service::PositionsService,
    },
    validation::saved_search::validate_saved_search,
};

/// Outcome of refreshing every stored count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub failed: usize,
}

pub struct SavedSearchesService;

fn filters_json(filters: &FilterMap) -> AppResult<serde_json::Value> {
    serde_json::to_value(filters)
        .map_err(|e| AppError::internal(format!("Failed to encode filters: {}", e)))
}

impl SavedSearchesService {
    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> AppResult<Vec<SavedSearch>> {
        Ok(SavedSearchesRepo::list_by_owner(conn, ctx.profile_id)?)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateSavedSearchRequest,
    ) -> AppResult<SavedSearch> {
        validate_saved_search(&req.endpoint, &req.filters)?;

        let created = SavedSearchesRepo::insert(
            conn,
            &NewSavedSearch {
                owner_id: ctx.profile_id,
                name: req.name.clone(),
                endpoint: req.endpoint.clone(),
                filters: filters_json(&req.filters)?,
            },
        )?;
        tracing::info!(saved_search_id = created.id, endpoint = %created.endpoint, "Saved search created");
        Ok(created)
    }

    pub fn get(conn: &mut PgConnection, ctx: &RequestContext, search_id: i32) -> AppResult<SavedSearch> {
        SavedSearchesRepo::find_owned(conn, search_id, ctx.profile_id)?
            .ok_or_else(|| AppError::not_found("saved search"))
    }

    /// Incoming endpoint and filters are validated together with whichever
    /// of the two is kept from the stored record.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        search_id: i32,
        req: &UpdateSavedSearchRequest,
    ) -> AppResult<SavedSearch> {
        conn.transaction::<_, AppError, _>(|conn| {
            let existing = Self::get(conn, ctx, search_id)?;

            let endpoint = req.endpoint.clone().unwrap_or_else(|| existing.endpoint.clone());
            let filters = match &req.filters {
                Some(filters) => filters.clone(),
                None => existing.filter_map()?,
            };
            validate_saved_search(&endpoint, &filters)?;

            let changes = SavedSearchChanges {
                name: req.name.clone().unwrap_or_else(|| existing.name.clone()),
                endpoint,
                filters: filters_json(&filters)?,
                updated_at: Utc::now(),
            };
            Ok(SavedSearchesRepo::update(conn, search_id, &changes)?)
        })
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, search_id: i32) -> AppResult<()> {
        if SavedSearchesRepo::delete_owned(conn, search_id, ctx.profile_id)? == 0 {
            return Err(AppError::not_found("saved search"));
        }
        Ok(())
    }

    /// Number of live rows the filters currently match.
    pub fn count_matches(conn: &mut PgConnection, filters: &FilterSet) -> AppResult<i32> {
        let count = match filters.endpoint {
            Endpoint::Position => PositionsService::matching(conn, filters)?.len(),
            Endpoint::OrgPost => OrgPostsService::matching(conn, filters)?.len(),
            Endpoint::BidCycle => BidCyclesService::matching(conn, filters)?.len(),
        };
        i32::try_from(count).map_err(|_| AppError::internal("Saved search count overflow"))
    }

    /// Re-runs the stored filters and stores the new count.
    pub fn refresh_count(conn: &mut PgConnection, search: &SavedSearch) -> AppResult<SavedSearch> {
        conn.transaction::<_, AppError, _>(|conn| {
            let filters = validate_saved_search(&search.endpoint, &search.filter_map()?)?;
            let count = Self::count_matches(conn, &filters)?;
            let updated = SavedSearchesRepo::set_count(conn, search.id, count)?;
            tracing::debug!(saved_search_id = search.id, count, "Saved search count refreshed");
            Ok(updated)
        })
    }

    pub fn update_count(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        search_id: i32,
    ) -> AppResult<SavedSearch> {
        let search = Self::get(conn, ctx, search_id)?;
        Self::refresh_count(conn, &search)
    }

    /// Refreshes one search by id regardless of owner, or all of them.
    /// A search that fails is logged and skipped.
    pub fn refresh_all(conn: &mut PgConnection, only: Option<i32>) -> AppResult<RefreshSummary> {
        let searches = match only {
            Some(search_id) => vec![
                SavedSearchesRepo::find_by_id(conn, search_id)?
                    .ok_or_else(|| AppError::not_found("saved search"))?,
            ],
            None => SavedSearchesRepo::list_all(conn)?,
        };

        let mut summary = RefreshSummary::default();
        for search in &searches {
            match Self::refresh_count(conn, search) {
                Ok(updated) => {
                    summary.refreshed += 1;
                    tracing::info!(saved_search_id = updated.id, count = updated.count, "Count refreshed");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(saved_search_id = search.id, error = %e, "Count refresh failed");
                }
            }
        }
        Ok(summary)
    }
}
