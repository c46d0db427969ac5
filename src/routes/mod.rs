pub mod auth;
pub mod bidcycles;
pub mod bids;
pub mod org_posts;
pub mod positions;
pub mod profile;
pub mod saved_searches;
pub mod share;

use crate::AppState;
use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};
use crate::filters::{Endpoint, FilterSet, filter_map_from_query, registry::API_PREFIX};
use crate::middleware::{auth::auth_middleware, request_tracking_middleware};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
};
use std::sync::Arc;

/// Pagination and filters of a list request.
#[derive(Debug)]
pub struct ListParams {
    pub filters: FilterSet,
    pub page: i64,
    pub limit: i64,
}

impl ListParams {
    /// Every query key other than `page` and `limit` must be a filter the
    /// endpoint declares.
    pub fn parse(
        pairs: &[(String, String)],
        endpoint: Endpoint,
        pagination: PaginationConfig,
    ) -> AppResult<Self> {
        let (page, limit) = parse_page(pairs, pagination)?;
        let filters = FilterSet::parse(endpoint, &filter_map_from_query(pairs))?;
        Ok(Self {
            filters,
            page,
            limit,
        })
    }
}

/// `page` and `limit` from the query; other keys are ignored.
pub fn parse_page(pairs: &[(String, String)], pagination: PaginationConfig) -> AppResult<(i64, i64)> {
    let page = query_number(pairs, "page")?;
    let limit = query_number(pairs, "limit")?;
    Ok(pagination.resolve(page, limit))
}

fn query_number(pairs: &[(String, String)], key: &str) -> AppResult<Option<i64>> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, value)| {
            value.trim().parse::<i64>().map_err(|_| {
                AppError::invalid_field(key, format!("'{}' must be an integer", key))
            })
        })
        .transpose()
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Everything except registration and login requires a bearer token
    let protected_routes = Router::new()
        .route(
            "/bidcycle",
            get(bidcycles::list_bidcycles).post(bidcycles::create_bidcycle),
        )
        .route(
            "/bidcycle/:bidcycle_id",
            get(bidcycles::get_bidcycle).patch(bidcycles::update_bidcycle),
        )
        .route(
            "/bidcycle/:bidcycle_id/positions",
            get(bidcycles::get_bidcycle_positions),
        )
        .route(
            "/bidcycle/:bidcycle_id/position/:position_id",
            get(bidcycles::check_position)
                .put(bidcycles::add_position)
                .delete(bidcycles::remove_position),
        )
        .route(
            "/bidcycle/:bidcycle_id/position/batch/:saved_search_id",
            put(bidcycles::batch_add_positions),
        )
        .route("/position", get(positions::list_positions))
        .route("/position/:position_id", get(positions::get_position))
        .route("/orgpost", get(org_posts::list_org_posts))
        .route("/orgpost/:post_id", get(org_posts::get_org_post))
        .route("/bid", get(bids::list_bids).post(bids::create_bid))
        .route("/share", get(share::list_received).post(share::share))
        .route("/share/:sharable_id", patch(share::update_sharable))
        .route(
            "/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route(
            "/searches",
            get(saved_searches::list_saved_searches).post(saved_searches::create_saved_search),
        )
        .route(
            "/searches/:search_id",
            get(saved_searches::get_saved_search)
                .patch(saved_searches::update_saved_search)
                .delete(saved_searches::delete_saved_search),
        )
        .route(
            "/searches/:search_id/count",
            put(saved_searches::update_count),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let api = public_routes.merge(protected_routes).with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(from_fn(request_tracking_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_limit: 20,
            max_limit: 100,
        }
    }

    #[test]
    fn list_params_split_pagination_from_filters() {
        let params = ListParams::parse(
            &pairs(&[("page", "2"), ("limit", "5"), ("title__icontains", "officer")]),
            Endpoint::Position,
            pagination(),
        )
        .unwrap();
        assert_eq!((params.page, params.limit), (2, 5));
        assert_eq!(params.filters.criteria.len(), 1);
    }

    #[test]
    fn unknown_query_keys_are_rejected() {
        assert!(
            ListParams::parse(&pairs(&[("bureau", "AF")]), Endpoint::Position, pagination())
                .is_err()
        );
        assert!(
            ListParams::parse(&pairs(&[("page", "two")]), Endpoint::Position, pagination())
                .is_err()
        );
    }
}
