use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, CreateBidCycleRequest, UpdateBidCycleRequest},
    filters::Endpoint,
    middleware::auth::AuthUserInfo,
    routes::{ListParams, parse_page},
    services::{BidCyclesService, context::RequestContext},
    validation::JsonBody,
};

pub async fn list_bidcycles(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = match ListParams::parse(&query, Endpoint::BidCycle, state.config.pagination()) {
        Ok(params) => params,
        Err(err) => return err.into_response(),
    };
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::list(&mut conn, &params.filters, params.page, params.limit) {
        Ok(page) => {
            let response = ApiResponse::success(page, "Bid cycles retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_bidcycle(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    JsonBody(payload): JsonBody<CreateBidCycleRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::create(&mut conn, payload) {
        Ok(cycle) => {
            let response = ApiResponse::created(cycle, "Bid cycle created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_bidcycle(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(bidcycle_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::get(&mut conn, bidcycle_id) {
        Ok(cycle) => {
            let response = ApiResponse::success(cycle, "Bid cycle retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_bidcycle(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(bidcycle_id): Path<i32>,
    JsonBody(payload): JsonBody<UpdateBidCycleRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::update(&mut conn, bidcycle_id, &payload) {
        Ok(cycle) => {
            let response = ApiResponse::success(cycle, "Bid cycle updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_bidcycle_positions(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(bidcycle_id): Path<i32>,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let (page, limit) = match parse_page(&query, state.config.pagination()) {
        Ok(paging) => paging,
        Err(err) => return err.into_response(),
    };
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::positions(&mut conn, bidcycle_id, page, limit) {
        Ok(page) => {
            let response = ApiResponse::success(page, "Bid cycle positions retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 204 when the position is in the cycle, 404 when it is not.
pub async fn check_position(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path((bidcycle_id, position_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::check_position(&mut conn, bidcycle_id, position_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn add_position(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path((bidcycle_id, position_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::add_position(&mut conn, bidcycle_id, position_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn remove_position(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path((bidcycle_id, position_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::remove_position(&mut conn, bidcycle_id, position_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn batch_add_positions(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path((bidcycle_id, saved_search_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match BidCyclesService::add_positions_from_saved_search(
        &mut conn,
        &ctx,
        bidcycle_id,
        saved_search_id,
    ) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
