use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, CreateBidRequest},
    middleware::auth::AuthUserInfo,
    services::{BidsService, context::RequestContext},
    validation::JsonBody,
};

pub async fn list_bids(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match BidsService::list(&mut conn, &ctx) {
        Ok(bids) => {
            let response = ApiResponse::success(bids, "Bids retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_bid(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    JsonBody(payload): JsonBody<CreateBidRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match BidsService::create(&mut conn, &ctx, &payload) {
        Ok(bid) => {
            let response = ApiResponse::created(bid, "Bid created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
