use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::ApiResponse,
    filters::Endpoint,
    middleware::auth::AuthUserInfo,
    routes::ListParams,
    services::PositionsService,
};

/// Supports every position filter, including
/// `is_available_in_current_bidcycle`.
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = match ListParams::parse(&query, Endpoint::Position, state.config.pagination()) {
        Ok(params) => params,
        Err(err) => return err.into_response(),
    };
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match PositionsService::list(&mut conn, &params.filters, params.page, params.limit) {
        Ok(page) => {
            let response = ApiResponse::success(page, "Positions retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_position(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(position_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match PositionsService::get(&mut conn, position_id) {
        Ok(position) => {
            let response = ApiResponse::success(position, "Position retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
