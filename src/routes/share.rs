use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, ShareRequest, UpdateSharableRequest},
    middleware::auth::AuthUserInfo,
    services::{
        SharingService, context::RequestContext, sharing_service::ShareOutcome,
    },
    validation::{JsonBody, share::validate_share_request},
};

/// 202 in both modes. E-mail shares return the prepared message; internal
/// shares return no body.
pub async fn share(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    JsonBody(payload): JsonBody<ShareRequest>,
) -> impl IntoResponse {
    // malformed requests are rejected before touching the database
    let command = match validate_share_request(payload) {
        Ok(command) => command,
        Err(err) => return err.into_response(),
    };

    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SharingService::share(&mut conn, &ctx, &command) {
        Ok(ShareOutcome::Email(email)) => {
            let response = ApiResponse::accepted(json!({ "email": email }), "Share e-mail prepared");
            (StatusCode::ACCEPTED, Json(response)).into_response()
        }
        Ok(ShareOutcome::Internal(_)) => StatusCode::ACCEPTED.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_received(
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

    match SharingService::list_received(&mut conn, &ctx, &state.config.api_base_url) {
        Ok(shares) => {
            let response = ApiResponse::success(shares, "Shares retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_sharable(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(sharable_id): Path<i32>,
    JsonBody(payload): JsonBody<UpdateSharableRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SharingService::mark_read(
        &mut conn,
        &ctx,
        sharable_id,
        payload.read,
        &state.config.api_base_url,
    ) {
        Ok(share) => {
            let response = ApiResponse::success(share, "Share updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
