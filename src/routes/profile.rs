use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, UpdateProfileRequest},
    middleware::auth::AuthUserInfo,
    services::{ProfilesService, context::RequestContext},
    validation::ValidatedJson,
};

pub async fn get_profile(
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

    match ProfilesService::get(&mut conn, &ctx, &state.config.api_base_url) {
        Ok(profile) => {
            let response = ApiResponse::success(profile, "Profile retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match ProfilesService::update(&mut conn, &ctx, &payload, &state.config.api_base_url) {
        Ok(profile) => {
            let response = ApiResponse::success(profile, "Profile updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
