use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, CreateSavedSearchRequest, UpdateSavedSearchRequest},
    middleware::auth::AuthUserInfo,
    services::{SavedSearchesService, context::RequestContext},
    validation::ValidatedJson,
};

pub async fn list_saved_searches(
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

    match SavedSearchesService::list(&mut conn, &ctx) {
        Ok(searches) => {
            let response = ApiResponse::success(searches, "Saved searches retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_saved_search(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    ValidatedJson(payload): ValidatedJson<CreateSavedSearchRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SavedSearchesService::create(&mut conn, &ctx, &payload) {
        Ok(search) => {
            let response = ApiResponse::created(search, "Saved search created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_saved_search(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(search_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SavedSearchesService::get(&mut conn, &ctx, search_id) {
        Ok(search) => {
            let response = ApiResponse::success(search, "Saved search retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_saved_search(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(search_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSavedSearchRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SavedSearchesService::update(&mut conn, &ctx, search_id, &payload) {
        Ok(search) => {
            let response = ApiResponse::success(search, "Saved search updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_saved_search(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(search_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SavedSearchesService::delete(&mut conn, &ctx, search_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

/// Re-runs the stored filters and returns the search with its new count.
pub async fn update_count(
    State(state): State<Arc<AppState>>,
    auth_info: AuthUserInfo,
    Path(search_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };
    let ctx = match RequestContext::for_user(&mut conn, &auth_info.user) {
        Ok(ctx) => ctx,
        Err(err) => return err.into_response(),
    };

    match SavedSearchesService::update_count(&mut conn, &ctx, search_id) {
        Ok(search) => {
            let response = ApiResponse::success(search, "Saved search count updated");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
