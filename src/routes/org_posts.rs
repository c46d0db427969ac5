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
    services::OrgPostsService,
};

pub async fn list_org_posts(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Query(query): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = match ListParams::parse(&query, Endpoint::OrgPost, state.config.pagination()) {
        Ok(params) => params,
        Err(err) => return err.into_response(),
    };
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match OrgPostsService::list(&mut conn, &params.filters, params.page, params.limit) {
        Ok(page) => {
            let response = ApiResponse::success(page, "Posts retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_org_post(
    State(state): State<Arc<AppState>>,
    _auth_info: AuthUserInfo,
    Path(post_id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match OrgPostsService::get(&mut conn, post_id) {
        Ok(post) => {
            let response = ApiResponse::success(post, "Post retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
