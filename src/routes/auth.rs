use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{ApiResponse, LoginRequest, RegisterRequest, UserSummary},
    services::AuthService,
    validation::ValidatedJson,
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match AuthService::register(&mut conn, &payload, state.config.auth().bcrypt_cost) {
        Ok(user) => {
            let response =
                ApiResponse::created(UserSummary::from(&user), "User registered successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = match state.conn() {
        Ok(conn) => conn,
        Err(err) => return err.into_response(),
    };

    match AuthService::login(&mut conn, &state.jwt, &payload) {
        Ok(login) => {
            let response = ApiResponse::success(login, "Login successful");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
