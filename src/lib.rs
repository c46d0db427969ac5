pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::config::ServerConfig;
use crate::middleware::auth::JwtService;
use axum::{Router, http::HeaderValue};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
};
use tower_layer::Layer;
use tracing_subscriber::EnvFilter;

pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let jwt = JwtService::new(&config.auth());
        Self {
            db,
            config: Arc::new(config),
            jwt,
        }
    }

    pub fn conn(&self) -> AppResult<DbConn> {
        Ok(self.db.get()?)
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if server.cors_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    cors.allow_origin(origins)
}

/// The served application: the API router behind CORS, with trailing
/// slashes trimmed before routing so `/share/` and `/share` match alike.
pub fn app(state: Arc<AppState>) -> NormalizePath<Router> {
    let cors = cors_layer(&state.config.server());
    let router = routes::create_router(state).layer(cors);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level_filter = match logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => logging.level.as_str(),
        _ => "info",
    };
    // RUST_LOG, when set, takes precedence over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
