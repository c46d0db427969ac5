pub mod enums;
pub mod models;
pub mod repositories;

use std::time::Duration;

use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn create_pool(config: &Config) -> AppResult<DbPool> {
    let database = config.database();
    let manager = DbConnectionManager::<PgConnection>::new(&database.url);
    let pool = r2d2::Pool::builder()
        .max_size(database.max_connections)
        .min_idle(Some(database.min_connections))
        .connection_timeout(Duration::from_secs(database.connection_timeout))
        .build(manager)?;
    Ok(pool)
}

/// Applies every pending migration and returns the applied versions.
pub fn run_migrations(conn: &mut PgConnection) -> AppResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::Migration(e.to_string()))?;
    Ok(applied.into_iter().map(|version| version.to_string()).collect())
}
