pub mod models;
pub mod repositories;
pub mod schema;

use eyre::{Result, WrapErr};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 5;

/// Connects eagerly; an unreachable database is reported here.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to PostgreSQL")
}

/// SQLSTATE Postgres reports when an insert collides with a UNIQUE constraint.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Whether a repository failure was caused by a UNIQUE constraint.
pub fn is_unique_violation(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}
