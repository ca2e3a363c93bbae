//! Test database setup
#![allow(dead_code)]

use polls::app_config::DatabaseConfig;
use sea_orm::{DatabaseConnection, DbErr};

/// Fresh in-memory SQLite database with the schema applied.
///
/// Each call returns an isolated database, so tests don't need cleanup.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        create_schema: true,
    };

    let db = polls::db::connect(&config).await?;
    polls::db::create_schema(&db).await?;

    Ok(db)
}
