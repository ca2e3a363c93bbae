//! Database connection and schema bootstrap

use crate::app_config::DatabaseConfig;
use crate::orm::{choices, questions};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

/// Open a connection pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());
    opt.max_connections(config.max_connections)
        .sqlx_logging(false);

    // Every pooled connection to an in-memory SQLite database is its own
    // database, so the pool must hold exactly one.
    if config.url.starts_with("sqlite::memory:") {
        opt.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opt).await?;
    log::info!("Connected to {:?} database", db.get_database_backend());

    Ok(db)
}

/// Create the questions and choices tables if they do not exist.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_questions = schema.create_table_from_entity(questions::Entity);
    create_questions.if_not_exists();
    db.execute(backend.build(&create_questions)).await?;

    let mut create_choices = schema.create_table_from_entity(choices::Entity);
    create_choices.if_not_exists();
    db.execute(backend.build(&create_choices)).await?;

    log::debug!("Schema ready");
    Ok(())
}
