use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::middleware::{DefaultHeaders, ErrorHandlers, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;
use polls::app_config;
use polls::db::{connect, create_schema};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is normal outside development.
    dotenv::dotenv().ok();
    // Config comes first: it carries the default log level.
    let loaded = app_config::init();
    init_lib_mods();
    match loaded {
        Ok(()) => log::info!("Configuration loaded: site.name = {}", app_config::site().name),
        Err(e) => log::warn!("Failed to load config file, using defaults: {}", e),
    }

    let db_config = app_config::database();
    let db = connect(&db_config)
        .await
        .expect("Failed to connect to the database");

    if db_config.create_schema {
        create_schema(&db)
            .await
            .expect("Failed to create database schema");
    }

    let db = Data::new(db);
    let secret_key = polls::middleware::session_key();
    let bind = app_config::server().bind;

    log::info!("Listening on {}", bind);

    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            .app_data(db.clone())
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::BAD_REQUEST, polls::web::error::render_400)
                    .handler(StatusCode::NOT_FOUND, polls::web::error::render_404)
                    .handler(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        polls::web::error::render_500,
                    ),
            )
            .wrap(polls::middleware::session_middleware(secret_key.clone()))
            .wrap(Logger::new("%a %r %s %T"))
            .configure(polls::web::configure)
    })
    .bind(bind)?
    .run()
    .await
}

/// Initialize third party crates we rely on but don't have control over.
pub fn init_lib_mods() {
    let log_level = app_config::server().log_level;
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
}
