use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use diary::config::Config;
use diary::core::db::Database;
use diary::core::helpers::CredentialService;

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}

fn cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    let creds = web::Data::new(CredentialService::new(config.hash_cost)?);

    // Without a store there is nothing to serve.
    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("could not reach the database at {}", config.database_host))?;
    tracing::info!(host = %config.database_host, "connected to the database");
    let db = web::Data::new(db);

    let origins = config.cors_allowed_origins.clone();
    let server_db = db.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .configure(diary::configure_app(server_db.clone(), creds.clone()))
    })
    .bind(("0.0.0.0", config.port))?
    .run();

    tracing::info!("Server listening on http://0.0.0.0:{}", config.port);
    server.await?;

    match Arc::try_unwrap(db.into_inner()) {
        Ok(db) => {
            db.close().await?;
            tracing::info!("database connection closed");
        }
        Err(_) => tracing::warn!("database handle still shared at shutdown; leaving it to drop"),
    }

    Ok(())
}
