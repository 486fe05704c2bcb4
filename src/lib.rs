//! Personal diary backend.
//!
//! Users register and log in with an email and password; posts are created,
//! listed, fetched and deleted per user. Every route runs one parameterized
//! statement against the store through [`core::db::Database`].

pub mod auth;
pub mod config;
pub mod core;
pub mod handlers;
pub mod models;
pub mod posts;
pub mod users;

use actix_web::web;

use crate::core::db::Database;
use crate::core::helpers::CredentialService;

/// Registers shared state and every route on an actix `App`.
pub fn configure_app(
    db: web::Data<Database>,
    creds: web::Data<CredentialService>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(db).app_data(creds);
        handlers::configure(cfg);
    }
}
