use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::db::{Database, Param};
use crate::core::errors::ApiError;
use crate::core::helpers::{CredentialService, RequestFields};

/// # POST /registerUser
pub async fn register_user(
    db: web::Data<Database>,
    creds: web::Data<CredentialService>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let fields = RequestFields::from_body(&req, &body)?;
    let (email, password) = match (fields.get("email"), fields.get("password")) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    let hasher = creds.get_ref().clone();
    let hashed_password = web::block(move || hasher.hash_password(&password))
        .await
        .map_err(ApiError::internal("Error while hashing password"))?
        .map_err(ApiError::internal("Error while hashing password"))?;

    // A duplicate email trips the store's unique constraint and lands here too.
    db.execute(
        "INSERT INTO Users (EmailID, HashedPassword) VALUES (?, ?)",
        &[Param::Text(email), Param::Text(hashed_password)],
    )
    .await
    .map_err(ApiError::internal("Failed to register user"))?;

    tracing::info!("user registered");
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("User registered"))
}
