use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::db::{Database, Param};
use crate::core::errors::ApiError;
use crate::core::helpers::{CredentialService, RequestFields};
use crate::models::models::{LoginResponse, UserCredentials};

/// # POST /userLogin
///
/// Unknown email and wrong password both answer 401 with the same body.
/// No session or token is issued: the returned `userID` is all the client
/// gets.
pub async fn login_user(
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

    let user = db
        .fetch_optional::<UserCredentials>(
            "SELECT ID, HashedPassword FROM Users WHERE EmailID = ? LIMIT 1",
            &[Param::Text(email)],
        )
        .await
        .map_err(ApiError::internal("DB error"))?
        .ok_or(ApiError::Unauthorized)?;

    let verifier = creds.get_ref().clone();
    let hashed = user.hashed_password;
    let matches = web::block(move || verifier.verify_password(&password, &hashed))
        .await
        .map_err(ApiError::internal("Server error"))?;

    if !matches {
        return Err(ApiError::Unauthorized);
    }

    tracing::debug!(user_id = user.id, "login succeeded");
    Ok(HttpResponse::Ok().json(LoginResponse { user_id: user.id }))
}
