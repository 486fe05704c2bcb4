use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Store or hashing failure. Only `message` is shown to the caller.
    #[error("Internal Error: {message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err`: wraps any failure as an internal error that
    /// answers with `message`.
    pub fn internal<E>(message: &'static str) -> impl FnOnce(E) -> ApiError
    where
        E: Into<anyhow::Error>,
    {
        move |err| ApiError::Internal {
            message,
            source: err.into(),
        }
    }

    fn public_message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized => "Invalid credentials",
            ApiError::NotFound(msg) => msg,
            ApiError::Internal { message, .. } => message,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal { message, source } = self {
            tracing::error!(error = ?source, "{}", message);
        }

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.public_message().to_string())
    }
}
