/// Error types for the article service
///
/// Failures surface as plain-text HTTP responses so the rendering layer can
/// show the message directly. Unauthenticated is the one exception: it
/// resolves to a redirect to the login page rather than a 401, matching the
/// login-wall behavior of the write endpoints.
use actix_web::http::{header, StatusCode};
use actix_web::{error::ResponseError, HttpResponse};
use thiserror::Error;

/// Result type for article-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    /// Missing or invalid credentials on a login-walled endpoint.
    /// Carries the full login URL (with `next` query) to redirect to.
    #[error("Authentication required")]
    Unauthenticated { redirect_to: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthenticated { .. } => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated { redirect_to } => HttpResponse::Found()
                .insert_header((header::LOCATION, redirect_to.as_str()))
                .finish(),
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal server error")
            }
            other => HttpResponse::build(other.status_code())
                .content_type("text/plain; charset=utf-8")
                .body(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(_: validator::ValidationErrors) -> Self {
        AppError::Validation("The form contains invalid data. Please fill it out again.".to_string())
    }
}
