/// HTTP middleware utilities for the article service
///
/// Bearer-token authentication implemented as an extractor: handlers that
/// need a logged-in user take `AuthUser` as an argument, so the identity is
/// explicit per operation instead of ambient request state. Extraction
/// failure resolves to a redirect to the login page, the behavior the write
/// endpoints contract for.
pub mod permissions;

pub use permissions::*;

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

/// Symmetric signing; this service and its identity provider share one secret.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims shared with the identity provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Username, echoed into views
    pub username: String,
}

/// Sign a short-lived access token. The identity provider and the tests
/// share this one definition of the claims.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS)).timestamp(),
        username: username.to_string(),
    };

    encode(
        &Header::new(JWT_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a bearer token and return its claims
pub fn validate_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Authenticated user resolved from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("configuration missing from app data".to_string()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| login_redirect(config, req.path()))?;

    let claims = validate_token(&config.auth.jwt_secret, token)
        .map_err(|_| login_redirect(config, req.path()))?;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| login_redirect(config, req.path()))?;

    Ok(AuthUser {
        id,
        username: claims.username,
    })
}

fn login_redirect(config: &Config, path: &str) -> AppError {
    AppError::Unauthenticated {
        redirect_to: format!("{}?next={}", config.auth.login_url, path),
    }
}
