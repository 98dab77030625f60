//! Bearer-token authentication for the file manager routes.
//!
//! [`RequireClaims`] validates an HS256 JWT from the `Authorization` header
//! against the configured secret and hands the full claim set to handlers as
//! opaque [`UserClaims`]. The facade never inspects them; they are passed to
//! the command layer unchanged.
//!
//! The token must:
//! - be signed with the server's `JWT_SECRET`
//! - carry a valid `exp` claim
//! - carry an `iss` claim matching [`ISSUER`]

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use filemanager_core::UserClaims;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;

pub const ISSUER: &str = "FileManager";

/// Claims of the authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireClaims {
    claims: UserClaims,
}

impl RequireClaims {
    pub fn claims(&self) -> &UserClaims {
        &self.claims
    }

    /// The `sub` claim, when it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    pub fn into_claims(self) -> UserClaims {
        self.claims
    }
}

/// Rejection for requests without a usable token.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub error: String,
    pub message: String,
}

impl AuthError {
    fn missing_token() -> Self {
        Self {
            error: "missing_token".to_string(),
            message: "Authorization header with Bearer token is required".to_string(),
        }
    }

    fn invalid_format() -> Self {
        Self {
            error: "invalid_format".to_string(),
            message: "Authorization header must be in format: Bearer <token>".to_string(),
        }
    }

    fn invalid_token(reason: impl Into<String>) -> Self {
        Self {
            error: "invalid_token".to_string(),
            message: reason.into(),
        }
    }

    fn missing_config() -> Self {
        Self {
            error: "server_error".to_string(),
            message: "Server configuration error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.error, "Rejected request: {}", self.message);
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn validate_token(token: &str, secret: &str) -> Result<UserClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let data = decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => "Token has expired".to_string(),
        ErrorKind::InvalidSignature => "Invalid token signature".to_string(),
        ErrorKind::InvalidIssuer => "Invalid token issuer".to_string(),
        _ => format!("Token validation failed: {e}"),
    })?;

    Ok(UserClaims::from(data.claims))
}

/// Signs a token for `subject` carrying `extra` claims.
///
/// `sub`, `iss`, `iat` and `exp` always take the values computed here.
pub fn issue_token(
    subject: &str,
    extra: UserClaims,
    secret: &str,
    ttl: chrono::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let mut claims = extra.into_inner();
    claims.insert("sub".to_owned(), Value::from(subject));
    claims.insert("iss".to_owned(), Value::from(ISSUER));
    claims.insert("iat".to_owned(), Value::from(now.timestamp()));
    claims.insert("exp".to_owned(), Value::from((now + ttl).timestamp()));

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

impl<S> FromRequestParts<S> for RequireClaims
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Config>()
            .ok_or_else(AuthError::missing_config)?;

        let token = extract_bearer_token(&parts.headers).ok_or_else(|| {
            if parts.headers.contains_key(AUTHORIZATION) {
                AuthError::invalid_format()
            } else {
                AuthError::missing_token()
            }
        })?;

        let claims = validate_token(token, config.jwt_secret()).map_err(AuthError::invalid_token)?;
        Ok(RequireClaims { claims })
    }
}
