//! Bearer-token sessions.
//!
//! With `ACTOR_IDENTITY=argument` every helper here passes the client-supplied
//! identity through untouched. With `ACTOR_IDENTITY=session` the identity must
//! match the subject of a valid token issued at login or registration.

use crate::{
    config::Config,
    domain::user::entity::UserProfile,
    presentation::http::errors::AppError,
};
use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub exp: usize,
}

pub fn issue_token(user: &UserProfile, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub fn decode_optional_claims(headers: &HeaderMap, secret: &str) -> Option<SessionClaims> {
    let token = extract_bearer_token(headers)?;
    decode::<SessionClaims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|d| d.claims)
}

pub fn decode_required_claims(
    headers: &HeaderMap,
    secret: &str,
) -> Result<SessionClaims, AppError> {
    decode_optional_claims(headers, secret)
        .ok_or_else(|| AppError::forbidden("authorization", "Missing or invalid session"))
}

/// The acting user for a request that names `claimed` as its actor.
///
/// `field` is the request field the claim came from and is reported when the
/// session belongs to someone else.
pub fn resolve_actor(
    headers: &HeaderMap,
    config: &Config,
    claimed: Uuid,
    field: &str,
) -> Result<Uuid, AppError> {
    let Some(secret) = config.session_secret() else {
        return Ok(claimed);
    };

    let claims = decode_required_claims(headers, secret)?;
    let subject = Uuid::from_str(&claims.sub)
        .map_err(|_| AppError::forbidden("authorization", "Invalid token subject"))?;
    if subject != claimed {
        return Err(AppError::forbidden(field, "User not authorized"));
    }
    Ok(subject)
}

/// Like [`resolve_actor`], for requests that name the actor by username or
/// email instead of id.
pub fn resolve_login_text(headers: &HeaderMap, config: &Config, text: &str) -> Result<(), AppError> {
    let Some(secret) = config.session_secret() else {
        return Ok(());
    };

    let claims = decode_required_claims(headers, secret)?;
    if claims.username != text && claims.email != text {
        return Err(AppError::forbidden("text", "User not authorized"));
    }
    Ok(())
}
