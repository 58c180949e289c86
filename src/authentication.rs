use std::sync::Arc;

use crate::{errors::RequestError, AppState};
use anyhow::{Context, Result};
use argon2::PasswordVerifier;
use argon2::{password_hash::SaltString, Argon2, PasswordHash};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const JWT_EXPIRY_DURATION: time::Duration = time::Duration::days(90);

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaim {
    id: i64,
    exp: i64,
}

/// An authenticated account; rejects the request when no valid token is sent.
#[derive(Debug)]
pub struct AuthUser {
    pub id: i64,
    pub token: String,
}

pub struct MaybeUser(pub Option<AuthUser>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = match parts.headers.get("Authorization") {
            Some(header) => header,
            None => return Ok(MaybeUser(None)),
        };
        let header = header.to_str().map_err(|_| {
            tracing::warn!("authorization header is not valid utf-8");
            RequestError::NotAuthorized("Invalid token")
        })?;
        let token = header.strip_prefix("Token ").ok_or_else(|| {
            tracing::warn!("authorization header without Token prefix");
            RequestError::NotAuthorized("Invalid token")
        })?;

        let state = parts
            .extensions
            .get::<Arc<AppState>>()
            .ok_or(RequestError::ServerError)?;
        let id = verify_jwt_token(token, &state.jwt_secret)?;

        Ok(MaybeUser(Some(AuthUser {
            id,
            token: token.to_string(),
        })))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;
    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await? {
            MaybeUser(Some(user)) => Ok(user),
            MaybeUser(None) => Err(RequestError::NotAuthorized("Need to be authorized")),
        }
    }
}

pub fn get_jwt_token(id: i64, jwt_secret: &str) -> Result<String> {
    let expiry_date = OffsetDateTime::now_utc() + JWT_EXPIRY_DURATION;
    let claim = AuthClaim {
        id,
        exp: expiry_date.unix_timestamp(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .context("Failed to generate jwt token")
}

pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<i64, RequestError> {
    let token_data = jsonwebtoken::decode::<AuthClaim>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_ref()),
        &jsonwebtoken::Validation::default(),
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "rejected token");
        RequestError::NotAuthorized("Invalid Token")
    })?;
    let claim = token_data.claims;
    if claim.exp < OffsetDateTime::now_utc().unix_timestamp() {
        return Err(RequestError::NotAuthorized("Token expired"));
    }
    Ok(claim.id)
}

pub async fn verify_password_argon2(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let hash = PasswordHash::new(hash.as_str())
            .map_err(|_| anyhow::anyhow!("Failed to verify password"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    })
    .await
    .context("Failed to verify password")?
}

pub async fn hash_password_argon2(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = PasswordHash::generate(Argon2::default(), password, salt.as_salt())
            .map_err(|_| anyhow::anyhow!("Failed to hash password"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Failed to hash password")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_with_the_same_secret() {
        let token = get_jwt_token(7, "secret").unwrap();
        assert_eq!(verify_jwt_token(&token, "secret").unwrap(), 7);
        assert!(matches!(
            verify_jwt_token(&token, "other"),
            Err(RequestError::NotAuthorized(_))
        ));
    }

    #[tokio::test]
    async fn password_hash_verifies() {
        let hash = hash_password_argon2("hunter2".into()).await.unwrap();
        assert!(verify_password_argon2("hunter2".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_argon2("wrong".into(), hash).await.unwrap());
    }
}
