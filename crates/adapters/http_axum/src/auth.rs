//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user's id. Handlers that
//! require a caller take an [`AuthUser`] argument; extraction fails with a
//! 401 before the handler body runs, including when the subject is not a
//! registered user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spothub_app::ports::UserRepository;
use spothub_domain::error::SpotHubError;
use spothub_domain::id::UserId;

use crate::error::{ApiError, ResultExt};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// Errors raised while issuing or verifying a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("missing bearer token")]
    Missing,

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Signing and verification keys derived from one shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for `user` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] if encoding fails.
    pub fn issue(&self, user: UserId, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.as_uuid(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Check the signature and expiry of `token` and return its subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for a bad signature, an expired token
    /// or malformed claims.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(UserId::from_uuid(data.claims.sub))
    }
}

/// The verified caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl<S, I, R, U> FromRequestParts<AppState<S, I, R, U>> for AuthUser
where
    S: Send + Sync,
    I: Send + Sync,
    R: Send + Sync,
    U: UserRepository + Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, I, R, U>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(TokenError::Missing)?;

        let user_id = state.token_keys.verify(token)?;
        let user = match state.user_service.get_user(user_id).await {
            Err(SpotHubError::NotFound(_)) => {
                tracing::debug!(%user_id, "token subject is not a registered user");
                return Err(ApiError::Unauthorized);
            }
            result => result.context("Error authenticating user")?,
        };
        Ok(Self { user_id: user.id })
    }
}
