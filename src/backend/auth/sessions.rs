/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 *
 * Every login issues an access/refresh pair signed with HS256. Access tokens
 * authorize API calls; refresh tokens are only accepted by the refresh
 * endpoint, which trades one for a new access token. The `token_type` claim
 * keeps the two from being used interchangeably.
 *
 * # Lifetimes
 *
 * | | access | refresh |
 * |---|---|---|
 * | standard | `ACCESS_TOKEN_MINUTES` (60) | `REFRESH_TOKEN_DAYS` (1) |
 * | remember me | 30 days | 60 days |
 */

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use crate::shared::AppConfig;

/// Access token lifetime when remember-me is requested
pub const REMEMBER_ME_ACCESS_DAYS: i64 = 30;

/// Refresh token lifetime when remember-me is requested
pub const REMEMBER_ME_REFRESH_DAYS: i64 = 60;

/// Which half of the pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issue time
    pub username: String,
    pub token_type: TokenType,
    /// Unique token id, so two tokens issued in the same second differ
    pub jti: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// User ID carried in `sub`
    pub fn user_id(&self) -> Result<Uuid, SessionError> {
        Uuid::parse_str(&self.sub).map_err(|_| SessionError::Invalid)
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub access_expires: DateTime<Utc>,
    pub refresh_expires: DateTime<Utc>,
}

/// Token errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token is expired")]
    Expired,
    #[error("Token is invalid or expired")]
    Invalid,
    #[error("Token has wrong type")]
    WrongType,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs and verifies tokens with the configured secret and lifetimes
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer from a secret and standard lifetimes
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.access_token_minutes),
            Duration::days(config.refresh_token_days),
        )
    }

    /// Issue an access/refresh pair for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `username` - Username embedded in the claims
    /// * `remember_me` - Use the extended lifetimes
    /// * `now` - Issue time
    pub fn issue_pair(
        &self,
        user_id: Uuid,
        username: &str,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, SessionError> {
        let (access_ttl, refresh_ttl) = if remember_me {
            (Duration::days(REMEMBER_ME_ACCESS_DAYS), Duration::days(REMEMBER_ME_REFRESH_DAYS))
        } else {
            (self.access_ttl, self.refresh_ttl)
        };

        let access_expires = now + access_ttl;
        let refresh_expires = now + refresh_ttl;

        Ok(TokenPair {
            access: self.sign(user_id, username, TokenType::Access, now, access_expires)?,
            refresh: self.sign(user_id, username, TokenType::Refresh, now, refresh_expires)?,
            access_expires,
            refresh_expires,
        })
    }

    /// Issue a new access token from a valid refresh token
    ///
    /// # Returns
    /// The new access token and the refresh token's claims
    pub fn refresh_access(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Claims), SessionError> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        let user_id = claims.user_id()?;
        let access = self.sign(user_id, &claims.username, TokenType::Access, now, now + self.access_ttl)?;
        Ok((access, claims))
    }

    /// Verify signature, expiry and type of a token
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid,
            }
        })?;

        if data.claims.token_type != expected {
            return Err(SessionError::WrongType);
        }

        Ok(data.claims)
    }

    fn sign(
        &self,
        user_id: Uuid,
        username: &str,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            token_type,
            jti: Uuid::new_v4().simple().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(SessionError::Signing)
    }
}
