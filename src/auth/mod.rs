//! JWT issuing and validation.
//!
//! Tokens carry the user id only. They are signed with HS256 using the
//! application secret and expire after [`AuthSettings::token_ttl`].

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// bcrypt work factor used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Token lifetime used when none is configured
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub app_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(app_secret: impl Into<String>) -> Self {
        Self {
            app_secret: app_secret.into(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}

/// Raw bearer token attached to a GraphQL request.
///
/// Stored as request data and only validated when a resolver needs the
/// caller's identity, so anonymous queries never fail on a stale token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts both `Bearer <token>` and a bare token.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let token = match value.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            _ if value.eq_ignore_ascii_case("bearer") => "",
            _ => value,
        };

        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }
}

/// Pull the token out of an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<BearerToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BearerToken::parse)
}

pub fn issue_token(user_id: i32, settings: &AuthSettings) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        user_id,
        iat: now.timestamp(),
        exp: (now + settings.token_ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.app_secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
