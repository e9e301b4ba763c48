use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Access tier carried by a token. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const USER: &'static str = "user";

    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn admin() -> Self {
        Self::new(Self::ADMIN)
    }

    pub fn user() -> Self {
        Self::new(Self::USER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compact token payload: the role lives under `r`
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub r: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(role: Role, ttl: Option<Duration>) -> Self {
        Self {
            r: role,
            exp: ttl.map(|ttl| (Utc::now() + ttl).timestamp()),
        }
    }
}

/// Why a credential was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Token is missing!")]
    MissingCredential,

    #[error("Token has expired!")]
    ExpiredCredential,

    #[error("Invalid token!")]
    InvalidCredential,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT_SECRET_KEY environment variable is not set")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Verifies HS256 role tokens against the process secret
#[derive(Clone)]
pub struct TokenValidator {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenValidator {
    /// A validator without a secret rejects every credential as invalid.
    pub fn new(secret: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional in compact tokens but still enforced when present
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            key: secret
                .filter(|s| !s.is_empty())
                .map(|s| DecodingKey::from_secret(s.as_bytes())),
            validation,
        }
    }

    pub fn validate(&self, raw_credential: Option<&str>) -> Result<Role, AuthError> {
        let token = raw_credential
            .map(strip_scheme)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let key = self.key.as_ref().ok_or_else(|| {
            tracing::error!("Token verification attempted without JWT_SECRET_KEY configured");
            AuthError::InvalidCredential
        })?;

        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
            _ => {
                tracing::debug!("Rejected token: {}", e);
                AuthError::InvalidCredential
            }
        })?;

        Ok(data.claims.r)
    }
}

/// Mints compact role tokens
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: Option<&str>) -> Result<Self, TokenError> {
        let secret = secret.filter(|s| !s.is_empty()).ok_or(TokenError::MissingSecret)?;
        Ok(Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn issue(&self, role: &Role, ttl: Option<Duration>) -> Result<String, TokenError> {
        let claims = Claims::new(role.clone(), ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::TokenGeneration(e.to_string()))
    }
}

fn strip_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix("Bearer ").map(str::trim).unwrap_or(raw)
}
