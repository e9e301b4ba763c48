//! Access control gate: token validation composed with a per-route role check.

use std::sync::Arc;
use thiserror::Error;

use crate::auth::{AuthError, Role, TokenValidator};

/// What a route demands from the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Any valid credential
    Authenticated,
    /// A valid credential whose role equals this one exactly
    Role(Role),
}

impl Requirement {
    pub fn role(role: impl Into<String>) -> Self {
        Requirement::Role(Role::new(role))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Access denied: Insufficient permissions!")]
    InsufficientRole { required: Role, actual: Role },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Role),
    Deny(AccessError),
}

#[derive(Clone)]
pub struct AccessGate {
    validator: Arc<TokenValidator>,
}

impl AccessGate {
    pub fn new(validator: TokenValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }

    /// Validates the credential, then (and only then) compares roles.
    pub fn evaluate(&self, credential: Option<&str>, requirement: &Requirement) -> Decision {
        let role = match self.validator.validate(credential) {
            Ok(role) => role,
            Err(err) => return Decision::Deny(err.into()),
        };

        match requirement {
            Requirement::Authenticated => Decision::Allow(role),
            Requirement::Role(required) if *required == role => Decision::Allow(role),
            Requirement::Role(required) => Decision::Deny(AccessError::InsufficientRole {
                required: required.clone(),
                actual: role,
            }),
        }
    }
}
