use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::access::{AccessGate, Decision, Requirement};
use crate::auth::AuthError;
use crate::error::ApiError;

/// Per-route access stage: the gate plus what this route requires
#[derive(Clone)]
pub struct RouteGuard {
    gate: AccessGate,
    requirement: Requirement,
}

impl RouteGuard {
    pub fn new(gate: AccessGate, requirement: Requirement) -> Self {
        Self { gate, requirement }
    }
}

/// Either continues with the caller's `Role` in the request extensions or
/// short-circuits with 401/403 before the handler runs.
pub async fn access_guard(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let decision = match credential_from_headers(request.headers()) {
        Ok(credential) => guard.gate.evaluate(credential, &guard.requirement),
        Err(err) => Decision::Deny(err.into()),
    };

    match decision {
        Decision::Allow(role) => {
            tracing::debug!("Access granted to role '{}' for {}", role, request.uri().path());
            request.extensions_mut().insert(role);
            Ok(next.run(request).await)
        }
        Decision::Deny(err) => {
            tracing::warn!("Access denied for {}: {:?}", request.uri().path(), err);
            Err(err.into())
        }
    }
}

/// The raw credential from the Authorization header, if any
fn credential_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::InvalidCredential))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(credential_from_headers(&headers), Ok(None));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(credential_from_headers(&headers), Ok(Some("abc.def.ghi")));
    }

    #[test]
    fn non_text_header_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(credential_from_headers(&headers), Err(AuthError::InvalidCredential));
    }
}
