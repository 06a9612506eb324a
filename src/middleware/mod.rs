use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{AppState, error::AppError};

pub async fn admin_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state
        .security
        .admin_token
        .as_deref()
        .ok_or_else(|| AppError::Forbidden("Admin access is disabled".to_string()))?;

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    if !tokens_match(token, expected) {
        tracing::warn!("Rejected admin request with invalid token");
        return Err(AppError::Unauthorized("Invalid token".to_string()));
    }

    Ok(next.run(req).await)
}

pub async fn allowed_hosts_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|header| header.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or_default();

    if !state.security.allows_host(host) {
        tracing::warn!(host, "Rejected request for disallowed host");
        return Err(AppError::BadRequest("Invalid host header".to_string()));
    }

    Ok(next.run(req).await)
}

/// Constant-time comparison of the SHA-256 digests.
fn tokens_match(given: &str, expected: &str) -> bool {
    let given = Sha256::digest(given.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    given
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
