//! Middleware for JWT token validation and authentication

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, error::AuthError, jwt::Role};

/// Identity extracted from a validated bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub role: Role,
}

/// Validate the bearer token and stash the identity in request extensions
fn authenticate(state: &AppState, req: &mut Request<Body>) -> Result<AuthIdentity, AuthError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthorized)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        debug!("Token validation failed: {}", e);
        AuthError::Unauthorized
    })?;

    let identity = AuthIdentity {
        id: claims.sub,
        role: claims.role,
    };
    req.extensions_mut().insert(identity);
    Ok(identity)
}

/// Middleware for routes that require a user token
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(&state, &mut req)?;
    if identity.role != Role::User {
        return Err(AuthError::Forbidden);
    }
    Ok(next.run(req).await)
}

/// Middleware for routes that require an admin token
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(&state, &mut req)?;
    if identity.role != Role::Admin {
        return Err(AuthError::Forbidden);
    }
    Ok(next.run(req).await)
}
