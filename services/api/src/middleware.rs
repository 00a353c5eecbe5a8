//! Authentication middleware for JWT token validation
//!
//! The api service never signs tokens; it verifies them with the auth
//! service's public key. The decoding key is built once at startup and
//! carried in `AppState`, so no handler touches the environment.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Role carried in tokens issued by the auth service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular platform user
    User,
    /// Event organizer
    Admin,
}

/// JWT claims structure, mirroring what the auth service signs
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User or admin ID
    pub sub: Uuid,
    /// Role of the token holder
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Authenticated caller extracted from a validated token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// Verifies bearer tokens against the auth service's public key
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from a public key in PEM format
    pub fn new(public_key_pem: &str) -> Result<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;
        let mut validation = Validation::new(jsonwebtoken::Algorithm::RS256);
        validation.validate_exp = true;

        Ok(TokenVerifier {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Build a verifier from the environment
    ///
    /// # Environment Variables
    /// - `JWT_PUBLIC_KEY`: verification key (PEM format) or path to a PEM file
    pub fn from_env() -> Result<Self> {
        let value = std::env::var("JWT_PUBLIC_KEY")
            .map_err(|_| anyhow::anyhow!("JWT_PUBLIC_KEY environment variable not set"))?;

        let pem = if value.starts_with("-----BEGIN") {
            value
        } else {
            std::fs::read_to_string(&value)
                .or_else(|_| {
                    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
                    path.push(&value);
                    std::fs::read_to_string(path)
                })
                .map_err(|e| anyhow::anyhow!("Failed to read public key file {}: {}", value, e))?
                .trim()
                .to_string()
        };

        Self::new(&pem)
    }

    /// Validate a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Validate the bearer token and stash the caller in request extensions
fn authenticate(state: &AppState, req: &mut Request<Body>) -> Result<AuthUser, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.verifier.verify(token).map_err(|e| {
        debug!("Token validation failed: {}", e);
        ApiError::Unauthorized
    })?;

    let user = AuthUser {
        id: claims.sub,
        role: claims.role,
    };
    req.extensions_mut().insert(user);
    Ok(user)
}

/// Middleware for routes that require a user token
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &mut req)?;
    if user.role != Role::User {
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}

/// Middleware for routes that require an admin token
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &mut req)?;
    if user.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}
