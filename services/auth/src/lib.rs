//! DevMeet authentication service
//!
//! Identity for the platform: user signup/signin, the OTP password-reset
//! workflow, and admin registration/login. Issues RS256 JWTs consumed by
//! the api service.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod validation;

use mailer::Mailer;
use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    rate_limiter::RateLimiter,
    repositories::{AdminRepository, UserRepository},
};

/// Application state shared across handlers
///
/// Everything is constructed once at startup and handed to the router;
/// handlers never reach for globals or re-read the environment.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub admin_repository: AdminRepository,
    pub rate_limiter: RateLimiter,
    pub mailer: Mailer,
}
