//! Application state shared across handlers
//!
//! Built once at startup; the token verifier in particular holds the
//! decoded public key so handlers never re-read the environment.

use mailer::Mailer;
use sqlx::PgPool;

use crate::middleware::TokenVerifier;
use crate::repositories::{ApplicationRepository, EventRepository, SavedEventRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub event_repository: EventRepository,
    pub application_repository: ApplicationRepository,
    pub saved_repository: SavedEventRepository,
    pub verifier: TokenVerifier,
    pub mailer: Mailer,
}
