//! DevMeet API service
//!
//! The domain side of the platform: events with derived capacity, the
//! application lifecycle, and saved-event marks. Verifies bearer tokens
//! issued by the auth service; never signs any itself.

pub mod capacity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use state::AppState;
