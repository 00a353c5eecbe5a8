//! API service models

pub mod application;
pub mod event;
pub mod saved;

// Re-export for convenience
pub use application::{AdminApplication, Application, ApplyRequest};
pub use event::{Event, EventPayload, EventResponse};
pub use saved::SaveEventRequest;
