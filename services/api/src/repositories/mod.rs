//! Repositories for database operations

pub mod application;
pub mod event;
pub mod saved;

pub use application::ApplicationRepository;
pub use event::EventRepository;
pub use saved::SavedEventRepository;
