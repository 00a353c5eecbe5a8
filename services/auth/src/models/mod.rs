//! Authentication service models

pub mod admin;
pub mod user;

// Re-export for convenience
pub use admin::{Admin, AdminCredentials, AdminResponse};
pub use user::{NewUser, SigninRequest, SignupRequest, User, UserResponse};
