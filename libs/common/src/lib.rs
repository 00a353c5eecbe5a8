//! Shared infrastructure for the DevMeet services
//!
//! Both the auth and api services source their PostgreSQL pool,
//! migrations and health check from here.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, run_migrations, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
