use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use auth::{
    AppState,
    jwt::{JwtConfig, JwtService},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{AdminRepository, UserRepository},
    routes,
};
use mailer::{Mailer, MailerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication service");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    common::database::run_migrations(&pool).await?;

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config)?;

    // Initialize the transactional mailer
    let mailer = Mailer::new(MailerConfig::from_env()?);

    let user_repository = UserRepository::new(pool.clone());
    let admin_repository = AdminRepository::new(pool.clone());
    let rate_limiter = RateLimiter::new(RateLimiterConfig::default());

    info!("Authentication service initialized successfully");

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        user_repository,
        admin_repository,
        rate_limiter,
        mailer,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Authentication service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
