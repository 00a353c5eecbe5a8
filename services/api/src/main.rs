use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{
    AppState,
    middleware::TokenVerifier,
    repositories::{ApplicationRepository, EventRepository, SavedEventRepository},
    routes,
};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use mailer::{Mailer, MailerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    // The verifier holds the auth service's public key, decoded once
    let verifier = TokenVerifier::from_env()?;

    // Initialize the transactional mailer
    let mailer = Mailer::new(MailerConfig::from_env()?);

    let event_repository = EventRepository::new(pool.clone());
    let application_repository = ApplicationRepository::new(pool.clone());
    let saved_repository = SavedEventRepository::new(pool.clone());

    info!("API service initialized successfully");

    let app_state = AppState {
        db_pool: pool,
        event_repository,
        application_repository,
        saved_repository,
        verifier,
        mailer,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    info!("API service listening on 0.0.0.0:3001");

    axum::serve(listener, app).await?;

    Ok(())
}
