use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PgUserRepository, UserService};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    // Connect to PostgreSQL with retry
    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    // Wire the domain: Postgres repository behind the service
    let repository = PgUserRepository::new(db.clone());
    let service = UserService::new(repository);

    // Build router with API routes
    let api_routes = api::routes(service, config.pagination.default_limit.clone());

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health and readiness endpoints
    let app = router
        .merge(health_router(config.app.clone()))
        .merge(api::ready_router(db.clone()));

    info!("Starting Users API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        if let Err(e) = db.close().await {
            tracing::warn!("Failed to close database connection cleanly: {}", e);
        } else {
            info!("Database connection closed successfully");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
