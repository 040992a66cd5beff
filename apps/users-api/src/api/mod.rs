//! API routes module

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_users::{UserRepository, UserService, handlers};
use sea_orm::DatabaseConnection;

/// Create all API routes.
///
/// The users router is nested at `/users`; the configured default limit is
/// handed to the list endpoint for its fallback page size.
pub fn routes<R: UserRepository + 'static>(
    service: UserService<R>,
    default_limit: String,
) -> Router {
    Router::new().nest("/users", handlers::router(service, default_limit))
}

/// Create the readiness router, probing the database connection
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(db)
}

/// Readiness check - verifies the PostgreSQL connection
async fn readiness_check(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok(response) => response.into_response(),
        Err(response) => response.into_response(),
    }
}
