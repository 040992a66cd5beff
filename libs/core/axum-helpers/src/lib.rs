//! # Axum Helpers
//!
//! Utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, OpenAPI docs, health checks, graceful shutdown
//! - **[`response`]**: The uniform API response envelope
//! - **[`errors`]**: Application errors mapped to enveloped HTTP responses
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//! - **[`http`]**: HTTP middleware (security headers)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export error and response types
pub use errors::AppError;
pub use response::ApiResponse;

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
