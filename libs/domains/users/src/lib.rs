//! Users Domain
//!
//! This module provides a complete domain implementation for user management.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! // Create Axum router; list endpoints fall back to the configured
//! // default page size when the caller supplies none
//! let router = handlers::router(service, "10".to_string());
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, MessageResponse, UpdateUser, User, UserFilter};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
