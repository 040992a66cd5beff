//! Custom extractors for Axum handlers.
//!
//! Reusable extractors that standardize request parsing and rejection
//! responses across the API.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
