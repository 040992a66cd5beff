//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure:
//! - `TestDatabase`: PostgreSQL container with migrations applied
//!   (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let first_name = builder.name("First", "main");
//! let email = builder.email("main");
//! # }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic UUID for testing
    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("First", "main");
    /// // Returns: "First-12345-main"
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Generate a unique email address for testing
    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    /// Generate a deterministic phone number for testing
    pub fn phone(&self, suffix: u32) -> String {
        format!("555-{:04}", (self.seed as u32).wrapping_add(suffix) % 10_000)
    }
}
