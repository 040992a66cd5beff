use crate::{env_or_default, ConfigError, FromEnv};

/// Listing defaults for paginated endpoints.
///
/// The default limit is carried as the raw string from the environment and
/// parsed per request, only when the caller did not supply a usable limit.
#[derive(Clone, Debug)]
pub struct PaginationConfig {
    pub default_limit: String,
}

impl FromEnv for PaginationConfig {
    /// Reads `PAGINATION_DEFAULT_LIMIT` (default: "10")
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_limit: env_or_default("PAGINATION_DEFAULT_LIMIT", "10"),
        })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: "10".to_string(),
        }
    }
}
