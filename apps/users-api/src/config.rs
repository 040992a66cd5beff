use core_config::{AppInfo, FromEnv, app_info, env_or_default, pagination::PaginationConfig, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub pagination: PaginationConfig,
    /// Apply pending migrations during startup (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let postgres = PostgresConfig::from_env()?;
        let pagination = PaginationConfig::from_env()?;

        let run_migrations = env_or_default("RUN_MIGRATIONS", "true")
            .parse::<bool>()
            .map_err(|e| eyre::eyre!("Failed to parse RUN_MIGRATIONS: {}", e))?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            postgres,
            pagination,
            run_migrations,
        })
    }
}
