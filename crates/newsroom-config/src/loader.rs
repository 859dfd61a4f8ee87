//! Configuration loader with layered sources.

use crate::{AppConfig, DatabaseBackend};
use config::{Config, ConfigError, Environment, File};
use newsroom_core::NewsroomError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{dir}/default.toml`
    /// 2. `{dir}/{environment}.toml`, where the environment comes from
    ///    `NEWSROOM_ENVIRONMENT` (default `development`)
    /// 3. `{dir}/local.toml`
    /// 4. Environment variables such as `NEWSROOM__CACHE__TTL_SECS`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, NewsroomError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, NewsroomError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), NewsroomError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, NewsroomError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("NEWSROOM_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("NEWSROOM")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_newsroom_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Fails fast on settings the server cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), NewsroomError> {
    if config.database.backend == DatabaseBackend::Postgres && config.database.url.is_empty() {
        return Err(NewsroomError::Configuration(
            "Database URL is required for the postgres backend".to_string(),
        ));
    }

    if config.database.min_connections > config.database.max_connections {
        return Err(NewsroomError::Configuration(format!(
            "database.min_connections ({}) exceeds database.max_connections ({})",
            config.database.min_connections, config.database.max_connections
        )));
    }

    if config.cache.ttl_secs == 0 {
        return Err(NewsroomError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(NewsroomError::Configuration(
            "Redis URL is required when redis is enabled".to_string(),
        ));
    }

    if config.jobs.enabled && config.jobs.poll_interval_secs == 0 {
        return Err(NewsroomError::Configuration(
            "jobs.poll_interval_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.key_prefix.is_empty() {
        warn!("cache.key_prefix is empty; keys may collide with other tenants of the Redis instance");
    }

    Ok(())
}

fn config_error_to_newsroom_error(err: ConfigError) -> NewsroomError {
    NewsroomError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvalidationPolicy;
    use std::fs;

    #[tokio::test]
    async fn test_loads_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cache]\nttl_secs = 120\n\n[server]\nport = 9000\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("local.toml"),
            "[cache]\ninvalidation = \"refresh\"\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.invalidation, InvalidationPolicy::Refresh);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.key_prefix, "newsroom:cache");
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[cache]\nttl_secs = 60\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.cache.ttl_secs, 60);

        fs::write(&path, "[cache]\nttl_secs = 90\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.cache.ttl_secs, 90);
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 0\n").unwrap();

        let result = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        assert!(matches!(result, Err(NewsroomError::Configuration(_))));
    }

    #[test]
    fn test_memory_backend_needs_no_url() {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.database.url = String::new();
        assert!(validate_config(&config).is_ok());

        config.database.backend = DatabaseBackend::Postgres;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_redis_url_required_when_enabled() {
        let mut config = AppConfig::default();
        config.redis.url = String::new();
        assert!(validate_config(&config).is_err());

        config.redis.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_jobs_poll_interval_must_be_positive() {
        let mut config = AppConfig::default();
        config.jobs.poll_interval_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(NewsroomError::Configuration(_))
        ));

        config.jobs.enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
