use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tokens: TokensConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Upper bound on any single storage call, pool acquisition included.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokensConfig {
    #[serde(default = "default_authentication_ttl_hours")]
    pub authentication_ttl_hours: i64,
}

impl TokensConfig {
    /// # Errors
    /// * `ConfigError::Message` - TTL is not positive or does not fit a duration
    pub fn authentication_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.authentication_ttl_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "tokens.authentication_ttl_hours must be positive, got {}",
                self.authentication_ttl_hours
            )));
        }

        chrono::Duration::try_hours(self.authentication_ttl_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "tokens.authentication_ttl_hours is out of range: {}",
                self.authentication_ttl_hours
            ))
        })
    }
}

fn default_max_connections() -> u32 {
    25
}

fn default_query_timeout_secs() -> u64 {
    3
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_authentication_ttl_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.tokens.authentication_ttl()?;
        Ok(())
    }
}
