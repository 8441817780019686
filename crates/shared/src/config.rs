//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Receipt processing defaults.
    #[serde(default)]
    pub receipts: ReceiptConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Defaults applied when a document-analysis result omits fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    /// Default currency code used when the analysis produced none.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Default currency symbol for new tenant settings.
    #[serde(default = "default_currency_symbol")]
    pub default_currency_symbol: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            default_currency_symbol: default_currency_symbol(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RECIVO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
