//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Remote-store credentials are optional:
//! when they are missing or still hold placeholder values, the service runs
//! against the local blob store only.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// Placeholder values shipped in example configs. Treated the same as no
/// credentials at all.
const PLACEHOLDER_URL: &str = "YOUR_SUPABASE_URL";
const PLACEHOLDER_KEY: &str = "YOUR_SUPABASE_ANON_KEY";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub table_name: String,
    pub local_store_path: PathBuf,
    pub pokemon_api_url: String,
    pub countries_api_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Store Settings (credentials are optional) ---
        let supabase_url = std::env::var("SUPABASE_URL")
            .ok()
            .filter(|v| !v.is_empty() && v != PLACEHOLDER_URL);
        let supabase_key = std::env::var("SUPABASE_KEY")
            .ok()
            .filter(|v| !v.is_empty() && v != PLACEHOLDER_KEY);

        let table_name = std::env::var("MATERIALS_TABLE")
            .unwrap_or_else(|_| "materiales_mineros".to_string());

        let local_store_path = std::env::var("LOCAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./material_minero_data.json"));

        // --- Load Reference Catalog Settings ---
        let pokemon_api_url = std::env::var("POKEMON_API_URL")
            .unwrap_or_else(|_| "https://pokeapi.co/api/v2".to_string());
        let countries_api_url = std::env::var("COUNTRIES_API_URL")
            .unwrap_or_else(|_| "https://restcountries.com/v3.1".to_string());

        Ok(Self {
            bind_address,
            log_level,
            supabase_url,
            supabase_key,
            table_name,
            local_store_path,
            pokemon_api_url,
            countries_api_url,
        })
    }

    /// True when both remote-store credentials are configured with real values.
    pub fn has_remote_credentials(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}
