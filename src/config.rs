//! Configuration management for the mango file relay
//!
//! Values are read once at startup: built-in defaults, then an optional
//! `config.toml`, then `MANGO_` prefixed environment variables. The resulting
//! [`ServiceConfig`] is immutable and handed to every component that needs it.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 2069;
pub const DEFAULT_DIRECTORY: &str = "data";
pub const DEFAULT_SIZE_LIMIT: u64 = 5_000_000;
pub const DEFAULT_LIFETIME_MS: u64 = 5 * 60 * 1000;

const ENV_PREFIX: &str = "MANGO";

/// Process-wide service configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Storage root for uploaded files
    pub directory: String,

    /// Upload size limit in bytes
    pub size_limit: u64,

    /// Lifetime of a stored file in milliseconds, measured from upload
    pub lifetime: u64,

    /// Whether the X-Forwarded-For header identifies the client
    pub trust_proxy: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            directory: DEFAULT_DIRECTORY.to_string(),
            size_limit: DEFAULT_SIZE_LIMIT,
            lifetime: DEFAULT_LIFETIME_MS,
            trust_proxy: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `./config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Self::from_settings(settings)
    }

    /// Load configuration from an explicit file, still honoring environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Self::from_settings(settings)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("directory", DEFAULT_DIRECTORY)?
            .set_default("size_limit", DEFAULT_SIZE_LIMIT as i64)?
            .set_default("lifetime", DEFAULT_LIFETIME_MS as i64)?
            .set_default("trust_proxy", false)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.directory.trim().is_empty() {
            return Err(ConfigError::Message("directory cannot be empty".into()));
        }

        if self.size_limit == 0 {
            return Err(ConfigError::Message(
                "size_limit must be greater than 0".into(),
            ));
        }

        if self.lifetime == 0 {
            return Err(ConfigError::Message(
                "lifetime must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn listen_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("invalid bind address: {e}")))
    }

    /// Get the storage root as PathBuf
    pub fn storage_root(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }

    /// Get the file lifetime as Duration
    pub fn lifetime_duration(&self) -> Duration {
        Duration::from_millis(self.lifetime)
    }
}
