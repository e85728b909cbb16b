//! Configuration management for the console
//!
//! This module handles loading and validation of all service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ConsoleError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the console
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Console configuration
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConsoleError::Config(format!("Failed to read config file: {}", e)))?;

        let console: ConsoleConfig = serde_yaml::from_str(&content)
            .map_err(|e| ConsoleError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { console };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Apply environment variable overrides for host and port
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var("CONSOLE_HOST") {
            self.console.server.host = host;
        }
        if let Ok(port) = std::env::var("CONSOLE_PORT") {
            self.console.server.port = port
                .parse()
                .map_err(|e| ConsoleError::Config(format!("Invalid port: {}", e)))?;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.console.validate()
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.console.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.console.auth
    }

    /// Get store configuration
    pub fn store(&self) -> &StoreConfig {
        &self.console.store
    }
}
