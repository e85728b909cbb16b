//! Configuration models

use crate::core::models::RoleName;
use crate::utils::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};

/// Top-level console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication and session configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Entity store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl ConsoleConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConsoleError::config("server.port must be non-zero"));
        }

        if self.auth.session_ttl_secs < 60 {
            return Err(ConsoleError::config(
                "auth.session_ttl_secs must be at least 60",
            ));
        }

        if let Some(admin) = &self.auth.bootstrap_admin {
            if admin.email.trim().is_empty() || admin.password.trim().is_empty() {
                return Err(ConsoleError::config(
                    "auth.bootstrap_admin requires both email and password",
                ));
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker count; defaults to the actix default when unset
    #[serde(default)]
    pub workers: Option<usize>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS handling
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Allow credentialed requests
    #[serde(default)]
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: default_cors_max_age(),
        }
    }
}

/// Authentication and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Role assigned to self-registered accounts
    #[serde(default = "default_role")]
    pub default_role: RoleName,
    /// Administrator account created at startup if absent
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            default_role: default_role(),
            bootstrap_admin: None,
        }
    }
}

/// Bootstrap administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Display name
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Email address
    pub email: String,
    /// Initial password
    pub password: String,
}

/// Entity store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Seed the default role and permission fixtures at startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Behavior when deleting a permission still granted by a role
    #[serde(default)]
    pub delete_policy: DeletePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            delete_policy: DeletePolicy::default(),
        }
    }
}

/// Behavior when deleting a permission still granted by a role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Reject the delete while references exist
    #[default]
    Restrict,
    /// Remove the reference from every role in the same mutation
    Cascade,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_cors_max_age() -> u32 {
    3600
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_role() -> RoleName {
    RoleName::User
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}
